pub mod collection;
pub mod keys;
pub mod notification;

pub use collection::{CardId, Collection, CollectionCard, CollectionSet, Totals};
pub use notification::{Notification, NotificationKind};
pub use keys::unique_keys;

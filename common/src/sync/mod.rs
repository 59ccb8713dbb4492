pub mod state;
pub mod view_model;

pub use state::SyncState;
pub use view_model::{CollectionViewModel, LoadTicket};

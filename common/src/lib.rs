//! Shared core of the card collection tracker: the collection model, the
//! document store contract and wire format, configuration, search, and the
//! view-model that keeps the in-memory collection in step with the store.

pub mod config;
pub mod error;
pub mod model;
pub mod requests;
pub mod search;
pub mod store;
pub mod sync;

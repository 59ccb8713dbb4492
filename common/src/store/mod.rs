//! The document store holding the collection.
//!
//! The store exposes exactly two operations: read the document and replace it
//! wholesale. [`DocumentStore`] is the seam; the browser implementation lives
//! in the frontend crate and `memory::InMemoryStore` (behind the
//! `test-support` feature) backs the tests. [`codec`] holds the wire details
//! both sides agree on.

pub mod codec;
pub mod deadline;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::collection::Collection;

/// Remote persistence for a single collection document.
///
/// Futures are not required to be `Send`: in the browser every request runs
/// on the single UI thread.
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Reads the current document.
    async fn fetch_collection(&self) -> Result<Collection, StoreError>;

    /// Overwrites the document with `collection` and returns the store's echo
    /// of what it saved, which becomes the new source of truth.
    async fn save_collection(&self, collection: &Collection) -> Result<Collection, StoreError>;
}

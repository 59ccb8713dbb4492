use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use super::DocumentStore;
use crate::error::StoreError;
use crate::model::collection::Collection;

/// Store kept in memory, used to exercise the sync flow without a network.
///
/// Failures can be queued per operation, and a normalizer can rewrite saved
/// documents the way a real store may (reordering, filling defaults).
pub struct InMemoryStore {
    document: RefCell<Collection>,
    fetch_failure: RefCell<Option<StoreError>>,
    save_failure: RefCell<Option<StoreError>>,
    normalizer: Option<fn(Collection) -> Collection>,
    pub fetch_calls: Cell<u64>,
    pub save_calls: Cell<u64>,
}

impl InMemoryStore {
    pub fn new(document: Collection) -> Self {
        InMemoryStore {
            document: RefCell::new(document),
            fetch_failure: RefCell::new(None),
            save_failure: RefCell::new(None),
            normalizer: None,
            fetch_calls: Cell::new(0),
            save_calls: Cell::new(0),
        }
    }

    /// Applies `normalizer` to every saved document before storing and echoing it.
    pub fn with_normalizer(mut self, normalizer: fn(Collection) -> Collection) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    /// The next fetch fails with `error`.
    pub fn fail_next_fetch(&self, error: StoreError) {
        *self.fetch_failure.borrow_mut() = Some(error);
    }

    /// The next save fails with `error` and leaves the document unchanged.
    pub fn fail_next_save(&self, error: StoreError) {
        *self.save_failure.borrow_mut() = Some(error);
    }

    pub fn document(&self) -> Collection {
        self.document.borrow().clone()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        InMemoryStore::new(Collection::default())
    }
}

#[async_trait(?Send)]
impl DocumentStore for InMemoryStore {
    async fn fetch_collection(&self) -> Result<Collection, StoreError> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        if let Some(error) = self.fetch_failure.borrow_mut().take() {
            return Err(error);
        }
        Ok(self.document.borrow().clone())
    }

    async fn save_collection(&self, collection: &Collection) -> Result<Collection, StoreError> {
        self.save_calls.set(self.save_calls.get() + 1);
        if let Some(error) = self.save_failure.borrow_mut().take() {
            return Err(error);
        }
        let saved = match self.normalizer {
            Some(normalize) => normalize(collection.clone()),
            None => collection.clone(),
        };
        *self.document.borrow_mut() = saved.clone();
        Ok(saved)
    }
}

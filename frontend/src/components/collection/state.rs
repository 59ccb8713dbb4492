//! Runtime state of the collection page.

use std::rc::Rc;

use common::config::AppConfig;
use common::sync::CollectionViewModel;

use crate::store::HttpDocumentStore;

pub struct CollectionComponent {
    /// Collection, sync state and search term. All edits go through it.
    pub view_model: CollectionViewModel,

    /// Shared with the request futures spawned by `update`.
    pub store: Rc<HttpDocumentStore>,

    /// Guard so the initial load runs once.
    pub loaded: bool,
}

impl CollectionComponent {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            view_model: CollectionViewModel::new(config.search_script),
            store: Rc::new(HttpDocumentStore::new(config.store.clone())),
            loaded: false,
        }
    }
}

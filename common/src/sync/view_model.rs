//! In-memory owner of the collection during a session.
//!
//! Network calls are split into a `begin_*` step, which checks the transition
//! and hands out what the request needs, and a `finish_*` step, which applies
//! the outcome. A UI that cannot hold `&mut self` across an await (a Yew
//! component) drives the two halves from its messages; [`CollectionViewModel::load`]
//! and [`CollectionViewModel::save`] run both halves against a [`DocumentStore`].

use std::rc::Rc;

use log::{debug, error, info, warn};

use super::state::SyncState;
use crate::error::{StoreError, SyncError};
use crate::model::collection::{CardId, Collection, CollectionSet, Totals};
use crate::model::notification::Notification;
use crate::search::{SearchScript, filter_by_search};
use crate::store::DocumentStore;

pub const SAVED_MESSAGE: &str = "Saved !";

/// Identifies one load request. Only the most recent ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

pub struct CollectionViewModel {
    collection: Rc<Collection>,
    /// Last value loaded from or accepted by the store.
    baseline: Rc<Collection>,
    state: SyncState,
    search_term: String,
    search_script: SearchScript,
    load_generation: u64,
}

impl CollectionViewModel {
    pub fn new(search_script: SearchScript) -> Self {
        let empty = Rc::new(Collection::default());
        CollectionViewModel {
            collection: empty.clone(),
            baseline: empty,
            state: SyncState::Idle,
            search_term: String::new(),
            search_script,
            load_generation: 0,
        }
    }

    pub fn collection(&self) -> &Rc<Collection> {
        &self.collection
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == SyncState::Loading
    }

    pub fn is_saving(&self) -> bool {
        self.state == SyncState::Saving
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Stores the search box content after converting it to the configured
    /// script, and returns the stored text so the input can show it.
    pub fn set_search_input(&mut self, raw: &str) -> &str {
        self.search_term = self.search_script.transliterate(raw);
        &self.search_term
    }

    pub fn totals(&self) -> Totals {
        self.collection.totals()
    }

    /// Sets to render for the current search term.
    pub fn visible_sets(&self) -> Vec<Rc<CollectionSet>> {
        filter_by_search(&self.collection, &self.search_term)
    }

    pub fn has_unsaved_changes(&self) -> bool {
        !Rc::ptr_eq(&self.collection, &self.baseline) && self.collection != self.baseline
    }

    /// Starts a load. Calling this while a load is in flight supersedes it:
    /// the earlier ticket's result will be discarded.
    pub fn begin_load(&mut self) -> Result<LoadTicket, SyncError> {
        match self.state {
            SyncState::Saving => {
                warn!("load rejected while saving");
                Err(SyncError::Busy(self.state))
            }
            SyncState::Idle | SyncState::Loading => {
                if self.state == SyncState::Loading {
                    debug!("restarting load, dropping ticket {}", self.load_generation);
                }
                self.load_generation += 1;
                self.state = SyncState::Loading;
                Ok(LoadTicket(self.load_generation))
            }
        }
    }

    /// Applies the outcome of the load started with `ticket`.
    ///
    /// On failure the previous collection is kept and an error notification is
    /// returned. Stale tickets are ignored.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Collection, StoreError>,
    ) -> Option<Notification> {
        if self.state != SyncState::Loading || ticket.0 != self.load_generation {
            debug!("ignoring result of superseded load {}", ticket.0);
            return None;
        }
        self.state = SyncState::Idle;

        match result {
            Ok(collection) => {
                self.adopt(collection);
                let totals = self.totals();
                info!(
                    "loaded collection: {} sets, {}/{} cards collected",
                    self.collection.sets.len(),
                    totals.collected,
                    totals.total
                );
                None
            }
            Err(err) => {
                error!("failed to load collection: {err}");
                Some(Notification::error(format!("Failed to load collection: {err}")))
            }
        }
    }

    /// Marks the card `id` as collected or not. Local only; nothing is sent
    /// until the next save.
    pub fn toggle_collected(&mut self, id: &CardId, checked: bool) -> Result<(), SyncError> {
        if self.state != SyncState::Idle {
            warn!("edit of card {id} rejected while {}", self.state);
            return Err(SyncError::Busy(self.state));
        }
        let next = self
            .collection
            .with_collected(id, checked)
            .ok_or_else(|| SyncError::UnknownCard(id.clone()))?;
        debug!("card {id} collected = {checked}");
        self.collection = Rc::new(next);
        Ok(())
    }

    /// Starts a save and returns the snapshot to send. Only allowed when idle;
    /// overlapping saves are rejected rather than queued.
    pub fn begin_save(&mut self) -> Result<Rc<Collection>, SyncError> {
        if self.state != SyncState::Idle {
            warn!("save rejected while {}", self.state);
            return Err(SyncError::Busy(self.state));
        }
        self.state = SyncState::Saving;
        Ok(self.collection.clone())
    }

    /// Applies the outcome of the pending save.
    ///
    /// On success the store's echo replaces the local collection. On failure the
    /// local edits stay in place so the user can retry.
    pub fn finish_save(&mut self, result: Result<Collection, StoreError>) -> Option<Notification> {
        if self.state != SyncState::Saving {
            warn!("save result arrived with no save pending");
            return None;
        }
        self.state = SyncState::Idle;

        match result {
            Ok(echo) => {
                self.adopt(echo);
                info!("collection saved");
                Some(Notification::success(SAVED_MESSAGE))
            }
            Err(err) => {
                error!("failed to save collection: {err}");
                Some(Notification::error(format!("Failed to save collection: {err}")))
            }
        }
    }

    /// Fetches the collection from `store` and applies the result.
    pub async fn load<S>(&mut self, store: &S) -> Result<Option<Notification>, SyncError>
    where
        S: DocumentStore + ?Sized,
    {
        let ticket = self.begin_load()?;
        let result = store.fetch_collection().await;
        Ok(self.finish_load(ticket, result))
    }

    /// Sends the whole collection to `store` and applies the echo.
    pub async fn save<S>(&mut self, store: &S) -> Result<Option<Notification>, SyncError>
    where
        S: DocumentStore + ?Sized,
    {
        let snapshot = self.begin_save()?;
        let result = store.save_collection(&snapshot).await;
        Ok(self.finish_save(result))
    }

    fn adopt(&mut self, mut collection: Collection) {
        let assigned = collection.assign_missing_ids();
        if assigned > 0 {
            info!("assigned ids to {assigned} cards without one");
        }
        let duplicates = collection.duplicate_card_ids();
        if !duplicates.is_empty() {
            warn!("duplicate card ids in collection: {duplicates:?}");
        }
        let collection = Rc::new(collection);
        self.baseline = collection.clone();
        self.collection = collection;
    }
}

impl Default for CollectionViewModel {
    fn default() -> Self {
        CollectionViewModel::new(SearchScript::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::collection::{CollectionCard, CollectionSet};
    use crate::model::notification::NotificationKind;
    use crate::store::memory::InMemoryStore;

    fn sample() -> Collection {
        Collection::new(vec![
            CollectionSet::new(
                "Set A",
                vec![
                    CollectionCard::new("1", "Alpha", false),
                    CollectionCard::new("2", "Beta", true),
                ],
            ),
            CollectionSet::new("Set B", vec![CollectionCard::new("3", "Gamma", true)]),
        ])
    }

    fn loaded() -> CollectionViewModel {
        let mut vm = CollectionViewModel::new(SearchScript::Latin);
        let ticket = vm.begin_load().unwrap();
        assert_eq!(vm.finish_load(ticket, Ok(sample())), None);
        vm
    }

    #[test]
    fn load_replaces_collection_and_returns_to_idle() {
        let vm = loaded();
        assert_eq!(vm.state(), SyncState::Idle);
        assert_eq!(vm.totals(), Totals { collected: 2, total: 3 });
        assert!(!vm.has_unsaved_changes());
    }

    #[test]
    fn failed_load_keeps_previous_collection() {
        let mut vm = loaded();
        let before = vm.collection().clone();
        let ticket = vm.begin_load().unwrap();
        let note = vm
            .finish_load(ticket, Err(StoreError::Network("offline".into())))
            .unwrap();
        assert_eq!(note.kind, NotificationKind::Error);
        assert!(note.message.contains("offline"));
        assert!(Rc::ptr_eq(vm.collection(), &before));
        assert!(!vm.is_loading());
    }

    #[test]
    fn restarted_load_discards_the_superseded_result() {
        let mut vm = CollectionViewModel::new(SearchScript::Latin);
        let first = vm.begin_load().unwrap();
        let second = vm.begin_load().unwrap();
        assert_ne!(first, second);

        assert_eq!(vm.finish_load(first, Ok(sample())), None);
        assert!(vm.is_loading());
        assert!(vm.collection().is_empty());

        vm.finish_load(second, Ok(Collection::default()));
        assert_eq!(vm.state(), SyncState::Idle);
    }

    #[test]
    fn toggle_is_local_and_changes_one_card() {
        let mut vm = loaded();
        let before = vm.collection().clone();
        vm.toggle_collected(&"1".into(), true).unwrap();

        assert!(!Rc::ptr_eq(vm.collection(), &before));
        assert_eq!(vm.totals(), Totals { collected: 3, total: 3 });
        assert!(vm.has_unsaved_changes());
        for card in before.cards().filter(|card| card.id.as_str() != "1") {
            assert_eq!(vm.collection().find_card(&card.id).unwrap().collected, card.collected);
        }

        vm.toggle_collected(&"1".into(), false).unwrap();
        assert!(!vm.has_unsaved_changes());
    }

    #[test]
    fn toggle_unknown_card_is_an_error() {
        let mut vm = loaded();
        assert_eq!(
            vm.toggle_collected(&"nope".into(), true),
            Err(SyncError::UnknownCard("nope".into()))
        );
    }

    #[test]
    fn edits_and_second_save_rejected_while_saving() {
        let mut vm = loaded();
        vm.begin_save().unwrap();
        assert_eq!(vm.begin_save(), Err(SyncError::Busy(SyncState::Saving)));
        assert_eq!(
            vm.toggle_collected(&"1".into(), true),
            Err(SyncError::Busy(SyncState::Saving))
        );
        assert_eq!(vm.begin_load(), Err(SyncError::Busy(SyncState::Saving)));
    }

    #[test]
    fn save_not_allowed_while_loading() {
        let mut vm = CollectionViewModel::default();
        vm.begin_load().unwrap();
        assert_eq!(vm.begin_save(), Err(SyncError::Busy(SyncState::Loading)));
    }

    #[test]
    fn failed_save_keeps_local_edits() {
        let mut vm = loaded();
        vm.toggle_collected(&"1".into(), true).unwrap();
        vm.begin_save().unwrap();
        let note = vm
            .finish_save(Err(StoreError::Remote {
                status: 500,
                message: "boom".into(),
            }))
            .unwrap();
        assert!(note.is_error());
        assert!(vm.collection().find_card(&"1".into()).unwrap().collected);
        assert!(vm.has_unsaved_changes());
        assert_eq!(vm.state(), SyncState::Idle);
    }

    #[test]
    fn finish_save_without_pending_save_is_ignored() {
        let mut vm = loaded();
        assert_eq!(vm.finish_save(Ok(Collection::default())), None);
        assert_eq!(vm.totals().total, 3);
    }

    #[test]
    fn search_input_is_stored_transliterated() {
        let mut vm = CollectionViewModel::new(SearchScript::Katakana);
        assert_eq!(vm.set_search_input("gamu"), "ガム");
        assert_eq!(vm.search_term(), "ガム");

        let mut vm = loaded();
        vm.set_search_input("gam");
        let visible = vm.visible_sets();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Set B");
    }

    #[test]
    fn adopts_documents_without_ids() {
        let mut vm = CollectionViewModel::default();
        let ticket = vm.begin_load().unwrap();
        let legacy = Collection::new(vec![CollectionSet::new(
            "Old",
            vec![CollectionCard {
                name: "Nameless".into(),
                ..Default::default()
            }],
        )]);
        vm.finish_load(ticket, Ok(legacy));
        let id = vm.collection().sets[0].cards[0].id.clone();
        assert!(!id.is_empty());
        vm.toggle_collected(&id, true).unwrap();
        assert_eq!(vm.totals().collected, 1);
    }

    #[tokio::test]
    async fn load_and_save_against_store() {
        let store = InMemoryStore::new(sample());
        let mut vm = CollectionViewModel::new(SearchScript::Latin);

        assert_eq!(vm.load(&store).await, Ok(None));
        vm.toggle_collected(&"1".into(), true).unwrap();
        assert_eq!(store.save_calls.get(), 0);

        let note = vm.save(&store).await.unwrap().unwrap();
        assert_eq!(note, Notification::success(SAVED_MESSAGE));
        assert_eq!(store.save_calls.get(), 1);
        assert_eq!(&store.document(), vm.collection().as_ref());
        assert!(!vm.has_unsaved_changes());
    }
}

use common::error::StoreError;
use common::model::{CardId, Collection, NotificationKind, Totals};
use common::search::{SearchScript, filter_by_search};
use common::store::codec::decode_record;
use common::store::memory::InMemoryStore;
use common::sync::{CollectionViewModel, SyncState};

const SET_A: &str = r#"{"record":{"sets":[{"title":"Set A","cards":[
    {"id":"1","name":"Alpha","image":"https://img/1.png","link":"https://cards/1","collected":false},
    {"id":"2","name":"Beta","image":"https://img/2.png","link":"https://cards/2","collected":true}
]}]}}"#;

fn set_a() -> Collection {
    decode_record(200, SET_A).expect("fixture parses")
}

#[tokio::test]
async fn load_toggle_filter_scenario() {
    let store = InMemoryStore::new(set_a());
    let mut vm = CollectionViewModel::new(SearchScript::Latin);

    vm.load(&store).await.expect("load accepted");
    assert_eq!(vm.totals(), Totals { collected: 1, total: 2 });

    vm.toggle_collected(&CardId::from("1"), true).expect("card exists");
    assert_eq!(vm.totals(), Totals { collected: 2, total: 2 });
    assert_eq!(store.fetch_calls.get(), 1);
    assert_eq!(store.save_calls.get(), 0);

    let sets = filter_by_search(vm.collection(), "alp");
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].title, "Set A");
    assert_eq!(sets[0].cards.len(), 2);
}

#[tokio::test]
async fn failed_fetch_leaves_initial_collection() {
    let store = InMemoryStore::new(set_a());
    store.fail_next_fetch(StoreError::Network("connection refused".into()));
    let mut vm = CollectionViewModel::default();

    let note = vm
        .load(&store)
        .await
        .expect("load accepted")
        .expect("error notification");

    assert_eq!(note.kind, NotificationKind::Error);
    assert!(note.message.contains("connection refused"));
    assert_eq!(vm.collection().as_ref(), &Collection::default());
    assert_eq!(vm.state(), SyncState::Idle);
}

#[tokio::test]
async fn save_adopts_normalized_echo() {
    fn reverse_sets(mut collection: Collection) -> Collection {
        collection.sets.reverse();
        collection
    }

    let mut two_sets = set_a();
    two_sets.sets.push(std::rc::Rc::new(common::model::CollectionSet::new(
        "Set B",
        vec![common::model::CollectionCard::new("3", "Gamma", false)],
    )));
    let store = InMemoryStore::new(two_sets).with_normalizer(reverse_sets);
    let mut vm = CollectionViewModel::new(SearchScript::Latin);
    vm.load(&store).await.expect("load accepted");

    let note = vm
        .save(&store)
        .await
        .expect("save accepted")
        .expect("success notification");

    assert_eq!(note.kind, NotificationKind::Success);
    let titles: Vec<_> = vm.collection().sets.iter().map(|s| s.title.clone()).collect();
    assert_eq!(titles, ["Set B", "Set A"]);
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let store = InMemoryStore::new(set_a());
    let mut vm = CollectionViewModel::new(SearchScript::Latin);
    vm.load(&store).await.expect("load accepted");
    vm.toggle_collected(&CardId::from("2"), false).expect("card exists");
    vm.save(&store).await.expect("save accepted");
    let saved = vm.collection().as_ref().clone();

    let mut fresh = CollectionViewModel::new(SearchScript::Latin);
    fresh.load(&store).await.expect("load accepted");
    assert_eq!(fresh.collection().as_ref(), &saved);
    assert_eq!(fresh.totals(), Totals { collected: 0, total: 2 });
}

#[tokio::test]
async fn failed_save_can_be_retried() {
    let store = InMemoryStore::new(set_a());
    let mut vm = CollectionViewModel::new(SearchScript::Latin);
    vm.load(&store).await.expect("load accepted");
    vm.toggle_collected(&CardId::from("1"), true).expect("card exists");

    store.fail_next_save(StoreError::Timeout { millis: 10_000 });
    let note = vm.save(&store).await.expect("save accepted").expect("notification");
    assert!(note.is_error());
    assert!(vm.has_unsaved_changes());

    let note = vm.save(&store).await.expect("save accepted").expect("notification");
    assert!(!note.is_error());
    assert_eq!(store.document().totals(), Totals { collected: 2, total: 2 });
}

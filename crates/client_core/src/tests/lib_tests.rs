use super::*;
use crate::{
    error::StoreOperation,
    test_support::{book, MemoryStore},
    view::TableView,
};
use shared::domain::BookRecord;

fn manager_with(store: &Arc<MemoryStore>) -> BookManager {
    BookManager::new(store.clone())
}

fn seeded_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_records([
        book("b1", "Emma", "Austen", 1815),
        book("b2", "Dune", "Herbert", 1965),
    ]))
}

#[tokio::test]
async fn mount_loads_snapshot_from_store() {
    let store = seeded_store();
    let mut manager = manager_with(&store);
    manager.mount().await;

    assert_eq!(manager.state().records, store.snapshot());
    assert_eq!(store.calls(), vec![StoreOperation::ListAll]);
}

#[tokio::test]
async fn create_then_reload_contains_record_and_clears_form() {
    let store = Arc::new(MemoryStore::default());
    let mut manager = manager_with(&store);
    manager.mount().await;
    store.clear_calls();

    manager.edit_field(FormField::Id, "b1").await;
    manager.edit_field(FormField::Title, "T").await;
    manager.submit().await;

    assert_eq!(
        store.calls(),
        vec![StoreOperation::Create, StoreOperation::ListAll]
    );
    assert!(manager.state().records.iter().any(|r| r.id == "b1"));
    assert!(manager.state().form.draft().is_empty());
    assert!(!manager.state().form.is_editing());
    assert_eq!(manager.state().status, Some(StatusMessage::BookAdded));
}

#[tokio::test]
async fn rejected_create_performs_no_remote_calls() {
    let store = Arc::new(MemoryStore::default());
    let mut manager = manager_with(&store);

    manager.edit_field(FormField::Title, "T").await;
    manager.submit().await;
    assert_eq!(
        manager.state().status,
        Some(StatusMessage::MissingRequiredFields)
    );

    manager.edit_field(FormField::Id, "b1").await;
    manager.edit_field(FormField::Title, "").await;
    manager.submit().await;

    assert!(store.calls().is_empty());
    assert_eq!(
        manager.state().status,
        Some(StatusMessage::MissingRequiredFields)
    );
}

#[tokio::test]
async fn edit_then_cancel_makes_no_remote_call() {
    let store = seeded_store();
    let mut manager = manager_with(&store);
    manager.mount().await;
    store.clear_calls();

    let emma = manager.state().records[0].clone();
    manager.select_for_edit(emma.clone()).await;
    assert_eq!(manager.state().form.draft().to_record(), emma);
    assert!(!manager.state().form.is_field_enabled(FormField::Id));

    manager.edit_field(FormField::Id, "zzz").await;
    assert_eq!(manager.state().form.draft().id, "b1");

    manager.cancel_edit().await;
    assert!(manager.state().form.draft().is_empty());
    assert!(!manager.state().form.is_editing());
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn update_changes_only_target_record() {
    let store = seeded_store();
    let mut manager = manager_with(&store);
    manager.mount().await;
    let before = manager.state().records.clone();

    manager.select_for_edit(before[0].clone()).await;
    manager.edit_field(FormField::Title, "Emma (annotated)").await;
    manager.edit_field(FormField::Year, "2012").await;
    manager.submit().await;

    let after = &manager.state().records;
    assert_eq!(after.len(), before.len());
    let updated = after.iter().find(|r| r.id == "b1").expect("b1");
    assert_eq!(updated.title, "Emma (annotated)");
    assert_eq!(updated.year, 2012);
    assert_eq!(updated.author, "Austen");
    assert_eq!(after.iter().find(|r| r.id == "b2"), before.get(1));
    assert!(!manager.state().form.is_editing());
    assert_eq!(manager.state().status, Some(StatusMessage::BookUpdated));
}

#[tokio::test]
async fn update_with_blank_title_is_sent_unvalidated() {
    let store = seeded_store();
    let mut manager = manager_with(&store);
    manager.mount().await;
    store.clear_calls();

    let emma = manager.state().records[0].clone();
    manager.select_for_edit(emma).await;
    manager.edit_field(FormField::Title, "").await;
    manager.submit().await;

    assert_eq!(
        store.calls(),
        vec![StoreOperation::Update, StoreOperation::ListAll]
    );
    let stored = store
        .snapshot()
        .into_iter()
        .find(|r| r.id == "b1")
        .expect("b1");
    assert_eq!(stored.title, "");
}

#[tokio::test]
async fn delete_then_reload_drops_record() {
    let store = seeded_store();
    let mut manager = manager_with(&store);
    manager.mount().await;

    manager.delete("b1").await;

    assert!(manager.state().records.iter().all(|r| r.id != "b1"));
    assert_eq!(manager.state().records.len(), 1);
    assert_eq!(manager.state().status, Some(StatusMessage::BookDeleted));
}

#[tokio::test]
async fn missing_lookup_matches_failed_lookup() {
    let store = seeded_store();
    let mut absent = manager_with(&store);
    absent.fetch("missing").await;

    let failing_store = seeded_store();
    failing_store.fail(StoreOperation::GetById);
    let mut failed = manager_with(&failing_store);
    failed.fetch("missing").await;

    assert_eq!(absent.state(), failed.state());
    assert_eq!(absent.view(), failed.view());
    assert!(absent.view().search.is_none());
    assert_eq!(
        absent.view().banner.map(|b| b.text),
        Some("No book found with this ID!")
    );
}

#[tokio::test]
async fn found_lookup_fills_search_panel() {
    let store = seeded_store();
    let mut manager = manager_with(&store);
    manager.fetch("b2").await;

    let panel = manager.view().search.expect("panel");
    assert_eq!(panel.lines[1], ("Title", "Dune".to_string()));
    assert!(manager.view().banner.is_none());
}

#[tokio::test]
async fn repeated_listing_is_stable() {
    let store = seeded_store();
    let first = store.list_all().await.expect("first");
    let second = store.list_all().await.expect("second");
    assert_eq!(first, second);

    let mut manager = manager_with(&store);
    manager.mount().await;
    let snapshot = manager.state().records.clone();
    manager.mount().await;
    assert_eq!(manager.state().records, snapshot);
}

#[tokio::test]
async fn failed_mutation_keeps_form_and_skips_reload() {
    let store = Arc::new(MemoryStore::default());
    store.fail(StoreOperation::Create);
    let mut manager = manager_with(&store);

    manager.edit_field(FormField::Id, "b1").await;
    manager.edit_field(FormField::Title, "T").await;
    manager.submit().await;

    assert_eq!(store.calls(), vec![StoreOperation::Create]);
    assert_eq!(manager.state().status, None);
    assert_eq!(manager.state().form.draft().id, "b1");
    assert_eq!(manager.state().form.draft().title, "T");

    store.recover(StoreOperation::Create);
    manager.submit().await;
    assert_eq!(manager.state().records, vec![BookRecord::new("b1", "T")]);
}

#[tokio::test]
async fn failed_reload_keeps_stale_list() {
    let store = seeded_store();
    let mut manager = manager_with(&store);
    manager.mount().await;
    let before = manager.state().records.clone();

    store.fail(StoreOperation::ListAll);
    manager.delete("b1").await;

    // The deletion landed, but the view keeps its last good snapshot.
    assert_eq!(store.snapshot().len(), 1);
    assert_eq!(manager.state().records, before);
    assert_eq!(manager.state().status, Some(StatusMessage::BookDeleted));
}

/// Two deletes issued before either completes: both reach the store, and the
/// view settles on the store's final state.
async fn run_overlapping_deletes(store: Arc<MemoryStore>) -> ViewState {
    let mut state = ViewState::default();
    let effect = state.apply(Action::Mount).expect("mount effect");
    let loaded = execute(&*store, effect).await;
    state.apply(loaded);

    state.apply(Action::SelectForEdit(book("b2", "Dune", "Herbert", 1965)));
    let draft_before = state.form.clone();

    let first = state.apply(Action::Delete("b1".into())).expect("first delete");
    let second = state.apply(Action::Delete("b1".into())).expect("second delete");
    let (first_done, second_done) = tokio::join!(
        execute(&*store, first),
        execute(&*store, second)
    );

    let mut pending = Vec::new();
    pending.extend(state.apply(first_done));
    pending.extend(state.apply(second_done));
    for effect in pending {
        let completion = execute(&*store, effect).await;
        assert_eq!(state.apply(completion), None);
    }

    assert_eq!(state.form, draft_before);
    state
}

#[tokio::test]
async fn overlapping_deletes_settle_on_final_state() {
    let store = seeded_store();
    let state = run_overlapping_deletes(store.clone()).await;

    assert_eq!(state.records, store.snapshot());
    assert!(state.records.iter().all(|r| r.id != "b1"));
    assert_eq!(state.status, Some(StatusMessage::BookDeleted));
    assert_eq!(
        store
            .calls()
            .iter()
            .filter(|op| **op == StoreOperation::Delete)
            .count(),
        2
    );
}

#[tokio::test]
async fn overlapping_deletes_tolerate_rejected_duplicate() {
    let store = Arc::new(
        MemoryStore::with_records([
            book("b1", "Emma", "Austen", 1815),
            book("b2", "Dune", "Herbert", 1965),
        ])
        .rejecting_unknown_delete(),
    );
    let state = run_overlapping_deletes(store.clone()).await;

    assert_eq!(state.records, store.snapshot());
    assert!(state.records.iter().all(|r| r.id != "b1"));
    // Only the successful delete triggered a reload.
    assert_eq!(
        store
            .calls()
            .iter()
            .filter(|op| **op == StoreOperation::ListAll)
            .count(),
        2
    );
}

#[tokio::test]
async fn view_reflects_empty_store() {
    let store = Arc::new(MemoryStore::default());
    let mut manager = manager_with(&store);
    manager.mount().await;
    assert!(matches!(manager.view().table, TableView::Empty { .. }));
}

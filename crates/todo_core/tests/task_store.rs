use std::cell::RefCell;
use std::time::{Duration, Instant};
use todo_core::{
    KeyValueStore, MemoryKeyValueStore, NoopNotifier, Notifier, StorageError, StorageResult,
    TaskCategory, TaskNotification, TaskStore, Toast, TodoConfig,
};

#[derive(Default)]
struct RecordingNotifier {
    events: RefCell<Vec<TaskNotification>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: &Toast) {
        self.events.borrow_mut().push(toast.event);
    }
}

struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }
}

fn empty_store(kv: &MemoryKeyValueStore) -> TaskStore<&MemoryKeyValueStore, NoopNotifier> {
    TaskStore::load(kv, NoopNotifier, &TodoConfig::default())
}

#[test]
fn add_prepends_open_task() {
    let kv = MemoryKeyValueStore::new();
    let mut store = empty_store(&kv);

    store.add("first", TaskCategory::Normal).unwrap();
    let second = store.add("  second  ", TaskCategory::Fun).unwrap();

    assert_eq!(store.total_count(), 2);
    let head = &store.tasks()[0];
    assert_eq!(head.id, second);
    assert_eq!(head.text, "second");
    assert!(!head.completed);
    assert_eq!(head.category, TaskCategory::Fun);
    assert_ne!(store.tasks()[0].id, store.tasks()[1].id);
}

#[test]
fn blank_text_leaves_list_unchanged() {
    let kv = MemoryKeyValueStore::new();
    let notifier = RecordingNotifier::default();
    let mut store = TaskStore::load(&kv, &notifier, &TodoConfig::default());

    assert_eq!(store.add("", TaskCategory::Normal), None);
    assert_eq!(store.add("   ", TaskCategory::Priority), None);

    assert!(store.is_empty());
    assert!(notifier.events.borrow().is_empty());
}

#[test]
fn toggle_twice_restores_state_and_length() {
    let kv = MemoryKeyValueStore::new();
    let mut store = empty_store(&kv);
    let id = store.add("stretch", TaskCategory::Normal).unwrap();

    let first = store.toggle(&id).unwrap();
    assert!(first.completed);
    assert!(first.celebration.is_some());

    let second = store.toggle(&id).unwrap();
    assert!(!second.completed);
    assert_eq!(second.celebration, None);

    assert_eq!(store.total_count(), 1);
    assert!(!store.get(&id).unwrap().completed);
}

#[test]
fn remove_twice_is_idempotent() {
    let kv = MemoryKeyValueStore::new();
    let notifier = RecordingNotifier::default();
    let mut store = TaskStore::load(&kv, &notifier, &TodoConfig::default());
    let keep = store.add("keep", TaskCategory::Normal).unwrap();
    let drop = store.add("drop", TaskCategory::Normal).unwrap();

    assert_eq!(store.remove(&drop).unwrap().text, "drop");
    assert_eq!(store.remove(&drop), None);

    assert_eq!(store.total_count(), 1);
    assert!(store.contains(&keep));
    let removed_toasts = notifier
        .events
        .borrow()
        .iter()
        .filter(|event| **event == TaskNotification::TaskRemoved)
        .count();
    assert_eq!(removed_toasts, 1);
}

#[test]
fn completed_count_never_exceeds_total() {
    let kv = MemoryKeyValueStore::new();
    let mut store = empty_store(&kv);
    let mut ids = Vec::new();
    for text in ["a", "b", "c", "d"] {
        ids.push(store.add(text, TaskCategory::Normal).unwrap());
        assert!(store.completed_count() <= store.total_count());
    }
    for id in ids.iter().step_by(2) {
        store.toggle(id);
        assert!(store.completed_count() <= store.total_count());
    }
    store.remove(&ids[0]);
    assert_eq!(store.completed_count(), 1);
    assert_eq!(store.total_count(), 3);
}

#[test]
fn buy_milk_scenario() {
    let kv = MemoryKeyValueStore::new();
    let notifier = RecordingNotifier::default();
    let mut store = TaskStore::load(&kv, &notifier, &TodoConfig::default());
    let start = Instant::now();

    let id = store.add("Buy milk", TaskCategory::Normal).unwrap();
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].text, "Buy milk");
    assert!(!store.tasks()[0].completed);
    assert_eq!(store.tasks()[0].category, TaskCategory::Normal);
    assert!(!store.all_complete());

    let outcome = store.toggle_at(&id, start).unwrap();
    let marker = outcome.celebration.expect("completion should celebrate");
    assert_eq!(store.active_celebrations(start), vec![marker]);
    assert_eq!(store.total_count(), 1);
    assert_eq!(store.completed_count(), 1);
    assert!(store.all_complete());

    let expired_at = start + Duration::from_millis(2000);
    assert!(store.active_celebrations(expired_at).is_empty());
    assert_eq!(store.sweep_celebrations(expired_at), 1);

    store.remove(&id).unwrap();
    assert!(store.is_empty());
    assert!(!store.all_complete());

    assert_eq!(
        *notifier.events.borrow(),
        vec![
            TaskNotification::TaskAdded,
            TaskNotification::TaskCompleted,
            TaskNotification::TaskRemoved,
        ]
    );
}

#[test]
fn markers_expire_independently_of_later_toggles() {
    let kv = MemoryKeyValueStore::new();
    let mut store = empty_store(&kv);
    let start = Instant::now();
    let first = store.add("one", TaskCategory::Normal).unwrap();
    let second = store.add("two", TaskCategory::Normal).unwrap();

    store.toggle_at(&first, start).unwrap();
    store.toggle_at(&second, start + Duration::from_millis(1000)).unwrap();
    store.toggle_at(&first, start + Duration::from_millis(1500)).unwrap();

    assert_eq!(store.active_celebrations(start + Duration::from_millis(1999)).len(), 2);
    assert_eq!(store.active_celebrations(start + Duration::from_millis(2500)).len(), 1);
    assert!(store
        .active_celebrations(start + Duration::from_millis(3000))
        .is_empty());
}

#[test]
fn held_markers_stay_bounded_across_spaced_toggles() {
    let kv = MemoryKeyValueStore::new();
    let mut store = empty_store(&kv);
    let id = store.add("daily walk", TaskCategory::Normal).unwrap();
    let start = Instant::now();

    for step in 0..1000u64 {
        store.toggle_at(&id, start + Duration::from_secs(10 * step));
        assert!(store.celebrations().len() <= 1);
    }
    assert!(store
        .active_celebrations(start + Duration::from_secs(10_000))
        .is_empty());
}

#[test]
fn oversized_celebration_ttl_does_not_panic() {
    let kv = MemoryKeyValueStore::new();
    let config = TodoConfig::default().with_celebration_ttl(Duration::MAX);
    let mut store = TaskStore::load(&kv, NoopNotifier, &config);
    let id = store.add("forever", TaskCategory::Fun).unwrap();

    let outcome = store.toggle(&id).unwrap();
    assert!(outcome.celebration.is_some());
    assert_eq!(store.active_celebrations(Instant::now()).len(), 1);
}

#[test]
fn every_mutation_is_mirrored_and_reloads_identically() {
    let kv = MemoryKeyValueStore::new();
    let expected = {
        let mut store = empty_store(&kv);
        let a = store.add("water plants", TaskCategory::Priority).unwrap();
        store.add("bake", TaskCategory::Fun).unwrap();
        let c = store.add("email", TaskCategory::Normal).unwrap();
        store.toggle(&a);
        store.remove(&c);
        store.tasks().to_vec()
    };

    let reloaded = empty_store(&kv);
    assert_eq!(reloaded.tasks(), expected.as_slice());
}

#[test]
fn corrupt_slot_loads_as_empty_and_is_overwritten_on_next_mutation() {
    let kv = MemoryKeyValueStore::new();
    kv.set("todo-tasks", "{{ definitely not json").unwrap();

    let mut store = empty_store(&kv);
    assert!(store.is_empty());
    assert_eq!(
        kv.get("todo-tasks").unwrap().as_deref(),
        Some("{{ definitely not json")
    );

    store.add("fresh start", TaskCategory::Normal).unwrap();
    let reloaded = empty_store(&kv);
    assert_eq!(reloaded.total_count(), 1);
}

#[test]
fn legacy_timestamp_ids_load() {
    let kv = MemoryKeyValueStore::new();
    kv.set(
        "todo-tasks",
        r#"[{"id":"1718000000001","text":"Call mum","completed":true,"category":"priority"},
            {"id":"1718000000000","text":"Buy milk","completed":false,"category":"normal"}]"#,
    )
    .unwrap();

    let mut store = empty_store(&kv);
    assert_eq!(store.total_count(), 2);
    assert_eq!(store.completed_count(), 1);
    assert!(store.toggle("1718000000000").unwrap().completed);
    assert!(store.all_complete());
}

#[test]
fn storage_failures_are_absorbed() {
    let mut store = TaskStore::load(BrokenStore, NoopNotifier, &TodoConfig::default());
    assert!(store.is_empty());

    let id = store.add("still works", TaskCategory::Normal).unwrap();
    assert!(store.toggle(&id).unwrap().completed);
    assert_eq!(store.completed_count(), 1);
    assert!(store.remove(&id).is_some());
}

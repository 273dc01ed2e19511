use spinit_core::store::{load, TASKS_KEY};
use spinit_core::{MemoryKvStore, Priority, Task, TaskDraft, TaskPatch, TaskRepository};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::rc::Rc;
use uuid::Uuid;

fn setup() -> (Rc<MemoryKvStore>, TaskRepository<MemoryKvStore>) {
    let store = Rc::new(MemoryKvStore::new());
    let repo = TaskRepository::load(Rc::clone(&store));
    (store, repo)
}

fn persisted(store: &MemoryKvStore) -> Vec<Task> {
    load(store, TASKS_KEY, Vec::new())
}

#[test]
fn new_tasks_get_unique_ids_and_are_prepended() {
    let (_store, mut repo) = setup();
    let mut ids = HashSet::new();
    for idx in 0..200 {
        let id = repo.add_task(TaskDraft::new(format!("task {idx}"))).unwrap();
        assert!(ids.insert(id), "duplicate id {id}");
    }

    assert_eq!(repo.len(), 200);
    assert_eq!(repo.tasks()[0].title, "task 199");
    assert_eq!(repo.tasks()[199].title, "task 0");
}

#[test]
fn memory_and_store_match_after_every_mutation() {
    let (store, mut repo) = setup();

    let first = repo
        .add_task(
            TaskDraft::new("Buy milk")
                .with_label("errand")
                .with_date(NaiveDate::from_ymd_opt(2026, 10, 17)),
        )
        .unwrap();
    assert_eq!(persisted(&store), repo.tasks());

    let second = repo
        .add_task(TaskDraft::new("Plan trip").with_priority(Priority::High))
        .unwrap();
    assert_eq!(persisted(&store), repo.tasks());

    repo.update_task(first, &TaskPatch::done(true)).unwrap();
    assert_eq!(persisted(&store), repo.tasks());

    repo.delete_task(second).unwrap();
    assert_eq!(persisted(&store), repo.tasks());
    assert_eq!(repo.len(), 1);
}

#[test]
fn reload_round_trips_every_field() {
    let (store, mut repo) = setup();
    let id = repo
        .add_task(
            TaskDraft::new("Dentist")
                .with_label("health")
                .with_priority(Priority::Low)
                .with_date(NaiveDate::from_ymd_opt(2027, 2, 28)),
        )
        .unwrap();
    repo.update_task(id, &TaskPatch::done(true)).unwrap();

    let reloaded = TaskRepository::load(Rc::clone(&store));
    assert_eq!(reloaded.tasks(), repo.tasks());
}

#[test]
fn update_merges_only_patched_fields() {
    let (_store, mut repo) = setup();
    let id = repo
        .add_task(TaskDraft::new("Draft essay").with_label("school"))
        .unwrap();

    let patch = TaskPatch {
        priority: Some(Priority::High),
        ..TaskPatch::default()
    };
    assert!(repo.update_task(id, &patch).unwrap());

    let task = repo.get(id).unwrap();
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.label, "school");
    assert_eq!(task.title, "Draft essay");
    assert!(!task.done);
}

#[test]
fn missing_ids_are_silent_noops() {
    let (store, mut repo) = setup();
    repo.add_task(TaskDraft::new("keep me")).unwrap();
    let before = repo.tasks().to_vec();
    let blob_before = store.raw_entries();

    let unknown = Uuid::new_v4();
    assert!(!repo.delete_task(unknown).unwrap());
    assert!(!repo.update_task(unknown, &TaskPatch::done(true)).unwrap());

    assert_eq!(repo.tasks(), before.as_slice());
    assert_eq!(store.raw_entries(), blob_before);
}

//! Task repository backed by the `spinit_tasks` blob.
//!
//! # Invariants
//! - New tasks are prepended, so the collection is newest-first.
//! - No two stored tasks share an id.

use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch};
use crate::store::{load, save, KvStore, StoreResult, TASKS_KEY};
use chrono::Utc;
use log::{debug, info};
use std::rc::Rc;
use uuid::Uuid;

/// Ordered task collection persisted through a shared store.
pub struct TaskRepository<S: KvStore> {
    store: Rc<S>,
    tasks: Vec<Task>,
}

impl<S: KvStore> TaskRepository<S> {
    /// Loads the persisted task list, falling back to empty.
    pub fn load(store: Rc<S>) -> Self {
        let tasks: Vec<Task> = load(store.as_ref(), TASKS_KEY, Vec::new());
        debug!(
            "event=repo_load module=task_repo status=ok count={}",
            tasks.len()
        );
        Self { store, tasks }
    }

    /// Tasks in display order (newest first).
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Creates a task with a fresh id and timestamp, prepends it and persists.
    pub fn add_task(&mut self, draft: TaskDraft) -> StoreResult<TaskId> {
        let mut id = Uuid::new_v4();
        while self.get(id).is_some() {
            id = Uuid::new_v4();
        }

        self.tasks.insert(0, Task::from_draft(id, Utc::now(), draft));
        self.persist()?;
        info!("event=task_add module=task_repo status=ok task_id={id}");
        Ok(id)
    }

    /// Shallow-merges `patch` into the matching task.
    ///
    /// Returns `false` without touching storage when `id` is unknown.
    pub fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> StoreResult<bool> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_update module=task_repo status=skipped task_id={id}");
            return Ok(false);
        };

        task.apply(patch);
        self.persist()?;
        info!("event=task_update module=task_repo status=ok task_id={id}");
        Ok(true)
    }

    /// Removes the matching task. Returns `false` when `id` is unknown.
    pub fn delete_task(&mut self, id: TaskId) -> StoreResult<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            debug!("event=task_delete module=task_repo status=skipped task_id={id}");
            return Ok(false);
        }

        self.persist()?;
        info!("event=task_delete module=task_repo status=ok task_id={id}");
        Ok(true)
    }

    fn persist(&self) -> StoreResult<()> {
        save(self.store.as_ref(), TASKS_KEY, &self.tasks)
    }
}

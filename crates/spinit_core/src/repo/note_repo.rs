//! Note repository backed by the `spinit_notes` blob.
//!
//! Notes are append-only from the user's perspective: create or delete,
//! never edited in place.

use crate::model::note::{Note, NoteDraft, NoteId};
use crate::store::{load, save, KvStore, StoreResult, NOTES_KEY};
use chrono::Utc;
use log::{debug, info};
use std::rc::Rc;
use uuid::Uuid;

/// Ordered note collection persisted through a shared store.
pub struct NoteRepository<S: KvStore> {
    store: Rc<S>,
    notes: Vec<Note>,
}

impl<S: KvStore> NoteRepository<S> {
    /// Loads the persisted note list, falling back to empty.
    pub fn load(store: Rc<S>) -> Self {
        let notes: Vec<Note> = load(store.as_ref(), NOTES_KEY, Vec::new());
        debug!(
            "event=repo_load module=note_repo status=ok count={}",
            notes.len()
        );
        Self { store, notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Prepends a new note and persists.
    pub fn add_note(&mut self, draft: NoteDraft) -> StoreResult<NoteId> {
        let mut id = Uuid::new_v4();
        while self.get(id).is_some() {
            id = Uuid::new_v4();
        }

        self.notes.insert(
            0,
            Note {
                id,
                title: draft.title,
                content: draft.content,
                tags: draft.tags,
                created: Utc::now(),
            },
        );
        self.persist()?;
        info!("event=note_add module=note_repo status=ok note_id={id}");
        Ok(id)
    }

    /// Removes the matching note. Returns `false` when `id` is unknown.
    pub fn delete_note(&mut self, id: NoteId) -> StoreResult<bool> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            debug!("event=note_delete module=note_repo status=skipped note_id={id}");
            return Ok(false);
        }

        self.persist()?;
        info!("event=note_delete module=note_repo status=ok note_id={id}");
        Ok(true)
    }

    fn persist(&self) -> StoreResult<()> {
        save(self.store.as_ref(), NOTES_KEY, &self.notes)
    }
}

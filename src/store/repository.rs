//! Repository interfaces over the JSON store.
//!
//! Command logic never touches store keys directly; these repositories
//! expose get-by-date/append/update-by-id/delete-by-id operations so the
//! storage backend could be swapped without touching the callers.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::planner::{date_key, FocusSession, Note, Task};

use super::{JsonStore, StoreError, KEY_FOCUS_HISTORY, KEY_NOTES, KEY_TASKS_BY_DATE};

// ============================================================================
// TaskRepository
// ============================================================================

/// Per-date task collection.
pub struct TaskRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> TaskRepository<'a> {
    /// Creates a repository over the given store.
    pub fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Returns the whole collection, keyed by date string.
    pub fn all(&self) -> BTreeMap<String, Vec<Task>> {
        self.store.get(KEY_TASKS_BY_DATE).unwrap_or_default()
    }

    /// Returns the tasks planned for one date, in stored order.
    pub fn list_by_date(&self, date: NaiveDate) -> Vec<Task> {
        self.all().remove(&date_key(date)).unwrap_or_default()
    }

    /// Appends a task under its date.
    pub fn append(&self, date: NaiveDate, task: Task) -> Result<(), StoreError> {
        let mut all = self.all();
        all.entry(date_key(date)).or_default().push(task);
        self.store.set(KEY_TASKS_BY_DATE, &all)
    }

    /// Toggles the completion flag of the task with the given id.
    ///
    /// Returns the new completion state, or `None` if no task with that id
    /// exists on that date.
    pub fn toggle_completed(
        &self,
        date: NaiveDate,
        id: Uuid,
    ) -> Result<Option<bool>, StoreError> {
        let mut all = self.all();
        let key = date_key(date);
        let Some(tasks) = all.get_mut(&key) else {
            return Ok(None);
        };
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.completed = !task.completed;
        let completed = task.completed;
        self.store.set(KEY_TASKS_BY_DATE, &all)?;
        Ok(Some(completed))
    }

    /// Deletes the task with the given id. Unknown ids are a no-op.
    ///
    /// Returns true if a task was removed.
    pub fn delete(&self, date: NaiveDate, id: Uuid) -> Result<bool, StoreError> {
        let mut all = self.all();
        let key = date_key(date);
        let Some(tasks) = all.get_mut(&key) else {
            return Ok(false);
        };
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Ok(false);
        }
        if tasks.is_empty() {
            all.remove(&key);
        }
        self.store.set(KEY_TASKS_BY_DATE, &all)?;
        Ok(true)
    }
}

// ============================================================================
// NoteRepository
// ============================================================================

/// Flat note collection.
pub struct NoteRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> NoteRepository<'a> {
    /// Creates a repository over the given store.
    pub fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Returns all notes in stored order.
    pub fn all(&self) -> Vec<Note> {
        self.store.get(KEY_NOTES).unwrap_or_default()
    }

    /// Appends a note.
    pub fn append(&self, note: Note) -> Result<(), StoreError> {
        let mut notes = self.all();
        notes.push(note);
        self.store.set(KEY_NOTES, &notes)
    }

    /// Replaces the content of the note with the given id.
    ///
    /// Returns true if a note was updated; unknown ids are a no-op.
    pub fn update_content(&self, id: Uuid, content: &str) -> Result<bool, StoreError> {
        let mut notes = self.all();
        let Some(note) = notes.iter_mut().find(|n| n.id == id) else {
            return Ok(false);
        };
        note.edit(content);
        self.store.set(KEY_NOTES, &notes)?;
        Ok(true)
    }

    /// Deletes the note with the given id. Unknown ids are a no-op.
    pub fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut notes = self.all();
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Ok(false);
        }
        self.store.set(KEY_NOTES, &notes)?;
        Ok(true)
    }
}

// ============================================================================
// SessionLog
// ============================================================================

/// Append-only log of completed focus sessions.
///
/// No update or delete is exposed; the collection only grows.
pub struct SessionLog<'a> {
    store: &'a JsonStore,
}

impl<'a> SessionLog<'a> {
    /// Creates a log over the given store.
    pub fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Returns every recorded session in append order.
    pub fn all(&self) -> Vec<FocusSession> {
        self.store.get(KEY_FOCUS_HISTORY).unwrap_or_default()
    }

    /// Appends a session record.
    pub fn append(&self, session: FocusSession) -> Result<(), StoreError> {
        let mut sessions = self.all();
        sessions.push(session);
        self.store.set(KEY_FOCUS_HISTORY, &sessions)
    }

    /// Records a newly completed focus interval for the given date.
    pub fn record(&self, duration_seconds: u32, date: NaiveDate) -> Result<(), StoreError> {
        self.append(FocusSession::new(duration_seconds, date))
    }
}

// ============================================================================
// Tests
// ============================================================================

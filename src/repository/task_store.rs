//! Task Store
//!
//! Team tasks plus the per-day note map. Tasks and notes live in separate
//! storage documents and flush independently.

use std::collections::BTreeMap;

use crate::domain::{CalendarDate, Task, TaskDraft, TaskOwner, TaskPatch};

use super::collection;
use super::traits::{CollectionPort, StorageResult};

pub const TASKS_KEY: &str = "tasks";
pub const NOTES_KEY: &str = "daily_notes";

/// Date -> free text; last write wins
pub type NoteMap = BTreeMap<CalendarDate, String>;

pub struct TaskStore {
    tasks: Vec<Task>,
    port: Box<dyn CollectionPort<Vec<Task>>>,
    default_owner: TaskOwner,
    pub notes: NotesStore,
}

impl TaskStore {
    pub fn open(
        port: Box<dyn CollectionPort<Vec<Task>>>,
        notes: NotesStore,
        default_owner: TaskOwner,
        seed: impl FnOnce() -> Vec<Task>,
    ) -> StorageResult<Self> {
        let tasks = match port.load()? {
            Some(tasks) => {
                log::info!("Loaded {} tasks", tasks.len());
                tasks
            }
            None => {
                let tasks = seed();
                log::info!("No stored tasks, starting from {} seed tasks", tasks.len());
                port.save(&tasks)?;
                tasks
            }
        };
        Ok(Self {
            tasks,
            port,
            default_owner,
            notes,
        })
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        collection::find(&self.tasks, id)
    }

    pub fn for_date(&self, date: CalendarDate) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.date == date).collect()
    }

    /// Add an open task owned by the default owner
    pub fn create(&mut self, draft: TaskDraft) -> StorageResult<String> {
        let task = Task::from_draft(draft, self.default_owner);
        let id = task.id.clone();
        log::debug!("Creating task {} on {}", id, task.date);
        self.tasks.push(task);
        self.flush()?;
        Ok(id)
    }

    pub fn update(&mut self, id: &str, patch: TaskPatch) -> StorageResult<bool> {
        let Some(task) = collection::find_mut(&mut self.tasks, id) else {
            log::debug!("Update of unknown task {} ignored", id);
            return Ok(false);
        };
        task.apply(patch);
        self.flush()?;
        Ok(true)
    }

    /// Flip completion; returns the new state, `None` for an unknown id
    pub fn toggle(&mut self, id: &str) -> StorageResult<Option<bool>> {
        let Some(task) = collection::find_mut(&mut self.tasks, id) else {
            return Ok(None);
        };
        task.completed = !task.completed;
        let completed = task.completed;
        self.flush()?;
        Ok(Some(completed))
    }

    /// Remove a task. Callers confirm with the user first.
    pub fn delete(&mut self, id: &str) -> StorageResult<bool> {
        if !collection::remove(&mut self.tasks, id) {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    fn flush(&self) -> StorageResult<()> {
        self.port.save(&self.tasks)
    }
}

/// Per-day free-text notes
pub struct NotesStore {
    notes: NoteMap,
    port: Box<dyn CollectionPort<NoteMap>>,
}

impl NotesStore {
    /// Rehydrate; absent or malformed storage starts empty
    pub fn open(port: Box<dyn CollectionPort<NoteMap>>) -> StorageResult<Self> {
        let notes = port.load()?.unwrap_or_default();
        Ok(Self { notes, port })
    }

    /// Note content, empty when none was written
    pub fn get(&self, date: CalendarDate) -> &str {
        self.notes.get(&date).map(String::as_str).unwrap_or("")
    }

    /// Overwrite the note of `date`; an empty string clears it
    pub fn set(&mut self, date: CalendarDate, content: String) -> StorageResult<()> {
        self.notes.insert(date, content);
        self.port.save(&self.notes)
    }

    /// Whether the day has non-blank content
    pub fn has_note(&self, date: CalendarDate) -> bool {
        !self.get(date).trim().is_empty()
    }

    pub fn all(&self) -> &NoteMap {
        &self.notes
    }
}

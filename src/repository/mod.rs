//! Repository Layer
//!
//! Persistence ports, their implementations, and the two session stores.

mod collection;
mod db;
mod lead_store;
mod memory;
mod task_store;
mod traits;


pub use db::SqliteStore;
pub use lead_store::{LeadStore, LEADS_KEY};
pub use memory::MemoryStore;
pub use task_store::{NoteMap, NotesStore, TaskStore, NOTES_KEY, TASKS_KEY};
pub use traits::{CollectionPort, Ephemeral, JsonSlot, KeyValueStore, StorageError, StorageResult};

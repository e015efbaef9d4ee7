//! Domain Layer
//!
//! Contains all domain entities and core rules.
//! This layer has no storage or async dependencies.

mod date;
mod entity;
mod lead;
pub mod pipeline;
mod seed;
mod task;

pub use date::{CalendarDate, WEEKDAY_SHORT};
pub use entity::{new_id, DomainError, DomainResult, Entity};
pub use lead::{Lead, LeadDraft, LeadPatch};
pub use pipeline::{LeadStatus, Outcome, ALL_STATUSES, SEQUENCE};
pub use seed::{seed_leads, seed_tasks};
pub use task::{Task, TaskDraft, TaskOwner, TaskPatch, TaskType, OWNERS};

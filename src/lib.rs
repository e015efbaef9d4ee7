//! CRM Desk Core
//!
//! Layered architecture:
//! - domain: entities, dates and pipeline rules
//! - calendar / metrics / views: bucketing, aggregation and view models
//! - repository: persistence ports and the lead/task stores
//! - commands: async handlers the UI shell calls with raw form values

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

pub mod calendar;
pub mod commands;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod repository;
pub mod views;

use config::AppConfig;
use domain::{seed_leads, seed_tasks, CalendarDate, Lead, Task};
use repository::{
    CollectionPort, Ephemeral, JsonSlot, KeyValueStore, LeadStore, NoteMap, NotesStore, SqliteStore,
    StorageError, StorageResult, TaskStore, LEADS_KEY, NOTES_KEY, TASKS_KEY,
};

#[derive(Debug, Error)]
pub enum InitError {
    #[error("Logger error: {0}")]
    Logger(#[from] rolling_logger::LoggerError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Application state shared across commands
pub struct AppState {
    pub leads: Mutex<LeadStore>,
    pub tasks: Mutex<TaskStore>,
    pub config: AppConfig,
    fixed_today: Option<CalendarDate>,
}

impl AppState {
    /// Open the SQLite database named by `config`
    pub fn open(config: AppConfig) -> StorageResult<Self> {
        let store = Arc::new(SqliteStore::open(&config.db_path())?);
        Self::with_store(store, config, None)
    }

    /// Build the stores over any key-value backend. `today` pins the clock
    /// (seed dates and "today" markers); `None` uses the local date.
    pub fn with_store(
        store: Arc<dyn KeyValueStore>,
        config: AppConfig,
        today: Option<CalendarDate>,
    ) -> StorageResult<Self> {
        let seed_day = today.unwrap_or_else(CalendarDate::today);

        let leads = LeadStore::open(Box::new(JsonSlot::<Vec<Lead>>::new(store.clone(), LEADS_KEY)), || {
            seed_leads(seed_day)
        })?;

        let task_port: Box<dyn CollectionPort<Vec<Task>>> = if config.persist_tasks {
            Box::new(JsonSlot::<Vec<Task>>::new(store.clone(), TASKS_KEY))
        } else {
            Box::new(Ephemeral)
        };
        let notes = NotesStore::open(Box::new(JsonSlot::<NoteMap>::new(store, NOTES_KEY)))?;
        let tasks = TaskStore::open(task_port, notes, config.default_owner, || {
            seed_tasks(seed_day)
        })?;

        Ok(Self {
            leads: Mutex::new(leads),
            tasks: Mutex::new(tasks),
            config,
            fixed_today: today,
        })
    }

    pub fn today(&self) -> CalendarDate {
        self.fixed_today.unwrap_or_else(CalendarDate::today)
    }
}

/// Start logging and open the stores
pub fn init(config: AppConfig) -> Result<AppState, InitError> {
    match rolling_logger::init_logger(config.log_dir(), &config.app_name) {
        Ok(()) | Err(rolling_logger::LoggerError::AlreadyInitialized) => {}
        Err(e) => return Err(e.into()),
    }

    log::info!("Opening database at {}", config.db_path().display());
    let state = AppState::open(config)?;
    let _ = rolling_logger::info("App state ready");
    Ok(state)
}

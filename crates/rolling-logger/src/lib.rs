//! Rolling Logger
//!
//! File logger with a circular buffer of recent lines.
//! Lines land in a daily file (`<app>-YYYY-MM-DD.log`) that follows the local
//! date; once the file holds twice the buffer capacity it is rewritten from
//! the buffer, so its size stays bounded. `log` records are bridged into the
//! same subscriber.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use chrono::NaiveDate;
use thiserror::Error;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::MakeWriter;

/// Lines kept in memory (and, after compaction, on disk)
pub const DEFAULT_CAPACITY: usize = 2000;

static LOGGER: OnceLock<RollingFile> = OnceLock::new();

/// Logger errors
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Log file error: {0}")]
    Io(#[from] io::Error),

    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Logger not initialized")]
    NotInitialized,

    #[error("Subscriber error: {0}")]
    Subscriber(String),
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn file_for(dir: &Path, app_name: &str, day: NaiveDate) -> PathBuf {
    dir.join(format!("{}-{}.log", app_name, day.format("%Y-%m-%d")))
}

struct Inner {
    dir: PathBuf,
    app_name: String,
    day: NaiveDate,
    path: PathBuf,
    lines: VecDeque<String>,
    capacity: usize,
    pending: String,
    file_lines: usize,
}

impl Inner {
    fn append(&mut self, line: String, today: NaiveDate) -> io::Result<()> {
        if today != self.day {
            self.roll_over(today);
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", line)?;
        push_bounded(&mut self.lines, self.capacity, line);
        self.file_lines += 1;

        if self.file_lines > self.capacity * 2 {
            self.rewrite()?;
        }
        Ok(())
    }

    /// Switch to the file of `day`; the buffer restarts with it
    fn roll_over(&mut self, day: NaiveDate) {
        self.day = day;
        self.path = file_for(&self.dir, &self.app_name, day);
        self.lines.clear();
        self.file_lines = 0;
    }

    fn rewrite(&mut self) -> io::Result<()> {
        let mut file = File::create(&self.path)?;
        for line in &self.lines {
            writeln!(file, "{}", line)?;
        }
        self.file_lines = self.lines.len();
        Ok(())
    }
}

fn push_bounded(lines: &mut VecDeque<String>, capacity: usize, line: String) {
    if lines.len() == capacity {
        lines.pop_front();
    }
    lines.push_back(line);
}

/// A log file backed by a circular line buffer
#[derive(Clone)]
pub struct RollingFile {
    inner: Arc<Mutex<Inner>>,
}

impl RollingFile {
    /// Open (or resume) today's log file for `app_name` under `dir`
    pub fn open(dir: &Path, app_name: &str, capacity: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let capacity = capacity.max(1);
        let day = local_today();
        let path = file_for(dir, app_name, day);

        let mut lines = VecDeque::with_capacity(capacity);
        if let Ok(existing) = fs::read_to_string(&path) {
            for line in existing.lines() {
                push_bounded(&mut lines, capacity, line.to_string());
            }
        }

        let mut inner = Inner {
            dir: dir.to_path_buf(),
            app_name: app_name.to_string(),
            day,
            path,
            lines,
            capacity,
            pending: String::new(),
            file_lines: 0,
        };
        inner.rewrite()?;

        Ok(Self {
            inner: Arc::new(Mutex::new(inner)),
        })
    }

    /// File currently written to
    pub fn path(&self) -> PathBuf {
        self.lock().map(|inner| inner.path.clone()).unwrap_or_default()
    }

    /// Most recent lines of the current day, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        self.lock()
            .map(|inner| inner.lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Append raw bytes; complete lines are flushed, a trailing partial line waits
    pub fn write_bytes(&self, buf: &[u8]) -> io::Result<()> {
        self.write_bytes_on(buf, local_today())
    }

    fn write_bytes_on(&self, buf: &[u8], today: NaiveDate) -> io::Result<()> {
        let mut guard = self.lock()?;
        let inner = &mut *guard;
        inner.pending.push_str(&String::from_utf8_lossy(buf));

        while let Some(pos) = inner.pending.find('\n') {
            let line: String = inner.pending.drain(..=pos).collect();
            inner.append(line.trim_end_matches(['\n', '\r']).to_string(), today)?;
        }
        Ok(())
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log buffer poisoned"))
    }
}

/// Writer handed out to the fmt subscriber
pub struct RollingWriter {
    file: RollingFile,
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RollingFile {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        RollingWriter { file: self.clone() }
    }
}

/// Install the global subscriber writing to `log_dir` and stderr.
///
/// The helpers below only see the file once the subscriber is in place.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    let file = RollingFile::open(log_dir.as_ref(), app_name, DEFAULT_CAPACITY)?;

    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(true)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(file.clone().and(io::stderr))
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    if LOGGER.set(file).is_err() {
        return Err(LoggerError::AlreadyInitialized);
    }
    tracing::info!(app = app_name, "logger initialized");
    Ok(())
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    ensure_init()?;
    log::info!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    ensure_init()?;
    log::error!("{}", msg);
    Ok(())
}

/// Recent lines of the global logger (empty before init)
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(RollingFile::recent_lines).unwrap_or_default()
}

fn ensure_init() -> Result<(), LoggerError> {
    LOGGER.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

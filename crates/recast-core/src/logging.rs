//! Logging module for recast
//!
//! Records which refactorings were offered, what they planned and what was
//! committed, for debugging editor integrations. Nothing is written until
//! [`init_logger`] has been called.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::edit::Edit;

/// Global logger instance
static LOGGER: Mutex<Option<RefactorLogger>> = Mutex::new(None);

/// Logger for refactoring operations
pub struct RefactorLogger {
    file: File,
    path: PathBuf,
}

impl RefactorLogger {
    /// Create a new logger writing to the specified path
    pub fn new(log_path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;

        Ok(Self {
            file,
            path: log_path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a log message
    pub fn log(&mut self, message: &str) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(self.file, "[{}] {}", timestamp, message);
        let _ = self.file.flush();
    }

    /// Log a section header
    pub fn section(&mut self, title: &str) {
        let separator = "=".repeat(60);
        self.log(&separator);
        self.log(title);
        self.log(&separator);
    }
}

/// Initialize the global logger
///
/// Without an explicit path the log goes to a timestamped file in the
/// system temp directory.
pub fn init_logger(log_path: Option<&Path>) -> std::io::Result<PathBuf> {
    let path = log_path.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        std::env::temp_dir().join(format!("recast-{}.log", timestamp))
    });

    let logger = RefactorLogger::new(&path)?;

    if let Ok(mut guard) = LOGGER.lock() {
        *guard = Some(logger);
    }

    Ok(path)
}

/// Stop logging and close the log file
pub fn shutdown_logger() {
    if let Ok(mut guard) = LOGGER.lock() {
        *guard = None;
    }
}

/// Log a message to the global logger
pub fn log(message: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.log(message);
        }
    }
}

/// Log a section header
pub fn section(title: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.section(title);
        }
    }
}

/// Check if logging is enabled
pub fn is_enabled() -> bool {
    if let Ok(guard) = LOGGER.lock() {
        guard.is_some()
    } else {
        false
    }
}

/// Log an applicability decision
pub fn log_accept(refactoring: &str, offset: usize, accepted: bool) {
    if !is_enabled() {
        return;
    }
    let verdict = if accepted { "offered" } else { "skipped" };
    log(&format!("[{}] {} at offset {}", refactoring, verdict, offset));
}

/// Log a computed edit plan
pub fn log_plan(refactoring: &str, edits: &[Edit]) {
    if !is_enabled() {
        return;
    }
    section(&format!("PLAN {}", refactoring));
    for edit in edits {
        log(&format!(
            "  {}..{} -> {:?} ({})",
            edit.start_offset(),
            edit.end_offset(),
            edit.replacement,
            edit.message
        ));
    }
}

/// Log a planner that declined to produce edits
pub fn log_no_plan(refactoring: &str) {
    log(&format!("[{}] no plan for this context, nothing changed", refactoring));
}

/// Log a committed edit batch
pub fn log_commit(version: u64, edits: &[Edit]) {
    log(&format!("Committed {} edit(s), buffer version {}", edits.len(), version));
}

/// Log an edit batch the session refused
pub fn log_rejected(refactoring: &str, error: &dyn std::fmt::Display) {
    log(&format!("[{}] edit rejected: {}", refactoring, error));
}

/// Log removal of a redundant accessibility keyword
pub fn log_duplicate_accessibility(keyword: &str, offset: usize) {
    log(&format!(
        "Removing duplicate accessibility keyword '{}' at offset {}",
        keyword, offset
    ));
}

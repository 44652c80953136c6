//! Core logging types: per-file records, outcome, and the [`Log`] trait.
use std::path::PathBuf;

/// Outcome of processing one category file, for summary reporting.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Category file that was processed.
    pub path: PathBuf,
    /// Final outcome.
    pub outcome: FileOutcome,
    /// Optional detail message (e.g. the error that stopped interpretation).
    pub message: Option<String>,
}

/// Outcome of a processed category file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The whole document was interpreted.
    Ok,
    /// Interpretation stopped at an error; earlier entries were still built.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) writes through `tracing`; tests supply
/// their own implementations to capture messages.  Engine code logs only
/// through this trait.
pub trait Log: Send + Sync + std::fmt::Debug {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Record a category file outcome for the summary.
    fn record_file(&self, path: PathBuf, outcome: FileOutcome, message: Option<&str>);
}

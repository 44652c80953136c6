// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed pair of source and destination roots
// and a fluent builder so each integration test can set up an isolated
// library without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use classifier::commands::sync::{self, SyncReport};
use classifier::config::{DEFAULT_CATEGORIES_FILE, Settings};
use classifier::logging::{FileOutcome, Log};
use classifier::platform::{ICON_FILE_NAME, Os, UnixShell};
use classifier::prompt::Confirm;

/// A [`Log`] that keeps every message in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    /// `(level, message)` pairs in emission order.
    pub lines: Mutex<Vec<(&'static str, String)>>,
    /// Recorded category file outcomes.
    pub files: Mutex<Vec<(PathBuf, FileOutcome)>>,
}

impl MemoryLog {
    fn push(&self, level: &'static str, msg: &str) {
        self.lines
            .lock()
            .expect("log lock")
            .push((level, msg.to_string()));
    }

    /// Messages logged at `level`.
    pub fn at(&self, level: &str) -> Vec<String> {
        self.lines
            .lock()
            .expect("log lock")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Log for MemoryLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn record_file(&self, path: PathBuf, outcome: FileOutcome, _message: Option<&str>) {
        self.files.lock().expect("log lock").push((path, outcome));
    }
}

/// A [`Confirm`] with a fixed answer that counts how often it was asked.
#[derive(Debug)]
pub struct Answer {
    yes: bool,
    /// Questions asked so far.
    pub asked: Mutex<Vec<String>>,
}

impl Answer {
    pub fn yes() -> Self {
        Self {
            yes: true,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn no() -> Self {
        Self {
            yes: false,
            ..Self::yes()
        }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.lock().expect("answer lock").len()
    }
}

impl Confirm for Answer {
    fn confirm(&self, question: &str) -> std::io::Result<bool> {
        self.asked
            .lock()
            .expect("answer lock")
            .push(question.to_string());
        Ok(self.yes)
    }
}

/// An isolated source/destination pair backed by a [`tempfile::TempDir`].
///
/// The directories are automatically deleted when dropped (via the
/// underlying [`tempfile::TempDir`]).
pub struct Library {
    /// Temporary directory holding `src/` and `dst/`.
    pub root: tempfile::TempDir,
}

impl Library {
    /// Create an empty library with both roots present.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("src")).expect("create src");
        std::fs::create_dir_all(root.path().join("dst")).expect("create dst");
        Self { root }
    }

    /// Source root.
    pub fn source(&self) -> PathBuf {
        self.root.path().join("src")
    }

    /// Destination root.
    pub fn dest(&self) -> PathBuf {
        self.root.path().join("dst")
    }

    /// Canonical path of the source item `name`, as shortcuts point to it.
    pub fn item(&self, name: &str) -> PathBuf {
        dunce_like_canonical(&self.source().join(name))
    }

    /// Add a source item `name` with the given category document.
    pub fn with_item(self, name: &str, json: &str) -> Self {
        let dir = self.source().join(name);
        std::fs::create_dir_all(&dir).expect("create item dir");
        std::fs::write(dir.join(DEFAULT_CATEGORIES_FILE), json).expect("write categories");
        self
    }

    /// Give the source item `name` an icon file.
    pub fn with_icon(self, name: &str, content: &[u8]) -> Self {
        std::fs::write(self.source().join(name).join(ICON_FILE_NAME), content).expect("write icon");
        self
    }

    /// Create a directory below the destination root.
    pub fn with_dest_dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.dest().join(rel)).expect("create dest dir");
        self
    }

    /// Create a file below the destination root.
    pub fn with_dest_file(self, rel: &str) -> Self {
        let path = self.dest().join(rel);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
        std::fs::write(path, "").expect("write dest file");
        self
    }

    /// Run one synchronization pass with the Unix shell.
    pub fn sync(&self, confirm: &dyn Confirm, log: &dyn Log) -> anyhow::Result<SyncReport> {
        let settings = Settings::new(
            &self.source(),
            self.dest(),
            DEFAULT_CATEGORIES_FILE.to_string(),
            false,
        )?;
        sync::run(settings, &UnixShell::new(Os::detect()), confirm, log)
    }

    /// Run a pass that answers yes, panicking on error.
    pub fn sync_yes(&self) -> SyncReport {
        self.sync(&Answer::yes(), &MemoryLog::default())
            .expect("sync should succeed")
    }
}

fn dunce_like_canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).expect("canonicalize")
}

//! Orphan reconciliation: finds destination entries no category file asked
//! for and removes them.
//!
//! Ownership comes only from the [`IdentityRegistry`] filled during the build
//! pass.  Only directories and generated-looking files are ever considered;
//! anything else a user drops into the destination tree is left alone.
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use walkdir::WalkDir;

use crate::identity::IdentityRegistry;
use crate::logging::Log;
use crate::platform::Shell;

/// Extensions of files the engine generates, besides the active shell's
/// shortcut extension.
const GENERATED_EXTENSIONS: &[&str] = &["lnk", "ini"];

/// Kind of an extra entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory.
    Directory,
    /// A file or link.
    File,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => write!(f, "directory"),
            Self::File => write!(f, "file"),
        }
    }
}

/// A destination entry not owned by the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraEntry {
    /// Path of the entry.
    pub path: PathBuf,
    /// Whether it is a directory or a file.
    pub kind: EntryKind,
}

impl fmt::Display for ExtraEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "extra {}: {}", self.kind, self.path.display())
    }
}

/// Outcome of a deletion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
    /// Entries removed.
    pub removed: Vec<PathBuf>,
    /// Entries that could not be removed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

/// Whether a non-directory entry looks like something the engine generates.
///
/// Files qualify by extension (`lnk`, `ini`, the shell's shortcut extension,
/// or none).  Symbolic links always qualify when the shell's shortcuts are
/// plain links, whatever dots their names contain.
#[must_use]
pub fn is_eligible(path: &Path, is_symlink: bool, shell: &dyn Shell) -> bool {
    let shortcut_ext = shell.shortcut_extension().trim_start_matches('.');
    if is_symlink && shortcut_ext.is_empty() {
        return true;
    }
    path.extension().and_then(|e| e.to_str()).is_none_or(|ext| {
        GENERATED_EXTENSIONS
            .iter()
            .any(|g| ext.eq_ignore_ascii_case(g))
            || (!shortcut_ext.is_empty() && ext.eq_ignore_ascii_case(shortcut_ext))
    })
}

/// List every extra entry below `dest_root`, children before parents.
///
/// Links are inspected themselves and never followed; the root is never
/// listed.
///
/// # Errors
///
/// Returns an error if the tree cannot be walked or an entry cannot be
/// identified.
pub fn scan(dest_root: &Path, registry: &IdentityRegistry, shell: &dyn Shell) -> Result<Vec<ExtraEntry>> {
    let mut extras = Vec::new();
    for entry in WalkDir::new(dest_root)
        .follow_links(false)
        .min_depth(1)
        .contents_first(true)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("walk {}", dest_root.display()))?;
        let file_type = entry.file_type();
        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else if is_eligible(entry.path(), file_type.is_symlink(), shell) {
            EntryKind::File
        } else {
            continue;
        };
        let owned = registry
            .owns(entry.path())
            .with_context(|| format!("identify {}", entry.path().display()))?;
        if !owned {
            extras.push(ExtraEntry {
                path: entry.into_path(),
                kind,
            });
        }
    }
    Ok(extras)
}

/// Re-scan `dest_root` and delete every extra entry, deepest first.
///
/// A failed deletion is logged and recorded; the remaining entries are still
/// attempted.
///
/// # Errors
///
/// Returns an error only if the re-scan itself fails.
pub fn delete_extras(
    dest_root: &Path,
    registry: &IdentityRegistry,
    shell: &dyn Shell,
    log: &dyn Log,
) -> Result<DeletionReport> {
    let mut report = DeletionReport::default();
    for extra in scan(dest_root, registry, shell)? {
        match remove(&extra) {
            Ok(()) => {
                log.info(&format!("removed {}", extra.path.display()));
                report.removed.push(extra.path);
            }
            Err(e) => {
                log.error(&format!("failed to remove {}: {e}", extra.path.display()));
                report.failed.push((extra.path, e.to_string()));
            }
        }
    }
    Ok(report)
}

fn remove(extra: &ExtraEntry) -> std::io::Result<()> {
    clear_readonly(&extra.path)?;
    match extra.kind {
        EntryKind::Directory => std::fs::remove_dir(&extra.path),
        EntryKind::File => std::fs::remove_file(&extra.path),
    }
}

/// Configured folders and generated files carry the read-only attribute on
/// Windows, which blocks deletion.
#[cfg(windows)]
fn clear_readonly(path: &Path) -> std::io::Result<()> {
    let meta = std::fs::symlink_metadata(path)?;
    let mut permissions = meta.permissions();
    if permissions.readonly() {
        permissions.set_readonly(false);
        std::fs::set_permissions(path, permissions)?;
    }
    Ok(())
}

#[cfg(not(windows))]
#[allow(clippy::unnecessary_wraps)]
const fn clear_readonly(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

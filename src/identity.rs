//! Stable identities for destination entries and the ownership set.
//!
//! The registry is the only oracle the reconciler consults: an entry is owned
//! by the current run if and only if one of the builders registered it.
use std::collections::HashSet;
use std::io;
use std::path::Path;

/// Identity of a filesystem entry that survives renames on the same volume.
///
/// Links are identified themselves; the entry they resolve to is never
/// consulted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryId {
    /// Device and inode number.
    #[cfg(unix)]
    Inode {
        /// Device holding the entry.
        dev: u64,
        /// Inode number on that device.
        ino: u64,
    },
    /// Canonical path, for platforms without a stable inode in `std`.
    #[cfg(not(unix))]
    Canonical(std::path::PathBuf),
}

impl EntryId {
    /// Identity of the entry at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist or cannot be inspected.
    pub fn of(path: &Path) -> io::Result<Self> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            let meta = std::fs::symlink_metadata(path)?;
            Ok(Self::Inode {
                dev: meta.dev(),
                ino: meta.ino(),
            })
        }

        #[cfg(not(unix))]
        {
            dunce::canonicalize(path).map(Self::Canonical)
        }
    }
}

/// Set of entries created, verified or kept during the current run.
///
/// Grows monotonically while the category files are interpreted and is only
/// read during reconciliation.
#[derive(Debug, Default, Clone)]
pub struct IdentityRegistry {
    ids: HashSet<EntryId>,
}

impl IdentityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the entry at `path` as owned and return its identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be inspected.
    pub fn register(&mut self, path: &Path) -> io::Result<EntryId> {
        let id = EntryId::of(path)?;
        self.ids.insert(id.clone());
        Ok(id)
    }

    /// Whether `id` has been registered.
    #[must_use]
    pub fn contains(&self, id: &EntryId) -> bool {
        self.ids.contains(id)
    }

    /// Whether the entry at `path` is owned by this run.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be inspected.
    pub fn owns(&self, path: &Path) -> io::Result<bool> {
        Ok(self.contains(&EntryId::of(path)?))
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

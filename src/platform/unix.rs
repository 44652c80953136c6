//! Unix shell integration: symbolic links, no folder view settings.
use std::path::{Path, PathBuf};

use super::{Os, Shell};
use crate::error::PlatformError;

/// Shell integration for Linux and macOS.
///
/// Shortcuts are symbolic links without an extension. Folder view settings do
/// not exist, so [`Shell::configure_directory`] reports
/// [`PlatformError::Unsupported`]. The icon resource is a dot-file and
/// therefore already hidden; the attribute hooks do nothing.
#[derive(Debug, Clone, Copy)]
pub struct UnixShell {
    os: Os,
}

impl UnixShell {
    /// Create a shell for the given Unix-like platform.
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }
}

impl Shell for UnixShell {
    fn os(&self) -> Os {
        self.os
    }

    fn shortcut_extension(&self) -> &'static str {
        ""
    }

    fn create_shortcut(&self, target: &Path, shortcut: &Path) -> Result<(), PlatformError> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(target, shortcut).map_err(|source| PlatformError::Io {
                operation: "create symlink",
                path: shortcut.to_path_buf(),
                source,
            })
        }

        #[cfg(not(unix))]
        {
            let _ = (target, shortcut);
            Err(PlatformError::Unsupported {
                operation: "symbolic link shortcuts",
                os: self.os,
            })
        }
    }

    fn configure_directory(&self, _dir: &Path) -> Result<PathBuf, PlatformError> {
        Err(PlatformError::Unsupported {
            operation: "directory configuration",
            os: self.os,
        })
    }

    fn unlock_file(&self, _path: &Path) -> Result<(), PlatformError> {
        Ok(())
    }

    fn hide_file(&self, _path: &Path) -> Result<(), PlatformError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn configure_directory_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let err = UnixShell::new(Os::Linux)
            .configure_directory(dir.path())
            .expect_err("unix has no folder view settings");
        assert!(err.is_unsupported());
        assert!(!dir.path().join(super::super::METADATA_FILE_NAME).exists());
    }

    #[test]
    fn attribute_hooks_are_noops() {
        let shell = UnixShell::new(Os::MacOs);
        assert!(shell.unlock_file(Path::new("/nonexistent")).is_ok());
        assert!(shell.hide_file(Path::new("/nonexistent")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn create_shortcut_makes_symlink_to_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("movies");
        std::fs::create_dir(&target).unwrap();
        let link = dir.path().join("link");

        UnixShell::new(Os::Linux)
            .create_shortcut(&target, &link)
            .unwrap();

        assert!(link.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_link(&link).unwrap(), target);
    }

    #[cfg(unix)]
    #[test]
    fn create_shortcut_fails_when_entry_exists() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("taken");
        std::fs::write(&link, "").unwrap();

        let err = UnixShell::new(Os::Linux)
            .create_shortcut(dir.path(), &link)
            .expect_err("existing entry blocks symlink");
        assert!(!err.is_unsupported());
    }
}

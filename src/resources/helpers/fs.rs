//! File-system resource helpers.
use std::path::Path;
use std::time::SystemTime;

use crate::resources::error::ResourceError;

/// Remove an existing file or symlink at `path`, including broken symlinks.
///
/// This is a shared helper for resource `apply()` methods that need to
/// replace an existing artifact.  Does nothing if `path` does not exist.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_existing(path: &Path) -> Result<(), ResourceError> {
    if path.symlink_metadata().is_ok() {
        std::fs::remove_file(path).map_err(|e| ResourceError::io("remove existing", path, e))?;
    }
    Ok(())
}

/// Modification time of the entry at `path` itself (links are not followed).
///
/// Returns `None` when the entry does not exist or its time is unavailable.
#[must_use]
pub fn entry_modified(path: &Path) -> Option<SystemTime> {
    path.symlink_metadata().and_then(|m| m.modified()).ok()
}

/// Modification time of the file a generated artifact was derived from.
///
/// # Errors
///
/// Returns an error if the descriptor cannot be inspected.
pub fn descriptor_modified(path: &Path) -> Result<SystemTime, ResourceError> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| ResourceError::io("read modification time", path, e))
}

/// Whether the artifact at `artifact` exists and is at least as new as the
/// descriptor it was generated from.
///
/// # Errors
///
/// Returns an error if the descriptor's modification time cannot be read.
pub fn is_up_to_date(artifact: &Path, descriptor: &Path) -> Result<bool, ResourceError> {
    let Some(existing) = entry_modified(artifact) else {
        return Ok(false);
    };
    Ok(existing >= descriptor_modified(descriptor)?)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use filetime::FileTime;

    fn set_mtime(path: &Path, secs: i64) {
        filetime::set_file_mtime(path, FileTime::from_unix_time(secs, 0)).unwrap();
    }

    // -----------------------------------------------------------------------
    // remove_existing
    // -----------------------------------------------------------------------

    #[test]
    fn remove_existing_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("movies.lnk");
        std::fs::write(&file, "").unwrap();
        remove_existing(&file).unwrap();
        assert!(!file.exists());
    }

    #[test]
    fn remove_existing_noop_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        remove_existing(&dir.path().join("missing")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn remove_existing_deletes_broken_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("dangling");
        std::os::unix::fs::symlink(dir.path().join("gone"), &link).unwrap();
        remove_existing(&link).unwrap();
        assert!(link.symlink_metadata().is_err());
    }

    // -----------------------------------------------------------------------
    // is_up_to_date
    // -----------------------------------------------------------------------

    #[test]
    fn missing_artifact_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let descriptor = dir.path().join(".categories.json");
        std::fs::write(&descriptor, "{}").unwrap();
        assert!(!is_up_to_date(&dir.path().join("missing"), &descriptor).unwrap());
    }

    #[test]
    fn newer_or_equal_artifact_is_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let descriptor = dir.path().join(".categories.json");
        let artifact = dir.path().join("movies.lnk");
        std::fs::write(&descriptor, "{}").unwrap();
        std::fs::write(&artifact, "").unwrap();

        set_mtime(&descriptor, 1_000_000);
        set_mtime(&artifact, 1_000_000);
        assert!(is_up_to_date(&artifact, &descriptor).unwrap());

        set_mtime(&artifact, 2_000_000);
        assert!(is_up_to_date(&artifact, &descriptor).unwrap());
    }

    #[test]
    fn older_artifact_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let descriptor = dir.path().join(".categories.json");
        let artifact = dir.path().join("movies.lnk");
        std::fs::write(&descriptor, "{}").unwrap();
        std::fs::write(&artifact, "").unwrap();

        set_mtime(&artifact, 1_000_000);
        set_mtime(&descriptor, 2_000_000);
        assert!(!is_up_to_date(&artifact, &descriptor).unwrap());
    }

    #[test]
    fn missing_descriptor_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("movies.lnk");
        std::fs::write(&artifact, "").unwrap();
        let err = is_up_to_date(&artifact, &dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ResourceError::Io { .. }));
    }
}

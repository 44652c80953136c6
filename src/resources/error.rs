//! Typed error variants for resource operations.
//!
//! This module provides [`ResourceError`], a structured error type for the
//! directory, shortcut and icon builders.  Builder code returns these
//! variants directly; callers convert to [`anyhow::Error`] via `?`.
use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while building destination entries.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// Something other than a directory occupies a directory path.
    #[error("not a directory: {}", path.display())]
    NotADirectory {
        /// Path that should be a directory.
        path: PathBuf,
    },

    /// A source file the resource copies from does not exist.
    #[error("source not found: {}", path.display())]
    SourceNotFound {
        /// Expected source path.
        path: PathBuf,
    },

    /// A filesystem call failed.
    #[error("{operation} failed for {}: {source}", path.display())]
    Io {
        /// Name of the operation (e.g. `"create directory"`).
        operation: &'static str,
        /// Path being operated on.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl ResourceError {
    /// Build an [`ResourceError::Io`] for `path`.
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn not_a_directory_display() {
        let e = ResourceError::NotADirectory {
            path: PathBuf::from("/dest/Action"),
        };
        assert_eq!(e.to_string(), "not a directory: /dest/Action");
    }

    #[test]
    fn source_not_found_display() {
        let e = ResourceError::SourceNotFound {
            path: PathBuf::from("/src/movies/.icon.ico"),
        };
        assert!(e.to_string().contains(".icon.ico"));
    }

    #[test]
    fn io_display_names_operation_and_path() {
        let e = ResourceError::io(
            "copy icon",
            "/dest/Genre/thumb/.icon.ico",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = e.to_string();
        assert!(msg.contains("copy icon"));
        assert!(msg.contains("/dest/Genre/thumb/.icon.ico"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn resource_error_converts_to_anyhow() {
        let e = ResourceError::NotADirectory {
            path: PathBuf::from("x"),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn resource_error_is_send_sync() {
        assert_send_sync::<ResourceError>();
    }
}

//! Domain-specific error types for the classifier engine.
//!
//! Internal modules return typed errors (e.g. [`DocumentError`],
//! [`PlatformError`]) while the driver and the binary work with
//! [`anyhow::Error`], converting via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ClassifierError
//! ├── Config(ConfigError)    : roots, categories file name
//! ├── Document(DocumentError): category file reading, JSON, structure
//! ├── Resource(ResourceError): directories, shortcuts, icons
//! └── Platform(PlatformError): shell integration, unsupported operations
//! ```
//!
//! [`exit_code`] maps an error reaching the process boundary onto the exit
//! status: `1` when the chain holds one of these domain errors, `255` (the
//! unsigned form of `-1`) for anything else.

use std::path::PathBuf;

use thiserror::Error;

use crate::platform::Os;
pub use crate::resources::error::ResourceError;

/// Top-level error type for the classifier engine.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Configuration-related error (roots, file names).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A category file could not be read or interpreted.
    #[error("Category document error: {0}")]
    Document(#[from] DocumentError),

    /// A destination entry could not be built.
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// A platform integration failed or is unavailable.
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Errors that arise while resolving and validating run settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The source root does not exist or is not a directory.
    #[error("source directory not found: {}", path.display())]
    SourceNotFound {
        /// The configured source root.
        path: PathBuf,
    },

    /// The categories file name is empty or not a plain file name.
    #[error("invalid categories file name '{0}': expected a plain file name")]
    InvalidCategoriesFile(String),

    /// The source and destination roots contain one another.
    #[error(
        "source {} and destination {} overlap",
        source_dir.display(),
        destination_dir.display()
    )]
    OverlappingRoots {
        /// Canonical source root.
        source_dir: PathBuf,
        /// Canonical destination root.
        destination_dir: PathBuf,
    },

    /// A root could not be created or resolved.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// Path that could not be accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from reading or interpreting a category document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The category file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path of the category file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The category file is not valid JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        /// Path of the category file.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_json::Error,
    },

    /// The top level of a category document is not an object.
    #[error("top level must be an object, found {found}")]
    NotAnObject {
        /// Kind of the node found instead.
        found: &'static str,
    },

    /// A node kind is not allowed at this position of the document.
    #[error("unexpected {found} at '{position}'")]
    UnexpectedNode {
        /// Kind of the offending node.
        found: &'static str,
        /// Destination-relative position (or key) where it was found.
        position: String,
    },

    /// A key or value cannot be used as a destination path segment.
    #[error("invalid path segment '{0}'")]
    InvalidSegment(String),
}

/// Errors that arise from platform-specific operations.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The requested operation is not available on the current platform.
    #[error("{operation} is not supported on {os}")]
    Unsupported {
        /// Name of the operation (e.g. `"directory configuration"`).
        operation: &'static str,
        /// Platform the run is on.
        os: Os,
    },

    /// A filesystem call made on behalf of the shell failed.
    #[error("{operation} failed for {}: {source}", path.display())]
    Io {
        /// Name of the operation.
        operation: &'static str,
        /// Path being operated on.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An external helper command failed.
    #[error("{operation} failed for {}: {reason}", path.display())]
    Command {
        /// Name of the operation.
        operation: &'static str,
        /// Path being operated on.
        path: PathBuf,
        /// Reason reported by the command runner.
        reason: String,
    },
}

impl PlatformError {
    /// Whether this error only signals a capability the platform lacks.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// Exit status for a successful run.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status for a recognised domain error.
pub const EXIT_DOMAIN_ERROR: u8 = 1;

/// Exit status for any other error (`-1` as an unsigned byte).
pub const EXIT_UNEXPECTED: u8 = 255;

/// Map an error that reached `main` onto the process exit status.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let is_domain = err.chain().any(|cause| {
        cause.is::<ClassifierError>()
            || cause.is::<ConfigError>()
            || cause.is::<DocumentError>()
            || cause.is::<ResourceError>()
            || cause.is::<PlatformError>()
    });
    if is_domain {
        EXIT_DOMAIN_ERROR
    } else {
        EXIT_UNEXPECTED
    }
}

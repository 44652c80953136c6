//! Run settings resolved from the command line and validated up front.
use std::path::{Component, Path, PathBuf};

use crate::cli::Cli;
use crate::error::ConfigError;

/// Category file name used when none is given.
pub const DEFAULT_CATEGORIES_FILE: &str = ".categories.json";

/// Validated settings for one synchronization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Canonical source root searched for category files.
    pub source_dir: PathBuf,
    /// Destination root; created by the run if absent.
    pub destination_dir: PathBuf,
    /// File name of category files.
    pub categories_file: String,
    /// Delete extra entries without asking.
    pub assume_yes: bool,
}

impl Settings {
    /// Validate and build settings.
    ///
    /// The source root is canonicalised so every source directory has a
    /// name to give its shortcuts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SourceNotFound`] when the source root is not a
    /// directory and [`ConfigError::InvalidCategoriesFile`] when the file name
    /// is empty or contains path components.
    pub fn new(
        source_dir: &Path,
        destination_dir: PathBuf,
        categories_file: String,
        assume_yes: bool,
    ) -> Result<Self, ConfigError> {
        if !source_dir.is_dir() {
            return Err(ConfigError::SourceNotFound {
                path: source_dir.to_path_buf(),
            });
        }
        let source_dir = dunce::canonicalize(source_dir).map_err(|source| ConfigError::Io {
            path: source_dir.to_path_buf(),
            source,
        })?;
        validate_file_name(&categories_file)?;
        Ok(Self {
            source_dir,
            destination_dir,
            categories_file,
            assume_yes,
        })
    }

    /// Build settings from parsed command-line arguments.
    ///
    /// # Errors
    ///
    /// See [`Settings::new`].
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::new(
            &cli.source,
            cli.destination.clone(),
            cli.categories_file.clone(),
            cli.assume_yes,
        )
    }

    /// Create the destination root if needed, canonicalise it, and make sure
    /// neither root contains the other.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the destination cannot be created and
    /// [`ConfigError::OverlappingRoots`] if the roots overlap.
    pub fn prepare_destination(&mut self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.destination_dir).map_err(|source| ConfigError::Io {
            path: self.destination_dir.clone(),
            source,
        })?;
        self.destination_dir =
            dunce::canonicalize(&self.destination_dir).map_err(|source| ConfigError::Io {
                path: self.destination_dir.clone(),
                source,
            })?;
        ensure_disjoint(&self.source_dir, &self.destination_dir)
    }
}

fn validate_file_name(name: &str) -> Result<(), ConfigError> {
    let mut components = Path::new(name).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if plain && !name.contains(std::path::is_separator) {
        Ok(())
    } else {
        Err(ConfigError::InvalidCategoriesFile(name.to_string()))
    }
}

/// Fail if either canonical root contains the other.
///
/// # Errors
///
/// Returns [`ConfigError::OverlappingRoots`] when they overlap.
pub fn ensure_disjoint(source_dir: &Path, destination_dir: &Path) -> Result<(), ConfigError> {
    if source_dir.starts_with(destination_dir) || destination_dir.starts_with(source_dir) {
        return Err(ConfigError::OverlappingRoots {
            source_dir: source_dir.to_path_buf(),
            destination_dir: destination_dir.to_path_buf(),
        });
    }
    Ok(())
}

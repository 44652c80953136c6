//! Platform detection and the shell-integration capability.
//!
//! Everything the engine does that depends on the host desktop (how a
//! shortcut looks, how a folder gets a custom icon and view) sits behind the
//! [`Shell`] trait. [`native_shell`] picks the implementation for the running
//! platform; operations a platform cannot perform return
//! [`PlatformError::Unsupported`] instead of being compiled out.
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::PlatformError;

mod unix;
mod windows;

pub use unix::UnixShell;
pub use windows::{DESKTOP_INI, WindowsShell};

/// File name of the icon resource copied next to categorised directories.
pub const ICON_FILE_NAME: &str = ".icon.ico";

/// File name of the per-directory view metadata file.
pub const METADATA_FILE_NAME: &str = "desktop.ini";

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux and other Unix-like systems without a more specific variant.
    Linux,
    /// macOS.
    MacOs,
    /// Windows.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

impl Os {
    /// Detect the current operating system.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            // Default to Linux for other Unix-like systems
            Self::Linux
        }
    }
}

/// Host integration used by the directory, shortcut and icon builders.
pub trait Shell: fmt::Debug {
    /// Platform this shell integrates with.
    fn os(&self) -> Os;

    /// Extension appended to shortcut names, including the leading dot
    /// (empty when links carry no extension).
    fn shortcut_extension(&self) -> &'static str;

    /// Create a shortcut file at `shortcut` resolving to `target`.
    ///
    /// `shortcut` already carries [`Shell::shortcut_extension`].
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created.
    fn create_shortcut(&self, target: &Path, shortcut: &Path) -> Result<(), PlatformError>;

    /// Give `dir` its custom view settings and return the metadata file that
    /// now belongs to it.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unsupported`] on platforms without per-folder
    /// view settings, or an I/O/command error when applying them fails.
    fn configure_directory(&self, dir: &Path) -> Result<PathBuf, PlatformError>;

    /// Make `path` writable again before it is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the attributes cannot be changed.
    fn unlock_file(&self, path: &Path) -> Result<(), PlatformError>;

    /// Mark a generated file as hidden system content.
    ///
    /// # Errors
    ///
    /// Returns an error if the attributes cannot be changed.
    fn hide_file(&self, path: &Path) -> Result<(), PlatformError>;
}

/// The shell integration for the platform this binary was built for.
#[must_use]
pub fn native_shell() -> Box<dyn Shell> {
    if cfg!(windows) {
        Box::new(WindowsShell::new())
    } else {
        Box::new(UnixShell::new(Os::detect()))
    }
}

/// Full shortcut path for `stem`: the stem with the shell's extension
/// appended verbatim (dots already in the stem are kept).
#[must_use]
pub fn shortcut_path(shell: &dyn Shell, stem: &Path) -> PathBuf {
    let mut name = stem.as_os_str().to_owned();
    name.push(shell.shortcut_extension());
    PathBuf::from(name)
}

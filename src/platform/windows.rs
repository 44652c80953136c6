//! Windows shell integration: `.lnk` shortcuts and `desktop.ini` folders.
use std::path::{Path, PathBuf};

use super::{METADATA_FILE_NAME, Os, Shell};
use crate::error::PlatformError;
use crate::exec::{Executor, SystemExecutor};

/// View settings written into every configured destination directory.
pub const DESKTOP_INI: &str = "[.ShellClassInfo]\n\
IconResource=.icon.ico,0\n\
IconFile=.icon.ico,0\n\
IconIndex=0\n\
[ViewState]\n\
FolderType=Videos\n\
Mode=\n\
Vid=\n";

/// Shell integration for Windows Explorer.
///
/// Attributes are applied with `attrib` and shortcuts are created through the
/// `WScript.Shell` COM object in PowerShell, both run via an [`Executor`].
#[derive(Debug)]
pub struct WindowsShell {
    executor: Box<dyn Executor>,
}

impl WindowsShell {
    /// Create a shell that runs helpers on the host.
    #[must_use]
    pub fn new() -> Self {
        Self::with_executor(Box::new(SystemExecutor))
    }

    /// Create a shell that runs helpers through `executor`.
    #[must_use]
    pub fn with_executor(executor: Box<dyn Executor>) -> Self {
        Self { executor }
    }

    fn attrib(&self, flags: &[&str], path: &Path, operation: &'static str) -> Result<(), PlatformError> {
        let path_str = path.to_string_lossy();
        let mut args: Vec<&str> = flags.to_vec();
        args.push(&path_str);
        self.executor
            .run("attrib", &args)
            .map(|_| ())
            .map_err(|e| PlatformError::Command {
                operation,
                path: path.to_path_buf(),
                reason: format!("{e:#}"),
            })
    }
}

impl Default for WindowsShell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell for WindowsShell {
    fn os(&self) -> Os {
        Os::Windows
    }

    fn shortcut_extension(&self) -> &'static str {
        ".lnk"
    }

    fn create_shortcut(&self, target: &Path, shortcut: &Path) -> Result<(), PlatformError> {
        let script = shortcut_script(target, shortcut);
        self.executor
            .run("powershell", &["-NoProfile", "-NonInteractive", "-Command", &script])
            .map(|_| ())
            .map_err(|e| PlatformError::Command {
                operation: "create shortcut",
                path: shortcut.to_path_buf(),
                reason: format!("{e:#}"),
            })
    }

    fn configure_directory(&self, dir: &Path) -> Result<PathBuf, PlatformError> {
        let ini = dir.join(METADATA_FILE_NAME);
        if ini.symlink_metadata().is_err() {
            std::fs::write(&ini, DESKTOP_INI).map_err(|source| PlatformError::Io {
                operation: "write desktop.ini",
                path: ini.clone(),
                source,
            })?;
        }
        self.attrib(&["+h", "+s", "+a"], &ini, "hide desktop.ini")?;
        self.attrib(&["+r"], dir, "mark customised folder")?;
        Ok(ini)
    }

    fn unlock_file(&self, path: &Path) -> Result<(), PlatformError> {
        self.attrib(&["-r", "-h", "-s"], path, "clear attributes")
    }

    fn hide_file(&self, path: &Path) -> Result<(), PlatformError> {
        self.attrib(&["+h", "+s"], path, "hide file")
    }
}

/// Quote `s` as a single-quoted PowerShell string literal.
fn ps_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// PowerShell script creating a `.lnk` at `shortcut` that opens `target`.
fn shortcut_script(target: &Path, shortcut: &Path) -> String {
    format!(
        "$s = (New-Object -ComObject WScript.Shell).CreateShortcut({}); $s.TargetPath = {}; $s.Save()",
        ps_quote(&shortcut.to_string_lossy()),
        ps_quote(&target.to_string_lossy()),
    )
}

//! Destination directory resource.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::error::ResourceError;
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::error::PlatformError;
use crate::identity::IdentityRegistry;
use crate::platform::Shell;

/// A destination directory, created one level at a time.
///
/// The parent is expected to exist already: the interpreter builds paths
/// segment by segment, so a missing parent is reported as an error rather
/// than created implicitly.
#[derive(Debug)]
pub struct DirectoryResource<'a> {
    /// Directory path under the destination root.
    pub path: PathBuf,
    shell: &'a dyn Shell,
}

impl<'a> DirectoryResource<'a> {
    /// Create a new directory resource.
    #[must_use]
    pub fn new(path: PathBuf, shell: &'a dyn Shell) -> Self {
        Self { path, shell }
    }

    /// Apply the platform view settings to the directory and register the
    /// metadata file they produce.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unsupported`] on platforms without per-folder
    /// settings, or the error from the shell or from registering the file.
    pub fn configure(&self, registry: &mut IdentityRegistry) -> Result<PathBuf, PlatformError> {
        let metadata = self.shell.configure_directory(&self.path)?;
        registry.register(&metadata).map_err(|source| PlatformError::Io {
            operation: "register metadata file",
            path: metadata.clone(),
            source,
        })?;
        Ok(metadata)
    }
}

impl Applicable for DirectoryResource<'_> {
    fn description(&self) -> String {
        format!("{}/", self.path.display())
    }

    fn apply(&self, registry: &mut IdentityRegistry) -> Result<ResourceChange> {
        let change = match self.current_state()? {
            ResourceState::Correct => ResourceChange::AlreadyCorrect,
            ResourceState::Missing => {
                std::fs::create_dir(&self.path)
                    .map_err(|e| ResourceError::io("create directory", &self.path, e))?;
                ResourceChange::Applied
            }
            ResourceState::Incorrect { .. } | ResourceState::Invalid { .. } => {
                return Err(ResourceError::NotADirectory {
                    path: self.path.clone(),
                }
                .into());
            }
        };
        register(registry, &self.path)?;
        Ok(change)
    }
}

impl Resource for DirectoryResource<'_> {
    /// Links are never followed: a shortcut to a directory is not one.
    fn current_state(&self) -> Result<ResourceState> {
        match std::fs::symlink_metadata(&self.path) {
            Ok(meta) if meta.file_type().is_dir() => Ok(ResourceState::Correct),
            Ok(meta) => Ok(ResourceState::Invalid {
                reason: if meta.file_type().is_symlink() {
                    "path is occupied by a link".to_string()
                } else {
                    "path is occupied by a file".to_string()
                },
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ResourceState::Missing),
            Err(e) => Err(ResourceError::io("inspect", &self.path, e).into()),
        }
    }
}

/// Register `path`, attaching it to the error.
pub(super) fn register(registry: &mut IdentityRegistry, path: &Path) -> Result<()> {
    registry
        .register(path)
        .map(|_| ())
        .with_context(|| format!("register {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::RecordingShell;

    #[test]
    fn creates_and_registers_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::new();
        let path = dir.path().join("Action");
        let resource = DirectoryResource::new(path.clone(), &shell);
        assert_eq!(resource.current_state().unwrap(), ResourceState::Missing);

        let mut registry = IdentityRegistry::new();
        let change = resource.apply(&mut registry).unwrap();

        assert_eq!(change, ResourceChange::Applied);
        assert!(path.is_dir());
        assert!(registry.owns(&path).unwrap());
    }

    #[test]
    fn existing_directory_is_registered_without_change() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::new();
        let path = dir.path().join("Action");
        std::fs::create_dir(&path).unwrap();

        let mut registry = IdentityRegistry::new();
        let change = DirectoryResource::new(path.clone(), &shell)
            .apply(&mut registry)
            .unwrap();

        assert_eq!(change, ResourceChange::AlreadyCorrect);
        assert!(registry.owns(&path).unwrap());
    }

    #[test]
    fn file_in_the_way_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::new();
        let path = dir.path().join("Action");
        std::fs::write(&path, "").unwrap();
        let resource = DirectoryResource::new(path.clone(), &shell);
        assert!(matches!(
            resource.current_state().unwrap(),
            ResourceState::Invalid { .. }
        ));

        let mut registry = IdentityRegistry::new();
        let err = resource.apply(&mut registry).unwrap_err();
        assert!(err.downcast_ref::<ResourceError>().is_some());
        assert!(err.to_string().contains("not a directory"));
        assert!(registry.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn link_to_directory_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::new();
        let item = dir.path().join("src").join("Comedy");
        std::fs::create_dir_all(&item).unwrap();
        let path = dir.path().join("Comedy");
        std::os::unix::fs::symlink(&item, &path).unwrap();
        let resource = DirectoryResource::new(path.clone(), &shell);
        assert!(matches!(
            resource.current_state().unwrap(),
            ResourceState::Invalid { .. }
        ));

        let mut registry = IdentityRegistry::new();
        let err = resource.apply(&mut registry).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResourceError>(),
            Some(ResourceError::NotADirectory { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn missing_parent_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::new();
        let path = dir.path().join("Genre").join("Drama");

        let mut registry = IdentityRegistry::new();
        let err = DirectoryResource::new(path, &shell)
            .apply(&mut registry)
            .unwrap_err();
        assert!(err.to_string().contains("create directory"));
    }

    #[test]
    fn configure_reports_unsupported_shell() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::new();
        let mut registry = IdentityRegistry::new();

        let err = DirectoryResource::new(dir.path().to_path_buf(), &shell)
            .configure(&mut registry)
            .unwrap_err();
        assert!(err.is_unsupported());
        assert_eq!(shell.hooks(), ["configure_directory"]);
        assert!(registry.is_empty());
    }

    #[test]
    fn configure_propagates_genuine_failure() {
        let dir = tempfile::tempdir().unwrap();
        let shell = RecordingShell::failing_configure();
        let mut registry = IdentityRegistry::new();

        let err = DirectoryResource::new(dir.path().to_path_buf(), &shell)
            .configure(&mut registry)
            .unwrap_err();
        assert!(!err.is_unsupported());
    }

    #[test]
    fn description_marks_directory() {
        let shell = RecordingShell::new();
        let resource = DirectoryResource::new(PathBuf::from("/dest/Action"), &shell);
        assert_eq!(resource.description(), "/dest/Action/");
    }
}

//! Icon resource: a copy of a source directory's icon file placed in a
//! destination directory.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::directory::{DirectoryResource, register};
use super::error::ResourceError;
use super::helpers::fs::{is_up_to_date, remove_existing};
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::identity::IdentityRegistry;
use crate::platform::{ICON_FILE_NAME, Shell};

/// An icon copy that can be checked and applied.
///
/// The destination is `base` joined with `relative`; every directory created
/// on the way is registered so it is not reported as extra later.
#[derive(Debug)]
pub struct IconResource<'a> {
    /// Icon file in the source directory.
    pub source: PathBuf,
    /// Existing destination directory the icon path is relative to.
    pub base: PathBuf,
    /// Icon destination relative to `base` (one or more plain components).
    pub relative: PathBuf,
    shell: &'a dyn Shell,
}

impl<'a> IconResource<'a> {
    /// Create an icon resource copying `source_dir`'s icon into
    /// `base/relative`.
    #[must_use]
    pub fn new(source_dir: &Path, base: PathBuf, relative: PathBuf, shell: &'a dyn Shell) -> Self {
        Self {
            source: source_dir.join(ICON_FILE_NAME),
            base,
            relative,
            shell,
        }
    }

    /// Destination directory receiving the icon.
    #[must_use]
    pub fn destination_dir(&self) -> PathBuf {
        self.base.join(&self.relative)
    }

    /// Path of the icon copy.
    #[must_use]
    pub fn destination(&self) -> PathBuf {
        self.destination_dir().join(ICON_FILE_NAME)
    }

    /// Create the destination directories one level at a time and register
    /// each of them. Links on the way are refused, never followed.
    fn ensure_directories(&self, registry: &mut IdentityRegistry) -> Result<()> {
        let mut current = self.base.clone();
        for component in self.relative.components() {
            current.push(component);
            DirectoryResource::new(current.clone(), self.shell).apply(registry)?;
        }
        Ok(())
    }
}

impl Applicable for IconResource<'_> {
    fn description(&self) -> String {
        format!("{} <- {}", self.destination().display(), self.source.display())
    }

    fn apply(&self, registry: &mut IdentityRegistry) -> Result<ResourceChange> {
        if !self.source.is_file() {
            return Err(ResourceError::SourceNotFound {
                path: self.source.clone(),
            }
            .into());
        }
        self.ensure_directories(registry)?;

        let destination = self.destination();
        match self.current_state()? {
            ResourceState::Correct => {
                register(registry, &destination)?;
                return Ok(ResourceChange::AlreadyCorrect);
            }
            ResourceState::Invalid { reason } => {
                anyhow::bail!("cannot copy icon to {}: {reason}", destination.display());
            }
            ResourceState::Incorrect { .. } => {
                self.shell
                    .unlock_file(&destination)
                    .with_context(|| format!("unlock {}", destination.display()))?;
                remove_existing(&destination)?;
            }
            ResourceState::Missing => {}
        }

        std::fs::copy(&self.source, &destination)
            .map_err(|e| ResourceError::io("copy icon", &destination, e))?;
        self.shell
            .hide_file(&destination)
            .with_context(|| format!("hide {}", destination.display()))?;
        register(registry, &destination)?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for IconResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        let destination = self.destination();
        let Ok(meta) = destination.symlink_metadata() else {
            return Ok(ResourceState::Missing);
        };
        if meta.is_dir() {
            return Ok(ResourceState::Invalid {
                reason: "a directory occupies the icon path".to_string(),
            });
        }
        if meta.file_type().is_symlink() {
            return Ok(ResourceState::Incorrect {
                current: "a link occupies the icon path".to_string(),
            });
        }
        if is_up_to_date(&destination, &self.source)? {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: format!("older than {}", self.source.display()),
            })
        }
    }
}

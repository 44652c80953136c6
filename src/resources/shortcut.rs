//! Shortcut resource: a link from the destination tree to a source directory.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::directory::register;
use super::helpers::fs::{is_up_to_date, remove_existing};
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::identity::IdentityRegistry;
use crate::platform::{Shell, shortcut_path};

/// A shortcut that can be checked and applied.
///
/// The shortcut is up to date when it is at least as new as the category
/// file (`descriptor`) that asked for it; it is never rewritten in that case.
#[derive(Debug)]
pub struct ShortcutResource<'a> {
    /// The source directory the shortcut opens.
    pub target: PathBuf,
    /// Full shortcut path, including the shell's extension.
    pub link: PathBuf,
    /// Category file that describes this shortcut.
    pub descriptor: PathBuf,
    shell: &'a dyn Shell,
}

impl<'a> ShortcutResource<'a> {
    /// Create a shortcut resource named `stem` (the shell's extension is
    /// appended) pointing at `target`.
    #[must_use]
    pub fn new(target: PathBuf, stem: &Path, descriptor: PathBuf, shell: &'a dyn Shell) -> Self {
        Self {
            link: shortcut_path(shell, stem),
            target,
            descriptor,
            shell,
        }
    }
}

impl Applicable for ShortcutResource<'_> {
    fn description(&self) -> String {
        format!("{} -> {}", self.link.display(), self.target.display())
    }

    fn apply(&self, registry: &mut IdentityRegistry) -> Result<ResourceChange> {
        match self.current_state()? {
            ResourceState::Correct => {
                register(registry, &self.link)?;
                return Ok(ResourceChange::AlreadyCorrect);
            }
            ResourceState::Invalid { reason } => {
                anyhow::bail!("cannot create shortcut {}: {reason}", self.link.display());
            }
            ResourceState::Missing | ResourceState::Incorrect { .. } => {}
        }

        remove_existing(&self.link)?;
        self.shell
            .create_shortcut(&self.target, &self.link)
            .with_context(|| format!("create shortcut: {}", self.description()))?;
        register(registry, &self.link)?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for ShortcutResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        let Ok(meta) = self.link.symlink_metadata() else {
            return Ok(ResourceState::Missing);
        };
        if meta.is_dir() {
            return Ok(ResourceState::Invalid {
                reason: "a directory occupies the shortcut path".to_string(),
            });
        }
        if is_up_to_date(&self.link, &self.descriptor)? {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: format!("older than {}", self.descriptor.display()),
            })
        }
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::RecordingShell;
    use filetime::FileTime;

    struct Fixture {
        _tmp: tempfile::TempDir,
        source: PathBuf,
        descriptor: PathBuf,
        dest: PathBuf,
    }

    fn fixture() -> Fixture {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("src").join("movies");
        let dest = tmp.path().join("dst").join("Action");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::create_dir_all(&dest).unwrap();
        let descriptor = source.join(".categories.json");
        std::fs::write(&descriptor, r#"{"Action": true}"#).unwrap();
        Fixture {
            _tmp: tmp,
            source,
            descriptor,
            dest,
        }
    }

    fn set_mtime(path: &Path, secs: i64) {
        filetime::set_symlink_file_times(
            path,
            FileTime::from_unix_time(secs, 0),
            FileTime::from_unix_time(secs, 0),
        )
        .unwrap();
    }

    #[test]
    fn creates_missing_shortcut() {
        let f = fixture();
        let shell = RecordingShell::new();
        let resource = ShortcutResource::new(
            f.source.clone(),
            &f.dest.join("movies"),
            f.descriptor.clone(),
            &shell,
        );
        assert_eq!(resource.current_state().unwrap(), ResourceState::Missing);

        let mut registry = IdentityRegistry::new();
        assert_eq!(resource.apply(&mut registry).unwrap(), ResourceChange::Applied);

        let link = f.dest.join("movies");
        assert_eq!(std::fs::read_link(&link).unwrap(), f.source);
        assert!(registry.owns(&link).unwrap());
    }

    #[test]
    fn fresh_shortcut_is_kept_and_registered() {
        let f = fixture();
        let shell = RecordingShell::new();
        let link = f.dest.join("movies");
        std::os::unix::fs::symlink(&f.source, &link).unwrap();
        set_mtime(&f.descriptor, 1_000_000);
        set_mtime(&link, 1_000_000);

        let resource = ShortcutResource::new(f.source.clone(), &link, f.descriptor.clone(), &shell);
        let mut registry = IdentityRegistry::new();
        assert_eq!(
            resource.apply(&mut registry).unwrap(),
            ResourceChange::AlreadyCorrect
        );
        assert!(registry.owns(&link).unwrap());
        assert!(shell.hooks().is_empty(), "fresh shortcut must not be recreated");
    }

    #[test]
    fn stale_shortcut_is_replaced() {
        let f = fixture();
        let shell = RecordingShell::new();
        let link = f.dest.join("movies");
        std::os::unix::fs::symlink(f.dest.parent().unwrap(), &link).unwrap();
        set_mtime(&link, 1_000_000);
        set_mtime(&f.descriptor, 2_000_000);

        let resource = ShortcutResource::new(f.source.clone(), &link, f.descriptor.clone(), &shell);
        assert!(matches!(
            resource.current_state().unwrap(),
            ResourceState::Incorrect { .. }
        ));

        let mut registry = IdentityRegistry::new();
        assert_eq!(resource.apply(&mut registry).unwrap(), ResourceChange::Applied);
        assert_eq!(std::fs::read_link(&link).unwrap(), f.source);
        assert_eq!(shell.hooks(), ["create_shortcut"]);
    }

    #[test]
    fn directory_at_link_path_is_invalid() {
        let f = fixture();
        let shell = RecordingShell::new();
        let link = f.dest.join("movies");
        std::fs::create_dir(&link).unwrap();

        let resource = ShortcutResource::new(f.source.clone(), &link, f.descriptor.clone(), &shell);
        let mut registry = IdentityRegistry::new();
        let err = resource.apply(&mut registry).unwrap_err();
        assert!(err.to_string().contains("a directory occupies"));
        assert!(registry.is_empty());
    }

    #[test]
    fn description_shows_link_and_target() {
        let shell = RecordingShell::new();
        let resource = ShortcutResource::new(
            PathBuf::from("/src/movies"),
            Path::new("/dst/Action/movies"),
            PathBuf::from("/src/movies/.categories.json"),
            &shell,
        );
        assert_eq!(resource.description(), "/dst/Action/movies -> /src/movies");
    }
}

//! Category interpreter: turns a parsed category document into destination
//! directories, shortcuts and icon copies.
//!
//! Interpretation is a recursive descent over [`CategoryNode`]:
//!
//! - **Object**: each key becomes a directory below the current one and its
//!   value is interpreted inside it.  The reserved [`ICON_KEY`] instead names
//!   icon destinations; icon failures are logged and never stop siblings.
//! - **Array**: every element is interpreted at the current position,
//!   stopping at the first failure.
//! - **`true`**: a shortcut to the source directory is created here, named
//!   after the source directory.  **`false`** does nothing.
//! - **String / number**: one more directory level named after the value,
//!   with a shortcut inside it.
//! - **`null`**: a structural error.
//!
//! Every entry the builders touch is registered in the [`IdentityRegistry`]
//! borrowed by the [`Interpreter`].
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::document::{CategoryDocument, CategoryNode, ICON_KEY};
use crate::error::DocumentError;
use crate::identity::IdentityRegistry;
use crate::logging::Log;
use crate::platform::Shell;
use crate::resources::directory::DirectoryResource;
use crate::resources::icon::IconResource;
use crate::resources::shortcut::ShortcutResource;
use crate::resources::{Applicable as _, ResourceChange};

/// Counters describing what a build pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Directories created.
    pub directories_created: usize,
    /// Directories that already existed.
    pub directories_kept: usize,
    /// Shortcuts created or replaced.
    pub shortcuts_created: usize,
    /// Shortcuts kept because they were up to date.
    pub shortcuts_fresh: usize,
    /// Icons copied or replaced.
    pub icons_copied: usize,
    /// Icons kept because they were up to date.
    pub icons_fresh: usize,
    /// Icon requests that failed (logged, not fatal).
    pub icon_failures: usize,
    /// Directory configurations that failed (logged, not fatal).
    pub configure_failures: usize,
}

impl BuildStats {
    /// Number of shortcut and icon writes performed.
    #[must_use]
    pub const fn recreations(&self) -> usize {
        self.shortcuts_created + self.icons_copied
    }
}

/// The source directory a category document belongs to.
#[derive(Debug)]
struct Origin<'p> {
    /// Directory containing the category file; shortcuts point here.
    source_dir: &'p Path,
    /// The category file itself, used for shortcut freshness.
    descriptor: &'p Path,
    /// Name given to every shortcut created for this document.
    link_name: &'p OsStr,
    /// Destination root, used to report positions.
    dest_root: &'p Path,
}

impl Origin<'_> {
    fn position(&self, dest: &Path) -> String {
        dest.strip_prefix(self.dest_root)
            .unwrap_or(dest)
            .display()
            .to_string()
    }
}

/// Recursive interpreter for category documents.
#[derive(Debug)]
pub struct Interpreter<'a> {
    shell: &'a dyn Shell,
    log: &'a dyn Log,
    registry: &'a mut IdentityRegistry,
    stats: BuildStats,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter that registers everything it builds in
    /// `registry`.
    pub fn new(shell: &'a dyn Shell, log: &'a dyn Log, registry: &'a mut IdentityRegistry) -> Self {
        Self {
            shell,
            log,
            registry,
            stats: BuildStats::default(),
        }
    }

    /// Counters accumulated over every document interpreted so far.
    #[must_use]
    pub const fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Interpret `document`, read from `descriptor`, into `dest_root`.
    ///
    /// Entries built before a failure stay built and registered.
    ///
    /// # Errors
    ///
    /// Returns the first structural or filesystem error; icon errors are
    /// logged instead.
    pub fn interpret_document(
        &mut self,
        document: &CategoryDocument,
        descriptor: &Path,
        dest_root: &Path,
    ) -> Result<()> {
        let source_dir = descriptor
            .parent()
            .with_context(|| format!("{} has no parent directory", descriptor.display()))?;
        let link_name = source_dir.file_name().with_context(|| {
            format!("source directory {} has no name", source_dir.display())
        })?;
        let origin = Origin {
            source_dir,
            descriptor,
            link_name,
            dest_root,
        };
        self.interpret_entries(document.entries(), &origin, dest_root)
    }

    fn interpret_entries(
        &mut self,
        entries: &[(String, CategoryNode)],
        origin: &Origin<'_>,
        dest: &Path,
    ) -> Result<()> {
        for (key, value) in entries {
            if key == ICON_KEY {
                self.apply_icons(value, origin, dest);
                continue;
            }
            let dir = dest.join(segment(key)?);
            self.ensure_directory(&dir)?;
            self.interpret(value, origin, &dir)?;
        }
        Ok(())
    }

    fn interpret(&mut self, node: &CategoryNode, origin: &Origin<'_>, dest: &Path) -> Result<()> {
        match node {
            CategoryNode::Object(entries) => self.interpret_entries(entries, origin, dest),
            CategoryNode::Array(items) => {
                for item in items {
                    self.interpret(item, origin, dest)?;
                }
                Ok(())
            }
            CategoryNode::Boolean(true) => self.ensure_shortcut(origin, dest),
            CategoryNode::Boolean(false) => Ok(()),
            scalar => {
                let Some(value) = scalar.as_segment() else {
                    return Err(DocumentError::UnexpectedNode {
                        found: scalar.kind(),
                        position: origin.position(dest),
                    }
                    .into());
                };
                let dir = dest.join(segment(value)?);
                self.ensure_directory(&dir)?;
                self.ensure_shortcut(origin, &dir)
            }
        }
    }

    fn ensure_directory(&mut self, dir: &Path) -> Result<()> {
        let resource = DirectoryResource::new(dir.to_path_buf(), self.shell);
        match resource.apply(self.registry)? {
            ResourceChange::Applied => {
                self.stats.directories_created += 1;
                self.log.debug(&format!("created {}", resource.description()));
            }
            ResourceChange::AlreadyCorrect => self.stats.directories_kept += 1,
        }
        match resource.configure(self.registry) {
            Ok(metadata) => self.log.debug(&format!("configured {}", metadata.display())),
            Err(e) if e.is_unsupported() => {}
            Err(e) => {
                self.stats.configure_failures += 1;
                self.log.warn(&format!("{e}"));
            }
        }
        Ok(())
    }

    fn ensure_shortcut(&mut self, origin: &Origin<'_>, dir: &Path) -> Result<()> {
        let resource = ShortcutResource::new(
            origin.source_dir.to_path_buf(),
            &dir.join(origin.link_name),
            origin.descriptor.to_path_buf(),
            self.shell,
        );
        match resource.apply(self.registry)? {
            ResourceChange::Applied => {
                self.stats.shortcuts_created += 1;
                self.log.debug(&format!("linked {}", resource.description()));
            }
            ResourceChange::AlreadyCorrect => self.stats.shortcuts_fresh += 1,
        }
        Ok(())
    }

    fn apply_icons(&mut self, value: &CategoryNode, origin: &Origin<'_>, dest: &Path) {
        if let Err(e) = self.apply_icon(value, origin, dest) {
            self.stats.icon_failures += 1;
            self.log.warn(&format!("icon at '{}': {e:#}", origin.position(dest)));
        }
    }

    fn apply_icon(&mut self, value: &CategoryNode, origin: &Origin<'_>, dest: &Path) -> Result<()> {
        match value {
            CategoryNode::Array(items) => {
                for item in items {
                    self.apply_icon(item, origin, dest)?;
                }
                Ok(())
            }
            other => {
                let Some(raw) = other.as_segment() else {
                    return Err(DocumentError::UnexpectedNode {
                        found: other.kind(),
                        position: format!("{}/{ICON_KEY}", origin.position(dest)),
                    }
                    .into());
                };
                let resource = IconResource::new(
                    origin.source_dir,
                    dest.to_path_buf(),
                    icon_segment(raw)?,
                    self.shell,
                );
                match resource.apply(self.registry)? {
                    ResourceChange::Applied => {
                        self.stats.icons_copied += 1;
                        self.log.debug(&format!("copied {}", resource.description()));
                    }
                    ResourceChange::AlreadyCorrect => self.stats.icons_fresh += 1,
                }
                Ok(())
            }
        }
    }
}

/// Validate a key or scalar used as exactly one directory name.
fn segment(raw: &str) -> Result<&Path, DocumentError> {
    let path = Path::new(raw);
    let mut components = path.components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if single && !raw.contains(std::path::is_separator) {
        Ok(path)
    } else {
        Err(DocumentError::InvalidSegment(raw.to_string()))
    }
}

/// Validate an icon destination: one or more plain directory names.
fn icon_segment(raw: &str) -> Result<PathBuf, DocumentError> {
    let path = PathBuf::from(raw);
    let plain = path.components().all(|c| matches!(c, Component::Normal(_)));
    if plain && path.components().next().is_some() {
        Ok(path)
    } else {
        Err(DocumentError::InvalidSegment(raw.to_string()))
    }
}

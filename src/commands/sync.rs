//! The `sync` run: discover, build, reconcile, confirm, delete.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use crate::cli::VERSION;
use crate::config::Settings;
use crate::discovery::discover;
use crate::document::CategoryDocument;
use crate::identity::IdentityRegistry;
use crate::interpreter::{BuildStats, Interpreter};
use crate::logging::{FileOutcome, Log};
use crate::platform::Shell;
use crate::prompt::Confirm;
use crate::reconcile::{DeletionReport, ExtraEntry, delete_extras, scan};
use crate::resources::directory::DirectoryResource;

/// What a synchronization run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Category files found under the source root.
    pub files: Vec<PathBuf>,
    /// Category files whose interpretation stopped at an error.
    pub failed_files: Vec<PathBuf>,
    /// Build counters over all category files.
    pub stats: BuildStats,
    /// Extra entries found after the build pass.
    pub extras: Vec<ExtraEntry>,
    /// Deletion outcome; `None` when nothing was deleted.
    pub deletion: Option<DeletionReport>,
    /// Whether the deletion prompt was answered negatively.
    pub refused: bool,
}

/// Run one synchronization pass.
///
/// Per-file failures are logged and recorded but do not stop the run, and a
/// refused deletion is not an error.
///
/// # Errors
///
/// Returns an error if the destination cannot be prepared, the source tree
/// cannot be walked, the destination cannot be scanned, or the confirmation
/// cannot be read.
pub fn run(
    mut settings: Settings,
    shell: &dyn Shell,
    confirm: &dyn Confirm,
    log: &dyn Log,
) -> Result<SyncReport> {
    log.info(&format!("classifier {VERSION}"));
    settings.prepare_destination()?;
    let dest = settings.destination_dir.as_path();
    let mut registry = IdentityRegistry::new();
    let mut report = SyncReport::default();

    log.stage("Preparing destination");
    log.info(&format!("source: {}", settings.source_dir.display()));
    log.info(&format!("destination: {}", dest.display()));
    configure_root(dest, shell, &mut registry, log);

    log.stage("Discovering category files");
    report.files = discover(&settings.source_dir, &settings.categories_file)?;
    log.info(&format!(
        "found {} '{}' file(s)",
        report.files.len(),
        settings.categories_file
    ));

    log.stage("Building destination tree");
    let mut interpreter = Interpreter::new(shell, log, &mut registry);
    for file in &report.files {
        let outcome = CategoryDocument::load(file)
            .map_err(anyhow::Error::from)
            .and_then(|document| interpreter.interpret_document(&document, file, dest));
        match outcome {
            Ok(()) => log.record_file(file.clone(), FileOutcome::Ok, None),
            Err(e) => {
                let message = format!("{e:#}");
                log.error(&format!("{}: {message}", file.display()));
                log.record_file(file.clone(), FileOutcome::Failed, Some(&message));
                report.failed_files.push(file.clone());
            }
        }
    }
    report.stats = interpreter.stats();
    log.debug(&format!("{} destination entries owned", registry.len()));
    log.info(&format!(
        "{} directories created, {} shortcuts created ({} up to date), {} icons copied ({} up to date)",
        report.stats.directories_created,
        report.stats.shortcuts_created,
        report.stats.shortcuts_fresh,
        report.stats.icons_copied,
        report.stats.icons_fresh,
    ));

    log.stage("Checking for extra entries");
    report.extras = scan(dest, &registry, shell)?;
    if report.extras.is_empty() {
        log.info("no extra entries");
        return Ok(report);
    }
    for extra in &report.extras {
        log.warn(&extra.to_string());
    }

    let question = format!("Delete {} extra entries?", report.extras.len());
    if !confirm.confirm(&question).context("read confirmation")? {
        log.info("Abort.");
        report.refused = true;
        return Ok(report);
    }

    log.stage("Removing extra entries");
    let deletion = delete_extras(dest, &registry, shell, log)?;
    if !deletion.failed.is_empty() {
        log.warn(&format!(
            "{} of {} extra entries could not be removed",
            deletion.failed.len(),
            deletion.failed.len() + deletion.removed.len()
        ));
    }
    report.deletion = Some(deletion);
    Ok(report)
}

/// Configure the destination root once, announcing an unsupported platform.
fn configure_root(dest: &Path, shell: &dyn Shell, registry: &mut IdentityRegistry, log: &dyn Log) {
    match DirectoryResource::new(dest.to_path_buf(), shell).configure(registry) {
        Ok(metadata) => log.debug(&format!("configured {}", metadata.display())),
        Err(e) if e.is_unsupported() => {
            log.info(&format!("{e}; folders keep their default view"));
        }
        Err(e) => log.warn(&format!("{e}")),
    }
}

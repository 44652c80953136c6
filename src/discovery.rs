//! Category file discovery under the source root.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use regex::bytes::Regex;
use walkdir::WalkDir;

/// Pattern matching exactly the file name `name`, with every regex
/// metacharacter escaped. It matches raw file name bytes, so names that are
/// not valid UTF-8 are compared rather than skipped.
///
/// # Errors
///
/// Returns an error if the escaped pattern cannot be compiled.
pub fn category_pattern(name: &str) -> Result<Regex> {
    Regex::new(&format!("^{}$", regex::escape(name)))
        .with_context(|| format!("build pattern for category file '{name}'"))
}

/// Find every regular file named `name` under `root`, in a stable order.
///
/// Symbolic links are neither followed nor returned.
///
/// # Errors
///
/// Returns an error if the tree cannot be walked.
pub fn discover(root: &Path, name: &str) -> Result<Vec<PathBuf>> {
    let pattern = category_pattern(name)?;
    let mut found = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("walk {}", root.display()))?;
        if entry.file_type().is_file() && pattern.is_match(entry.file_name().as_encoded_bytes()) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

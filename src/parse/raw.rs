//! Raw-list data blocks: file paths and globs with `skip`/`path` directives.
use std::collections::HashSet;
use std::path::PathBuf;

use super::paths::expand_entry;
use crate::error::{PyphotFileError, Result};

/// A classified line of a raw-list data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawDirective<'a> {
    /// Files to read.
    Include(&'a str),
    /// Files to drop from the inclusions.
    Skip(&'a str),
    /// Base directory for subsequent relative entries.
    Path(&'a str),
}

impl<'a> RawDirective<'a> {
    /// Classify a single block line.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyphot_file::parse::raw::RawDirective;
    ///
    /// assert_eq!(RawDirective::classify("skip bad.fits"), RawDirective::Skip("bad.fits"));
    /// assert_eq!(RawDirective::classify("path /raw"), RawDirective::Path("/raw"));
    /// assert_eq!(RawDirective::classify("*.fits"), RawDirective::Include("*.fits"));
    /// ```
    #[must_use]
    pub fn classify(line: &'a str) -> Self {
        match line.split_once(char::is_whitespace) {
            Some(("skip", rest)) => Self::Skip(rest.trim()),
            Some(("path", rest)) => Self::Path(rest.trim()),
            _ => Self::Include(line),
        }
    }
}

/// Resolve the lines of a raw-list data block into a file list.
///
/// Duplicate inclusions or skips produce a warning and are collapsed,
/// keeping the first occurrence. With `file_check`, every resulting file
/// must exist.
///
/// # Errors
///
/// Returns [`PyphotFileError::FileNotFound`] naming the first missing file
/// when `file_check` is set.
pub fn read_file_names(lines: &[String], file_check: bool) -> Result<Vec<PathBuf>> {
    let mut include = Vec::new();
    let mut skip = Vec::new();
    let mut current_path: Option<PathBuf> = None;

    for line in lines {
        match RawDirective::classify(line) {
            RawDirective::Skip(expr) => skip.extend(expand_entry(expr, current_path.as_deref())),
            RawDirective::Path(dir) => current_path = Some(PathBuf::from(dir)),
            RawDirective::Include(expr) => {
                include.extend(expand_entry(expr, current_path.as_deref()));
            }
        }
    }

    let skip = dedup("skip", skip);
    let include = dedup("read", include);
    let skipped: HashSet<&PathBuf> = skip.iter().collect();
    let files: Vec<PathBuf> = include
        .into_iter()
        .filter(|file| !skipped.contains(file))
        .collect();

    if file_check && let Some(missing) = files.iter().find(|file| !file.is_file()) {
        return Err(PyphotFileError::FileNotFound(missing.clone()));
    }
    Ok(files)
}

/// Collapse duplicates, warning if any were present.
fn dedup(kind: &str, entries: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let total = entries.len();
    let unique: Vec<PathBuf> = entries
        .into_iter()
        .filter(|entry| seen.insert(entry.clone()))
        .collect();
    if unique.len() != total {
        tracing::warn!("There are duplicated files to {kind}.");
    }
    unique
}

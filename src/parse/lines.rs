//! Line loading: read a pyphot file into cleaned, comment-free lines.
use std::path::Path;

use crate::error::{PyphotFileError, Result};

/// Read `path` and return its cleaned lines.
///
/// # Errors
///
/// Returns [`PyphotFileError::FileNotFound`] if `path` does not exist, or
/// [`PyphotFileError::Io`] if it cannot be read.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(PyphotFileError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| PyphotFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(clean_lines(&content))
}

/// Clean raw file content into an ordered line sequence.
///
/// Tabs become spaces, surrounding whitespace is trimmed, blank and
/// comment-only lines are dropped, and anything after an inline `#` is cut.
///
/// # Examples
///
/// ```
/// use pyphot_file::parse::lines::clean_lines;
///
/// let lines = clean_lines("# banner\n[rdx]\n\tcamera = lbc  # blue arm\n\n");
/// assert_eq!(lines, ["[rdx]", "camera = lbc"]);
/// ```
#[must_use]
pub fn clean_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.replace(['\t', '\r'], " ").trim().to_string())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| strip_inline_comment(&line).to_string())
        .collect()
}

/// Truncate a line at its first `#`.
fn strip_inline_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(head, _)| head.trim_end())
}

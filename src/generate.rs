//! Writing pyphot files.
//!
//! The output mirrors what [`crate::parse`] reads: a banner, the
//! configuration lines, an optional `setup` block and the `data` block.
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use crate::config::{ConfigTree, ConfigValue};
use crate::error::{PyphotFileError, Result};

/// Everything needed to write a pyphot file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PyphotFileContents {
    /// Camera identifier, used for the default configuration lines.
    pub camera: String,
    /// Data files, one per line of the data block.
    pub data_files: Vec<String>,
    /// Configuration lines; `None` writes the default `[rdx]` section.
    pub cfg_lines: Option<Vec<String>>,
    /// Whether the file is written by the setup step.
    pub setup_mode: bool,
    /// Lines of the setup block; `None` omits the block.
    pub setup_lines: Option<Vec<String>>,
    /// Extra data-block lines, usually a rendered table.
    pub sorted_files: Option<Vec<String>>,
    /// Search paths, written as `path` directives.
    pub paths: Option<Vec<PathBuf>>,
}

impl PyphotFileContents {
    /// Start contents for `camera` with no data files.
    #[must_use]
    pub fn new(camera: impl Into<String>) -> Self {
        Self {
            camera: camera.into(),
            ..Self::default()
        }
    }

    /// Configuration lines to write, falling back to the defaults.
    #[must_use]
    pub fn effective_cfg_lines(&self) -> Vec<String> {
        if let Some(lines) = &self.cfg_lines {
            return lines.clone();
        }
        let mut lines = vec!["[rdx]".to_string(), format!("    camera = {}", self.camera)];
        if self.setup_mode {
            lines.push("    setup = True".to_string());
        }
        lines
    }

    fn validate(&self) -> Result<()> {
        if self.cfg_lines.is_none() && self.camera.trim().is_empty() {
            return Err(PyphotFileError::InvalidArgument(
                "a camera name is required when no configuration lines are given".to_string(),
            ));
        }
        let single_line = |kind: &str, entry: &str| {
            if entry.contains(['\n', '\r']) {
                Err(PyphotFileError::InvalidArgument(format!(
                    "{kind} entries must be single lines: {entry:?}"
                )))
            } else {
                Ok(())
            }
        };
        single_line("camera", &self.camera)?;
        for file in &self.data_files {
            if file.trim().is_empty() {
                return Err(PyphotFileError::InvalidArgument(
                    "data file entries must not be empty".to_string(),
                ));
            }
            single_line("data file", file)?;
        }
        for line in self.setup_lines.iter().flatten() {
            single_line("setup", line)?;
        }
        for line in self.sorted_files.iter().flatten() {
            single_line("sorted file", line)?;
        }
        for path in self.paths.iter().flatten() {
            single_line("path", &path.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Render `contents` as file content, stamped with `timestamp`.
///
/// # Errors
///
/// Returns [`PyphotFileError::InvalidArgument`] if the contents cannot be
/// written as a well-formed file.
pub fn render(contents: &PyphotFileContents, timestamp: &str) -> Result<String> {
    contents.validate()?;
    let mut out = Vec::new();
    out.push("# Auto-generated PyPhot file".to_string());
    out.push(format!("# {timestamp}"));
    out.push(String::new());
    out.push("# User-defined execution parameters".to_string());
    out.extend(contents.effective_cfg_lines());
    out.push(String::new());

    if let Some(setup_lines) = &contents.setup_lines {
        out.push("# Setup".to_string());
        out.push("setup read".to_string());
        out.extend(setup_lines.iter().map(|line| format!(" {line}")));
        out.push("setup end".to_string());
        out.push(String::new());
    }

    out.push("# Read in the data".to_string());
    out.push("data read".to_string());
    out.extend(
        contents.paths
            .iter()
            .flatten()
            .map(|path| format!(" path {}", path.display())),
    );
    out.extend(contents.data_files.iter().map(|file| format!(" {file}")));
    out.extend(contents.sorted_files.iter().flatten().cloned());
    out.push("data end".to_string());
    out.push(String::new());

    Ok(out.join("\n"))
}

/// Write a pyphot file to `path`, stamped with the current local time.
///
/// # Errors
///
/// - [`PyphotFileError::InvalidArgument`] if `contents` is rejected.
/// - [`PyphotFileError::Io`] if the file cannot be written.
pub fn make_pyphot_file(path: &Path, contents: &PyphotFileContents) -> Result<()> {
    let timestamp = chrono::Local::now().format("%a %d %b %Y %H:%M:%S").to_string();
    let content = render(contents, &timestamp)?;
    let io_err = |source| PyphotFileError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    writer.write_all(content.as_bytes()).map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    tracing::info!("PyPhot file written to: {}", path.display());
    Ok(())
}

/// Render a configuration tree as `key: value` lines.
///
/// Keys are right-justified to the longest key of their section plus four
/// columns per `level`; nested sections follow their `key:` line one level
/// deeper. This is the form used for the body of a setup block.
///
/// # Examples
///
/// ```
/// use pyphot_file::config::{ConfigTree, ConfigValue};
/// use pyphot_file::generate::tree_to_lines;
///
/// let setup: ConfigTree = [("filter", ConfigValue::from("r")), ("binning", ConfigValue::from("1,1"))]
///     .into_iter()
///     .collect();
/// let tree: ConfigTree = [("Setup A", ConfigValue::Section(setup))].into_iter().collect();
/// assert_eq!(
///     tree_to_lines(&tree, 0),
///     ["Setup A:", "     filter: r", "    binning: 1,1"]
/// );
/// ```
#[must_use]
pub fn tree_to_lines(tree: &ConfigTree, level: usize) -> Vec<String> {
    let width = tree.iter().map(|(k, _)| k.len()).max().unwrap_or_default() + level * 4;
    let mut lines = Vec::new();
    for (key, value) in tree.iter() {
        match value {
            ConfigValue::Section(child) => {
                lines.push(format!("{key:>width$}:"));
                lines.extend(tree_to_lines(child, level + 1));
            }
            other => lines.push(format!("{key:>width$}: {other}")),
        }
    }
    lines
}

//! Domain-specific error types for pyphot file handling.
//!
//! Library modules return typed errors built with [`thiserror`]; the command
//! handlers at the CLI boundary convert them to [`anyhow::Error`] through the
//! standard `?` operator and attach context there.
//!
//! # Error hierarchy
//!
//! ```text
//! PyphotFileError
//! ├── FileNotFound         source file or a checked data file is missing
//! ├── BlockFormat          bad block layout or missing table column
//! ├── ColumnMismatch       table row width differs from the header
//! ├── InvalidArgument      rejected generator input
//! ├── Io                   read/write failure
//! └── Config(ConfigError)  configuration line syntax
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for reading and writing pyphot files.
#[derive(Error, Debug)]
pub enum PyphotFileError {
    /// The file to parse, or a data file under `file_check`, does not exist.
    #[error("File does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A block marker or a required table column is missing or malformed.
    #[error("Invalid '{block}' block: {message}")]
    BlockFormat {
        /// Name of the offending block (`data`, `setup`).
        block: String,
        /// Human-readable description of the problem.
        message: String,
    },

    /// A table row does not have the same number of cells as the header.
    #[error("Data and header lines have mismatched columns in row {row}: expected {expected}, found {found}")]
    ColumnMismatch {
        /// One-based row number within the table body.
        row: usize,
        /// Number of header columns.
        expected: usize,
        /// Number of cells found in the row.
        found: usize,
    },

    /// The caller supplied an argument the generator cannot serialise.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An I/O error occurred while reading or writing a file.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// Path to the file being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration lines could not be tokenised.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PyphotFileError {
    /// Shorthand for a [`PyphotFileError::BlockFormat`] error.
    pub(crate) fn block(block: &str, message: impl Into<String>) -> Self {
        Self::BlockFormat {
            block: block.to_string(),
            message: message.into(),
        }
    }
}

/// Errors that arise while tokenising configuration lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A line is neither a section header nor a `key = value` entry.
    #[error("Invalid syntax at line {line}: {message}")]
    InvalidSyntax {
        /// One-based line number within the configuration lines.
        line: usize,
        /// Human-readable description of the problem.
        message: String,
    },

    /// A nested section header skips a level (e.g. `[[[c]]]` under `[a]`).
    #[error("Section '{section}' at line {line} is nested too deeply")]
    NestingTooDeep {
        /// Name of the offending section.
        section: String,
        /// One-based line number within the configuration lines.
        line: usize,
    },
}

/// Convenience alias for results carrying a [`PyphotFileError`].
pub type Result<T, E = PyphotFileError> = std::result::Result<T, E>;

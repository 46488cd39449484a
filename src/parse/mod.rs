//! Reading pyphot files.
//!
//! A pyphot file is made of free-form configuration lines plus two named
//! blocks:
//!
//! ```text
//! [rdx]
//!     camera = lbc_b
//!
//! setup read
//!     Setup A:
//! setup end
//!
//! data read
//!  path /data/raw
//! | filename  | frametype |
//! | img1.fits |   science |
//! data end
//! ```
//!
//! [`parse_pyphot_file`] returns everything; [`parse_cfg_lines`] returns
//! only the configuration lines.

pub mod block;
pub mod lines;
pub mod paths;
pub mod raw;
pub mod setup;
pub mod table;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use self::block::{BlockSpan, DataFormat, detect_data_format, find_block};
use self::table::{DataTable, TableBlock};
use crate::error::{PyphotFileError, Result};

/// Name of the block listing the raw data files.
pub const DATA_BLOCK: &str = "data";

/// Name of the block listing instrument setups.
pub const SETUP_BLOCK: &str = "setup";

/// Options controlling how strictly a pyphot file is vetted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Require every data file to exist on disk.
    pub file_check: bool,
    /// Require a complete file fit for a reduction run: closed blocks, a
    /// data block, and at least one setup.
    pub runtime: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            file_check: true,
            runtime: false,
        }
    }
}

/// The data block, in whichever layout the file used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum DataBlock {
    /// Paths and globs, resolved to files.
    RawList {
        /// Resolved, de-duplicated files.
        files: Vec<PathBuf>,
    },
    /// A table with at least `filename` and `frametype` columns.
    Table {
        /// Resolved path of every row's file, in row order.
        files: Vec<PathBuf>,
        /// Bare filename to frame type.
        frametypes: BTreeMap<String, String>,
        /// The parsed table.
        table: DataTable,
    },
}

impl DataBlock {
    /// Layout of this block.
    #[must_use]
    pub const fn format(&self) -> DataFormat {
        match self {
            Self::RawList { .. } => DataFormat::RawList,
            Self::Table { .. } => DataFormat::Table,
        }
    }

    /// Resolved data files.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        match self {
            Self::RawList { files } | Self::Table { files, .. } => files,
        }
    }

    /// Frame-type mapping; only table blocks carry one.
    #[must_use]
    pub const fn frametypes(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::RawList { .. } => None,
            Self::Table { frametypes, .. } => Some(frametypes),
        }
    }

    /// Parsed table; only table blocks carry one.
    #[must_use]
    pub const fn table(&self) -> Option<&DataTable> {
        match self {
            Self::RawList { .. } => None,
            Self::Table { table, .. } => Some(table),
        }
    }
}

impl From<TableBlock> for DataBlock {
    fn from(block: TableBlock) -> Self {
        Self::Table {
            files: block.files,
            frametypes: block.frametypes,
            table: block.table,
        }
    }
}

/// Everything read from a pyphot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PyphotFile {
    /// Lines outside the `data` and `setup` blocks.
    pub cfg_lines: Vec<String>,
    /// The data block.
    pub data: DataBlock,
    /// Setup names, in file order.
    pub setups: Vec<String>,
}

/// Read and parse the pyphot file at `path`.
///
/// # Errors
///
/// - [`PyphotFileError::FileNotFound`] if `path` or, under `file_check`, a
///   data file does not exist.
/// - [`PyphotFileError::BlockFormat`] for overlapping blocks or a malformed
///   table, and in runtime mode for a missing or unclosed block or an empty
///   setup list.
/// - [`PyphotFileError::ColumnMismatch`] for a ragged table.
pub fn parse_pyphot_file(path: &Path, options: ParseOptions) -> Result<PyphotFile> {
    let lines = lines::read_lines(path)?;
    let parsed = parse_pyphot_lines(&lines, options)?;
    tracing::info!("Input file loaded successfully: {}", path.display());
    Ok(parsed)
}

/// Parse pyphot file content already held in memory.
///
/// # Errors
///
/// See [`parse_pyphot_file`].
pub fn parse_pyphot_str(content: &str, options: ParseOptions) -> Result<PyphotFile> {
    parse_pyphot_lines(&lines::clean_lines(content), options)
}

/// Return only the configuration lines of the pyphot file at `path`.
///
/// Data and setup blocks are located and dropped without being parsed, so
/// no data file is touched.
///
/// # Errors
///
/// Returns [`PyphotFileError::FileNotFound`] if `path` does not exist.
pub fn parse_cfg_lines(path: &Path) -> Result<Vec<String>> {
    let lines = lines::read_lines(path)?;
    let data = find_block(&lines, DATA_BLOCK);
    let setup = find_block(&lines, SETUP_BLOCK);
    let spans = [data.stopped_before(setup.start), setup.stopped_before(data.start)];
    Ok(config_lines(&lines, &spans))
}

/// Parse cleaned lines into a [`PyphotFile`].
///
/// # Errors
///
/// See [`parse_pyphot_file`].
pub fn parse_pyphot_lines(lines: &[String], options: ParseOptions) -> Result<PyphotFile> {
    let data_span = located(lines, DATA_BLOCK, options)?;
    let setup_span = located(lines, SETUP_BLOCK, options)?;
    let (data_span, setup_span) = (
        data_span.stopped_before(setup_span.start),
        setup_span.stopped_before(data_span.start),
    );
    if data_span.overlaps(&setup_span, lines.len()) {
        return Err(PyphotFileError::block(
            DATA_BLOCK,
            "the data and setup blocks overlap",
        ));
    }

    let data = if data_span.is_found() {
        read_data_block(data_span.content(lines), options.file_check)?
    } else if options.runtime {
        return Err(PyphotFileError::block(DATA_BLOCK, "no data block; add 'data read' ... 'data end'"));
    } else {
        tracing::warn!("You haven't specified any data!");
        DataBlock::RawList { files: Vec::new() }
    };
    if data.files().is_empty() {
        tracing::warn!("There are no raw data frames; perhaps the path to the data is incorrect?");
    } else {
        tracing::info!("Found {} raw data frames", data.files().len());
    }

    let setups = setup::parse_setup_lines(setup_span.content(lines));
    if setups.is_empty() {
        if options.runtime {
            return Err(PyphotFileError::block(
                SETUP_BLOCK,
                "add setup info to your pyphot file in the setup block",
            ));
        }
        tracing::warn!("No setup found in the setup block");
    }

    Ok(PyphotFile {
        cfg_lines: config_lines(lines, &[data_span, setup_span]),
        data,
        setups,
    })
}

/// Locate `name`, applying the unclosed-block policy.
fn located(lines: &[String], name: &str, options: ParseOptions) -> Result<BlockSpan> {
    let span = find_block(lines, name);
    tracing::debug!("{name} block span: {:?}..{:?}", span.start, span.end);
    if span.is_unclosed() {
        if options.runtime {
            return Err(PyphotFileError::block(name, format!("missing '{name} end'")));
        }
        tracing::warn!("Missing '{name} end'; reading the {name} block up to the next block or the end of the file");
    }
    Ok(span)
}

/// Dispatch the data block to the parser for its layout.
fn read_data_block(content: &[String], file_check: bool) -> Result<DataBlock> {
    match detect_data_format(content) {
        DataFormat::RawList => Ok(DataBlock::RawList {
            files: raw::read_file_names(content, file_check)?,
        }),
        DataFormat::Table => Ok(table::read_file_table(content, file_check)?.into()),
    }
}

/// Lines not occupied by any of `spans`.
fn config_lines(lines: &[String], spans: &[BlockSpan]) -> Vec<String> {
    let occupied: Vec<_> = spans.iter().filter_map(|s| s.occupied(lines.len())).collect();
    lines
        .iter()
        .enumerate()
        .filter(|(idx, _)| !occupied.iter().any(|range| range.contains(idx)))
        .map(|(_, line)| line.clone())
        .collect()
}

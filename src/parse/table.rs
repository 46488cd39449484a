//! Table-form data blocks: a `|`-delimited header followed by one row per file.
use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use super::paths::resolve_in_roots;
use super::raw::RawDirective;
use crate::error::{PyphotFileError, Result};

/// Column holding the bare file name.
pub const FILENAME_COLUMN: &str = "filename";

/// Column holding the frame type.
pub const FRAMETYPE_COLUMN: &str = "frametype";

/// A named table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name from the header line.
    pub name: String,
    /// Cell values, one per row.
    pub values: Vec<String>,
}

/// Column-oriented table read from a data block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataTable {
    columns: Vec<Column>,
}

impl DataTable {
    /// Assemble a table from a header and its rows.
    ///
    /// # Errors
    ///
    /// Returns [`PyphotFileError::ColumnMismatch`] if any row has a
    /// different number of cells than the header.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let mut columns: Vec<Column> = header
            .into_iter()
            .map(|name| Column {
                name,
                values: Vec::with_capacity(rows.len()),
            })
            .collect();
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(PyphotFileError::ColumnMismatch {
                    row: idx + 1,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.values.push(cell);
            }
        }
        Ok(Self { columns })
    }

    /// Column names in header order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Values of the column called `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Whether a column called `name` exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Number of columns.
    #[must_use]
    pub const fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Cells of row `idx` in column order.
    #[must_use]
    pub fn row(&self, idx: usize) -> Option<Vec<&str>> {
        self.columns
            .iter()
            .map(|c| c.values.get(idx).map(String::as_str))
            .collect()
    }

    /// Render the table as fixed-width `| a | b |` lines, header first.
    ///
    /// The output is accepted back by [`read_file_table`], which makes it
    /// suitable as the data-block annotation lines of a generated file.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyphot_file::parse::table::DataTable;
    ///
    /// let table = DataTable::from_rows(
    ///     vec!["filename".into(), "frametype".into()],
    ///     vec![vec!["img1.fits".into(), "science".into()]],
    /// )
    /// .unwrap();
    /// assert_eq!(
    ///     table.to_lines(),
    ///     ["|  filename | frametype |", "| img1.fits |   science |"]
    /// );
    /// ```
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| {
                c.values
                    .iter()
                    .map(String::len)
                    .chain(std::iter::once(c.name.len()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();
        let render = |cells: Vec<&str>| {
            let body: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!(" {cell:>width$} "))
                .collect();
            format!("|{}|", body.join("|"))
        };
        let mut lines = vec![render(self.column_names().collect())];
        lines.extend((0..self.n_rows()).filter_map(|idx| self.row(idx)).map(render));
        lines
    }
}

/// Result of parsing a table-form data block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    /// Resolved path of every row's file, in row order.
    pub files: Vec<PathBuf>,
    /// Bare filename to frame type.
    pub frametypes: BTreeMap<String, String>,
    /// The parsed table.
    pub table: DataTable,
}

/// Split a `| a | b |` line into trimmed cells.
fn split_cells(line: &str) -> Vec<String> {
    let cells: Vec<&str> = line.split('|').map(str::trim).collect();
    match cells.as_slice() {
        [_, inner @ .., _] => inner.iter().map(ToString::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Parse the lines of a table-form data block.
///
/// Leading `path <dir>` lines register candidate roots, searched in order
/// to resolve each `filename`.
///
/// # Errors
///
/// - [`PyphotFileError::BlockFormat`] if the header is missing or lacks the
///   `filename`/`frametype` columns.
/// - [`PyphotFileError::ColumnMismatch`] if a row's width differs from the
///   header's.
/// - [`PyphotFileError::FileNotFound`] if `file_check` is set and a file
///   exists under none of the roots.
pub fn read_file_table(lines: &[String], file_check: bool) -> Result<TableBlock> {
    let roots: Vec<PathBuf> = lines
        .iter()
        .map_while(|line| match RawDirective::classify(line) {
            RawDirective::Path(dir) => Some(PathBuf::from(dir)),
            _ => None,
        })
        .collect();

    let mut body = lines.iter().skip(roots.len());
    let header_line = body
        .next()
        .filter(|line| line.starts_with('|'))
        .ok_or_else(|| PyphotFileError::block("data", "expected a '|' header line after the path lines"))?;
    let rows: Vec<Vec<String>> = body.map(|line| split_cells(line)).collect();
    let table = DataTable::from_rows(split_cells(header_line), rows)?;
    if let Some(required) = [FILENAME_COLUMN, FRAMETYPE_COLUMN]
        .into_iter()
        .find(|name| !table.has_column(name))
    {
        return Err(PyphotFileError::block(
            "data",
            format!("table is missing the '{required}' column"),
        ));
    }

    let filenames = table.column(FILENAME_COLUMN).unwrap_or_default();
    let frametypes_col = table.column(FRAMETYPE_COLUMN).unwrap_or_default();
    let frametypes: BTreeMap<String, String> = filenames
        .iter()
        .cloned()
        .zip(frametypes_col.iter().cloned())
        .collect();

    let mut files = Vec::with_capacity(filenames.len());
    for filename in filenames {
        let (path, exists) = resolve_in_roots(filename, &roots);
        if file_check && !exists {
            return Err(PyphotFileError::FileNotFound(path));
        }
        files.push(path);
    }

    tracing::debug!(
        "table block: {} columns, {} rows, {} search paths",
        table.n_columns(),
        table.n_rows(),
        roots.len()
    );
    Ok(TableBlock {
        files,
        frametypes,
        table,
    })
}

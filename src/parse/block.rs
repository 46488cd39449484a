//! Block location and data-format detection.
//!
//! A block is delimited by a `<name> read` line and a `<name> end` line.
//! The content of a block is the open interval between the two markers.
use serde::Serialize;

/// Marker token that opens a block.
const READ_MARKER: &str = "read";

/// Marker token that closes a block.
const END_MARKER: &str = "end";

/// Line indices of a block's `read` and `end` markers.
///
/// `None` means the marker was not found.
///
/// # Examples
///
/// ```
/// use pyphot_file::parse::block::find_block;
///
/// let lines: Vec<String> = ["[rdx]", "data read", "a.fits", "data end"]
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// let span = find_block(&lines, "data");
/// assert_eq!((span.start, span.end), (Some(1), Some(3)));
/// assert_eq!(span.content(&lines), ["a.fits"]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BlockSpan {
    /// Index of the `<name> read` line.
    pub start: Option<usize>,
    /// Index of the `<name> end` line.
    pub end: Option<usize>,
    /// Line where an unclosed block stops early; `None` runs it to the end.
    #[serde(skip)]
    pub stop: Option<usize>,
}

impl BlockSpan {
    /// Whether a `read` marker was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.start.is_some()
    }

    /// Whether the block was opened but never closed.
    #[must_use]
    pub const fn is_unclosed(&self) -> bool {
        self.start.is_some() && self.end.is_none()
    }

    /// Index range of the lines occupied by the block, markers included.
    ///
    /// An unclosed block extends to its stop line, or to the end of the
    /// line sequence.
    #[must_use]
    pub fn occupied(&self, n_lines: usize) -> Option<std::ops::Range<usize>> {
        let start = self.start?;
        let end = self
            .end
            .map_or_else(|| self.stop.unwrap_or(n_lines), |end| end + 1);
        Some(start..end)
    }

    /// Stop an unclosed block at `next`, the `read` line of a later block.
    ///
    /// Closed blocks and blocks opening after `next` are returned unchanged.
    #[must_use]
    pub const fn stopped_before(self, next: Option<usize>) -> Self {
        match (self.start, self.end, next) {
            (Some(start), None, Some(next)) if next > start => Self {
                stop: Some(next),
                ..self
            },
            _ => self,
        }
    }

    /// Lines strictly between the markers.
    ///
    /// Returns an empty slice when the block was not found. An unclosed
    /// block yields everything after its `read` line up to its stop line.
    #[must_use]
    pub fn content<'a>(&self, lines: &'a [String]) -> &'a [String] {
        let Some(start) = self.start else {
            return &[];
        };
        let end = self.end.or(self.stop).unwrap_or(lines.len());
        lines.get(start + 1..end).unwrap_or_default()
    }

    /// Whether two spans occupy any common line.
    #[must_use]
    pub fn overlaps(&self, other: &Self, n_lines: usize) -> bool {
        match (self.occupied(n_lines), other.occupied(n_lines)) {
            (Some(a), Some(b)) => a.start < b.end && b.start < a.end,
            _ => false,
        }
    }
}

/// Locate the block called `name` in `lines`.
///
/// Only the first `<name> read` line opens the block; the first
/// `<name> end` after it closes the block and stops the scan.
#[must_use]
pub fn find_block(lines: &[String], name: &str) -> BlockSpan {
    let mut span = BlockSpan::default();
    for (idx, line) in lines.iter().enumerate() {
        let mut tokens = line.split_whitespace();
        let (Some(first), Some(second)) = (tokens.next(), tokens.next()) else {
            continue;
        };
        if first != name {
            continue;
        }
        if span.start.is_none() && second == READ_MARKER {
            span.start = Some(idx);
        } else if span.start.is_some() && second == END_MARKER {
            span.end = Some(idx);
            break;
        }
    }
    span
}

/// Layout of a data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFormat {
    /// File paths or glob patterns, with optional `skip`/`path` directives.
    RawList,
    /// A `|`-delimited header and rows.
    Table,
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::RawList => "raw list",
            Self::Table => "table",
        })
    }
}

/// Decide the layout of a data block from its content lines.
///
/// # Examples
///
/// ```
/// use pyphot_file::parse::block::{DataFormat, detect_data_format};
///
/// let raw = vec!["a.fits".to_string(), "b.fits".to_string()];
/// assert_eq!(detect_data_format(&raw), DataFormat::RawList);
///
/// let table = vec!["| filename | frametype |".to_string(), "| a.fits | object |".to_string()];
/// assert_eq!(detect_data_format(&table), DataFormat::Table);
/// ```
#[must_use]
pub fn detect_data_format(lines: &[String]) -> DataFormat {
    if lines.iter().any(|line| line.starts_with('|')) {
        DataFormat::Table
    } else {
        DataFormat::RawList
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn block_not_found() {
        let span = find_block(&lines(&["[rdx]", "camera = lbc"]), "data");
        assert_eq!(span, BlockSpan::default());
        assert!(!span.is_found());
    }

    #[test]
    fn block_unclosed() {
        let lines = lines(&["data read", "a.fits", "b.fits"]);
        let span = find_block(&lines, "data");
        assert_eq!((span.start, span.end), (Some(0), None));
        assert!(span.is_unclosed());
        assert_eq!(span.content(&lines), ["a.fits", "b.fits"]);
    }

    #[test]
    fn unclosed_block_stops_at_next_block() {
        let lines = lines(&["setup read", "Setup A", "data read", "a.fits", "data end"]);
        let data = find_block(&lines, "data");
        let setup = find_block(&lines, "setup").stopped_before(data.start);
        assert_eq!(setup.stop, Some(2));
        assert_eq!(setup.content(&lines), ["Setup A"]);
        assert_eq!(setup.occupied(lines.len()), Some(0..2));
        assert!(!setup.overlaps(&data, lines.len()));
        assert_eq!(data.stopped_before(setup.start), data);
    }

    #[test]
    fn second_read_is_ignored() {
        let lines = lines(&["data read", "data read", "a.fits", "data end"]);
        let span = find_block(&lines, "data");
        assert_eq!((span.start, span.end), (Some(0), Some(3)));
    }

    #[test]
    fn end_before_read_is_ignored() {
        let lines = lines(&["setup end", "setup read", "Setup A", "setup end"]);
        let span = find_block(&lines, "setup");
        assert_eq!((span.start, span.end), (Some(1), Some(3)));
    }

    #[test]
    fn single_token_lines_never_match() {
        let lines = lines(&["data", "data read", "data end"]);
        let span = find_block(&lines, "data");
        assert_eq!((span.start, span.end), (Some(1), Some(2)));
        assert!(span.content(&lines).is_empty());
    }

    #[test]
    fn location_is_idempotent() {
        let lines = lines(&["[rdx]", "setup read", "Setup A", "setup end", "data read", "data end"]);
        assert_eq!(find_block(&lines, "setup"), find_block(&lines, "setup"));
        assert_eq!(find_block(&lines, "data"), find_block(&lines, "data"));
    }

    #[test]
    fn overlapping_spans_detected() {
        let lines = lines(&["data read", "setup read", "setup end", "data end"]);
        let data = find_block(&lines, "data");
        let setup = find_block(&lines, "setup");
        assert!(data.overlaps(&setup, lines.len()));
    }

    #[test]
    fn disjoint_spans_do_not_overlap() {
        let lines = lines(&["setup read", "setup end", "data read", "data end"]);
        let data = find_block(&lines, "data");
        let setup = find_block(&lines, "setup");
        assert!(!data.overlaps(&setup, lines.len()));
    }

    #[test]
    fn format_detection() {
        assert_eq!(
            detect_data_format(&lines(&["a.fits", "b.fits"])),
            DataFormat::RawList
        );
        assert_eq!(
            detect_data_format(&lines(&["path /raw", "| filename | frametype |"])),
            DataFormat::Table
        );
        assert_eq!(detect_data_format(&[]), DataFormat::RawList);
    }
}

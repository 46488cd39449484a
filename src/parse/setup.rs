//! Setup-block parsing.

/// Token introducing a setup name, as in `Setup A:`.
pub const SETUP_MARKER: &str = "Setup";

/// Separator allowed after a setup name.
const SETUP_SEPARATOR: char = ':';

/// Extract setup names from the lines of a setup block.
///
/// A line contributes the token following the `Setup` marker, with one
/// trailing `:` removed. Other lines, including the indented configuration
/// details of a setup, are ignored.
///
/// # Examples
///
/// ```
/// use pyphot_file::parse::setup::parse_setup_lines;
///
/// let lines = vec!["Setup A:".to_string(), "filter: r".to_string(), "Setup B".to_string()];
/// assert_eq!(parse_setup_lines(&lines), ["A", "B"]);
/// ```
#[must_use]
pub fn parse_setup_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            tokens.by_ref().find(|token| *token == SETUP_MARKER)?;
            let name = tokens.next()?;
            let name = name.strip_suffix(SETUP_SEPARATOR).unwrap_or(name);
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

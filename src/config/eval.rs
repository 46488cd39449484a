//! Best-effort type recovery for tokenised configuration values.
//!
//! Each string leaf is tried against a fixed, ordered set of literal
//! grammars: integer, float, boolean, `None`, and bracketed list/tuple of
//! those. The first grammar that accepts the whole string wins; when none
//! does, the string is kept unchanged. Evaluation never fails.

use super::{ConfigTree, ConfigValue};

/// Words that are always kept as plain strings.
pub const IGNORED_LITERALS: [&str; 5] = ["open", "file", "dict", "list", "tuple"];

/// Evaluate every string leaf of `tree` in place.
///
/// # Examples
///
/// ```
/// use pyphot_file::config::{ConfigTree, ConfigValue};
/// use pyphot_file::config::eval::evaluate_tree;
///
/// let mut tree: ConfigTree = [
///     ("a", ConfigValue::from("1")),
///     ("b", ConfigValue::from("open")),
///     ("c", ConfigValue::List(vec!["2".into(), "x".into()])),
/// ]
/// .into_iter()
/// .collect();
/// evaluate_tree(&mut tree);
/// assert_eq!(tree.get("a"), Some(&ConfigValue::Int(1)));
/// assert_eq!(tree.get("b"), Some(&ConfigValue::from("open")));
/// assert_eq!(
///     tree.get("c"),
///     Some(&ConfigValue::List(vec![ConfigValue::Int(2), "x".into()]))
/// );
/// ```
pub fn evaluate_tree(tree: &mut ConfigTree) {
    tree.values_mut().for_each(evaluate_value);
}

/// Evaluate one value in place: sections recurse, list elements are
/// evaluated one by one, strings are replaced by their literal value.
pub fn evaluate_value(value: &mut ConfigValue) {
    match value {
        ConfigValue::Section(tree) => evaluate_tree(tree),
        ConfigValue::List(items) => items.iter_mut().for_each(evaluate_value),
        ConfigValue::Str(s) => {
            if let Some(parsed) = literal(s) {
                *value = parsed;
            }
        }
        ConfigValue::Int(_) | ConfigValue::Float(_) | ConfigValue::Bool(_) | ConfigValue::None => {}
    }
}

/// Read `text` as a literal, or `None` if no grammar accepts it.
///
/// Words in [`IGNORED_LITERALS`] are never converted.
#[must_use]
pub fn literal(text: &str) -> Option<ConfigValue> {
    let text = text.trim();
    if IGNORED_LITERALS.contains(&text) {
        return None;
    }
    if let Some(digits) = integer_digits(text) {
        return parse_int(text, digits);
    }
    parse_float(text)
        .or_else(|| parse_bool(text))
        .or_else(|| parse_none(text))
        .or_else(|| parse_sequence(text))
}

/// The digits of a decimal integer, sign stripped.
fn integer_digits(text: &str) -> Option<&str> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
}

/// Leading zeros are only valid in zero itself, and values outside `i64`
/// stay text rather than losing precision as floats.
fn parse_int(text: &str, digits: &str) -> Option<ConfigValue> {
    if digits.starts_with('0') && digits.bytes().any(|b| b != b'0') {
        return None;
    }
    text.parse().ok().map(ConfigValue::Int)
}

fn parse_float(text: &str) -> Option<ConfigValue> {
    // Rules out `inf`, `nan` and friends, which Rust would otherwise accept.
    let plausible = text.bytes().any(|b| b.is_ascii_digit())
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !plausible {
        return None;
    }
    text.parse().ok().map(ConfigValue::Float)
}

fn parse_bool(text: &str) -> Option<ConfigValue> {
    match text {
        "True" => Some(ConfigValue::Bool(true)),
        "False" => Some(ConfigValue::Bool(false)),
        _ => None,
    }
}

fn parse_none(text: &str) -> Option<ConfigValue> {
    (text == "None").then_some(ConfigValue::None)
}

/// `[a, b, ...]` or `(a, b, ...)`; every element must itself be a literal
/// or a quoted string. Parentheses without a top-level comma only group:
/// `(1)` is `1`, `(1,)` is a one-element tuple.
fn parse_sequence(text: &str) -> Option<ConfigValue> {
    let bracketed = text.strip_prefix('[').and_then(|t| t.strip_suffix(']'));
    let parenthesised = bracketed.is_none();
    let inner = bracketed
        .or_else(|| text.strip_prefix('(')?.strip_suffix(')'))?
        .trim();
    if inner.is_empty() {
        return Some(ConfigValue::List(Vec::new()));
    }
    let mut parts = split_top_level(inner)?;
    if parenthesised && parts.len() == 1 {
        return element(inner);
    }
    // A single trailing comma is allowed: `(1,)`.
    if parts.last().is_some_and(|p| p.trim().is_empty()) && parts.len() > 1 {
        parts.pop();
    }
    parts
        .into_iter()
        .map(element)
        .collect::<Option<Vec<_>>>()
        .map(ConfigValue::List)
}

fn element(part: &str) -> Option<ConfigValue> {
    let part = part.trim();
    quoted(part)
        .map(|s| ConfigValue::Str(s.to_string()))
        .or_else(|| literal(part))
}

/// Split on commas that are not nested in brackets or quotes.
///
/// Returns `None` for unbalanced brackets or an unterminated quote.
fn split_top_level(text: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '[' | '(') => depth += 1,
            (None, ']' | ')') => depth = depth.checked_sub(1)?,
            (None, ',') if depth == 0 => {
                parts.push(text.get(start..idx)?);
                start = idx + 1;
            }
            (None, _) => {}
        }
    }
    if depth != 0 || quote.is_some() {
        return None;
    }
    parts.push(text.get(start..)?);
    Some(parts)
}

/// Contents of a `'...'` or `"..."` string literal.
fn quoted(text: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|q| {
        text.strip_prefix(q)?
            .strip_suffix(q)
            .filter(|inner| !inner.contains(q))
    })
}

//! Tokeniser for `[section]` and `key = value` configuration lines.
use super::{ConfigTree, ConfigValue};
use crate::error::ConfigError;

/// Tokenise configuration lines into a [`ConfigTree`] of string leaves.
///
/// Format:
/// ```ini
/// [rdx]
///     camera = lbc_b
///     detnum = 1, 2, 3
/// [baseprocess]
///     [[scienceframe]]
///         exprng = None, 600
/// ```
///
/// Section depth is the number of brackets around the name; a header may
/// be at most one level deeper than the section it follows. Values
/// containing a comma become lists, except bracketed `[...]`/`(...)`
/// literals, which stay whole. Surrounding quotes are removed. Blank lines
/// and `#` comments are skipped.
///
/// # Examples
///
/// ```
/// use pyphot_file::config::{ConfigValue, tokenize::parse_config_lines};
///
/// let tree = parse_config_lines(&["[rdx]", "camera = lbc_b", "detnum = 1, 2"]).unwrap();
/// assert_eq!(tree.get_path(&["rdx", "camera"]), Some(&ConfigValue::from("lbc_b")));
/// assert_eq!(
///     tree.get_path(&["rdx", "detnum"]),
///     Some(&ConfigValue::List(vec!["1".into(), "2".into()]))
/// );
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - a line is neither a section header nor a `key = value` pair
/// - a key is repeated within one section, or collides with a section name
/// - a section header skips a nesting level
pub fn parse_config_lines<S: AsRef<str>>(lines: &[S]) -> Result<ConfigTree, ConfigError> {
    let mut root = ConfigTree::new();
    let mut path: Vec<String> = Vec::new();

    for (line_num, line) in lines.iter().enumerate() {
        let line_num = line_num + 1;
        let trimmed = line.as_ref().trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some((depth, name)) = parse_section_header(trimmed) {
            if depth > path.len() + 1 {
                return Err(ConfigError::NestingTooDeep {
                    section: name.to_string(),
                    line: line_num,
                });
            }
            path.truncate(depth - 1);
            let parent = section_at(&mut root, &path).ok_or_else(|| syntax(line_num, "section parent is not a section"))?;
            match parent.get(name).map(|v| matches!(v, ConfigValue::Section(_))) {
                None => {
                    parent.insert(name, ConfigValue::Section(ConfigTree::new()));
                }
                Some(true) => {}
                Some(false) => {
                    return Err(syntax(line_num, format!("section '{name}' collides with a key")));
                }
            }
            path.push(name.to_string());
        } else if let Some((key, value)) = parse_kv_line(trimmed) {
            if key.is_empty() {
                return Err(syntax(line_num, format!("missing key: {trimmed}")));
            }
            let section = section_at(&mut root, &path).ok_or_else(|| syntax(line_num, "current section vanished"))?;
            if section.get(key).is_some() {
                return Err(syntax(line_num, format!("duplicate key '{key}'")));
            }
            section.insert(key, value);
        } else {
            return Err(syntax(line_num, format!("invalid key-value pair: {trimmed}")));
        }
    }

    Ok(root)
}

fn syntax(line: usize, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidSyntax {
        line,
        message: message.into(),
    }
}

/// Walk `path` from `root`, returning the section it names.
fn section_at<'a>(root: &'a mut ConfigTree, path: &[String]) -> Option<&'a mut ConfigTree> {
    let mut tree = root;
    for name in path {
        tree = match tree.get_mut(name)? {
            ConfigValue::Section(child) => child,
            _ => return None,
        };
    }
    Some(tree)
}

/// Parse a `[name]`, `[[name]]`, ... line into its depth and name.
fn parse_section_header(line: &str) -> Option<(usize, &str)> {
    let depth = line.chars().take_while(|&c| c == '[').count();
    if depth == 0 {
        return None;
    }
    let closing = line.chars().rev().take_while(|&c| c == ']').count();
    if closing != depth || line.len() < depth * 2 {
        return None;
    }
    let name = line.get(depth..line.len() - depth)?.trim();
    (!name.is_empty() && !name.contains(['[', ']'])).then_some((depth, name))
}

/// Parse a `key = value` line.
fn parse_kv_line(line: &str) -> Option<(&str, ConfigValue)> {
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), parse_value(value.trim())))
}

/// Interpret the right-hand side of a `key = value` line.
fn parse_value(value: &str) -> ConfigValue {
    if let Some(inner) = unquote(value) {
        return ConfigValue::Str(inner.to_string());
    }
    if is_bracketed(value) || !value.contains(',') {
        return ConfigValue::Str(value.to_string());
    }
    let items = value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| ConfigValue::Str(unquote(item).unwrap_or(item).to_string()))
        .collect();
    ConfigValue::List(items)
}

/// Strip one pair of matching surrounding quotes.
fn unquote(value: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        value
            .strip_prefix(quote)?
            .strip_suffix(quote)
            .filter(|inner| !inner.contains(quote))
    })
}

fn is_bracketed(value: &str) -> bool {
    (value.starts_with('[') && value.ends_with(']')) || (value.starts_with('(') && value.ends_with(')'))
}

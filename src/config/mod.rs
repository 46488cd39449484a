//! Configuration trees built from the free-form lines of a pyphot file.
//!
//! [`tokenize`] turns `[section]` / `key = value` lines into a
//! [`ConfigTree`] whose leaves are strings (or lists of strings);
//! [`eval`] then recovers native types where a leaf reads as a literal.

pub mod eval;
pub mod tokenize;

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::ConfigError;

/// A configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Text, either as written or after a failed literal evaluation.
    Str(String),
    /// Integer literal.
    Int(i64),
    /// Floating-point literal.
    Float(f64),
    /// `True` / `False`.
    Bool(bool),
    /// `None`.
    None,
    /// Comma-separated value, or a bracketed list/tuple literal.
    List(Vec<ConfigValue>),
    /// Nested section.
    Section(ConfigTree),
}

impl ConfigValue {
    /// Borrow the text of a [`ConfigValue::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the section of a [`ConfigValue::Section`].
    #[must_use]
    pub const fn as_section(&self) -> Option<&ConfigTree> {
        match self {
            Self::Section(tree) => Some(tree),
            _ => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<ConfigTree> for ConfigValue {
    fn from(tree: ConfigTree) -> Self {
        Self::Section(tree)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::None => f.write_str("None"),
            Self::List(items) => {
                let items: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Self::Section(tree) => {
                let entries: Vec<String> = tree.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", entries.join(", "))
            }
        }
    }
}

/// An ordered mapping of keys to [`ConfigValue`]s.
///
/// Keys keep the order in which they were first inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTree {
    entries: Vec<(String, ConfigValue)>,
}

impl ConfigTree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Tokenise configuration lines into a tree.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for malformed lines; see
    /// [`tokenize::parse_config_lines`].
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, ConfigError> {
        tokenize::parse_config_lines(lines)
    }

    /// Number of top-level entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a top-level key mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Follow a path of section names down to a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyphot_file::config::{ConfigTree, ConfigValue};
    ///
    /// let tree = ConfigTree::from_lines(&["[rdx]", "camera = lbc_b"]).unwrap();
    /// assert_eq!(tree.get_path(&["rdx", "camera"]), Some(&ConfigValue::from("lbc_b")));
    /// ```
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&ConfigValue> {
        let (last, parents) = path.split_last()?;
        let mut tree = self;
        for key in parents {
            tree = tree.get(key)?.as_section()?;
        }
        tree.get(last)
    }

    /// Insert a value, replacing any existing value in place.
    ///
    /// Returns the replaced value.
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigValue) -> Option<ConfigValue> {
        let key = key.into();
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Iterate over top-level entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate mutably over top-level values in insertion order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut ConfigValue> {
        self.entries.iter_mut().map(|(_, v)| v)
    }

    /// Deep-merge `other` into `self`.
    ///
    /// Sections present on both sides are merged recursively; any other
    /// value in `other` replaces the one in `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyphot_file::config::{ConfigTree, ConfigValue};
    ///
    /// let mut base = ConfigTree::from_lines(&["[rdx]", "camera = lbc_b", "n_process = 4"]).unwrap();
    /// let user = ConfigTree::from_lines(&["[rdx]", "n_process = 8"]).unwrap();
    /// base.merge(user);
    /// assert_eq!(base.get_path(&["rdx", "camera"]), Some(&ConfigValue::from("lbc_b")));
    /// assert_eq!(base.get_path(&["rdx", "n_process"]), Some(&ConfigValue::from("8")));
    /// ```
    pub fn merge(&mut self, other: Self) {
        for (key, value) in other.entries {
            if let Some(slot) = self.get_mut(&key) {
                match (slot, value) {
                    (ConfigValue::Section(mine), ConfigValue::Section(theirs)) => mine.merge(theirs),
                    (slot, value) => *slot = value,
                }
            } else {
                self.entries.push((key, value));
            }
        }
    }

    /// Recover native types from string leaves; see [`eval::evaluate_tree`].
    pub fn evaluate(&mut self) {
        eval::evaluate_tree(self);
    }
}

impl Serialize for ConfigTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Build a tree from `(key, value)` pairs.
impl<K: Into<String>> FromIterator<(K, ConfigValue)> for ConfigTree {
    fn from_iter<I: IntoIterator<Item = (K, ConfigValue)>>(iter: I) -> Self {
        let mut tree = Self::new();
        for (key, value) in iter {
            tree.insert(key, value);
        }
        tree
    }
}

//! Path resolution for data-file entries.
use std::path::{Path, PathBuf};

/// Characters that make an expression a glob pattern rather than a literal path.
const GLOB_METACHARACTERS: &[char] = &['*', '?', '['];

/// Return the user's home directory from `HOME` (or `USERPROFILE` on Windows).
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// Expand a leading `~` to the home directory.
///
/// Only `~` on its own or `~/...` is expanded; `~user` forms are returned
/// unchanged, as is everything when no home directory is known.
#[must_use]
pub fn expand_user(expr: &str) -> PathBuf {
    let rest = match expr.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => rest,
        _ => return PathBuf::from(expr),
    };
    home_dir().map_or_else(
        || PathBuf::from(expr),
        |home| home.join(rest.trim_start_matches(['/', '\\'])),
    )
}

/// Build the pattern for a data entry.
///
/// `~` entries are expanded and ignore `current_path`; anything else is
/// joined onto `current_path` when one is active.
#[must_use]
pub fn entry_pattern(expr: &str, current_path: Option<&Path>) -> PathBuf {
    if expr.starts_with('~') {
        return expand_user(expr);
    }
    match current_path {
        Some(base) => expand_user(&base.to_string_lossy()).join(expr),
        None => PathBuf::from(expr),
    }
}

/// Expand a data entry into the files it names.
///
/// Glob patterns return their sorted matches (possibly none). A literal
/// path with no match is returned as-is so that a later existence check
/// can report it by name. An expression that is not a valid pattern, such
/// as one with an unclosed `[`, is taken literally.
#[must_use]
pub fn expand_entry(expr: &str, current_path: Option<&Path>) -> Vec<PathBuf> {
    let pattern = entry_pattern(expr, current_path);
    let pattern_str = pattern.to_string_lossy();
    let mut matches: Vec<PathBuf> = match glob::glob(&pattern_str) {
        Ok(paths) => paths.filter_map(Result::ok).collect(),
        Err(err) => {
            tracing::debug!("{pattern_str} is not a glob pattern ({err}); reading it literally");
            return vec![pattern];
        }
    };
    if matches.is_empty() && !pattern_str.contains(GLOB_METACHARACTERS) {
        return vec![pattern];
    }
    matches.sort();
    matches
}

/// Resolve `filename` against an ordered list of candidate roots.
///
/// Returns the first candidate that exists. When none exists, returns the
/// candidate under the last root (or the bare filename when `roots` is
/// empty) together with `false`.
#[must_use]
pub fn resolve_in_roots(filename: &str, roots: &[PathBuf]) -> (PathBuf, bool) {
    let mut fallback = PathBuf::from(filename);
    for root in roots {
        let candidate = expand_user(&root.to_string_lossy()).join(filename);
        if candidate.is_file() {
            return (candidate, true);
        }
        fallback = candidate;
    }
    let exists = roots.is_empty() && fallback.is_file();
    (fallback, exists)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "").expect("write");
        path
    }

    #[test]
    fn expand_user_leaves_plain_paths() {
        assert_eq!(expand_user("/raw/a.fits"), PathBuf::from("/raw/a.fits"));
        assert_eq!(expand_user("~other/a.fits"), PathBuf::from("~other/a.fits"));
    }

    #[test]
    fn expand_user_uses_home() {
        if let Some(home) = home_dir() {
            assert_eq!(expand_user("~/raw"), home.join("raw"));
            assert_eq!(expand_user("~"), home);
        }
    }

    #[test]
    fn entry_pattern_joins_current_path() {
        let pattern = entry_pattern("a.fits", Some(Path::new("/raw")));
        assert_eq!(pattern, PathBuf::from("/raw/a.fits"));
        assert_eq!(entry_pattern("a.fits", None), PathBuf::from("a.fits"));
    }

    #[test]
    fn glob_expands_sorted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let b = touch(dir.path(), "b.fits");
        let a = touch(dir.path(), "a.fits");
        touch(dir.path(), "notes.txt");
        let files = expand_entry("*.fits", Some(dir.path()));
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn glob_without_matches_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(expand_entry("*.fits", Some(dir.path())).is_empty());
    }

    #[test]
    fn missing_literal_is_kept() {
        let dir = tempfile::tempdir().expect("tempdir");
        let files = expand_entry("missing.fits", Some(dir.path()));
        assert_eq!(files, vec![dir.path().join("missing.fits")]);
    }

    #[test]
    fn invalid_pattern_is_taken_literally() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = touch(dir.path(), "x[1.fits");
        assert_eq!(expand_entry("x[1.fits", Some(dir.path())), vec![file]);
    }

    #[test]
    fn first_existing_root_wins() {
        let first = tempfile::tempdir().expect("tempdir");
        let second = tempfile::tempdir().expect("tempdir");
        let third = tempfile::tempdir().expect("tempdir");
        let hit = touch(second.path(), "img1.fits");
        touch(third.path(), "img1.fits");
        let roots = vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
            third.path().to_path_buf(),
        ];
        assert_eq!(resolve_in_roots("img1.fits", &roots), (hit, true));
    }

    #[test]
    fn no_root_match_falls_back_to_last_root() {
        let first = tempfile::tempdir().expect("tempdir");
        let second = tempfile::tempdir().expect("tempdir");
        let roots = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let (path, exists) = resolve_in_roots("img1.fits", &roots);
        assert_eq!(path, second.path().join("img1.fits"));
        assert!(!exists);
    }

    #[test]
    fn no_roots_uses_bare_filename() {
        let (path, exists) = resolve_in_roots("definitely-missing.fits", &[]);
        assert_eq!(path, PathBuf::from("definitely-missing.fits"));
        assert!(!exists);
    }
}

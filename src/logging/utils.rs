//! Helpers shared by the console and file layers.
use std::fs;
use std::path::PathBuf;

/// Drop ANSI colour and cursor codes, which have no place in the log file.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if let Some(next) = chars.next()
                && next == '['
            {
                for inner in chars.by_ref() {
                    if ('@'..='~').contains(&inner) {
                        break;
                    }
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// `$XDG_CACHE_HOME/pyphot`, falling back to `~/.cache/pyphot`.
pub(super) fn pyphot_cache_dir() -> Option<PathBuf> {
    let cache_dir = std::env::var("XDG_CACHE_HOME").map_or_else(
        |_| {
            std::env::var("HOME")
                .or_else(|_| std::env::var("USERPROFILE"))
                .map_or_else(|_| PathBuf::from("."), PathBuf::from)
                .join(".cache")
        },
        PathBuf::from,
    );
    let dir = cache_dir.join("pyphot");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// `<cache>/pyphot/<command>.log`.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    Some(pyphot_cache_dir()?.join(format!("{command}.log")))
}

/// Timestamp for the log file's run header.
pub(super) const HEADER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp prefixed to each log file line.
pub(super) const LINE_TIME_FORMAT: &str = "%H:%M:%S";

/// Current UTC time rendered with a `chrono` format string.
pub(super) fn utc_now(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}

//! Subcommand handlers.
//!
//! Each handler renders its output to a `String` first, so the text can be
//! checked in tests, and only then writes it to stdout.

pub mod config;
pub mod generate;
pub mod parse;
pub mod version;

use anyhow::{Context as _, Result};
use serde::Serialize;

/// Write command output to stdout.
#[allow(clippy::print_stdout)]
pub(crate) fn emit(output: &str) {
    print!("{output}");
}

/// Serialize `value` as pretty-printed JSON with a trailing newline.
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    json.push('\n');
    Ok(json)
}

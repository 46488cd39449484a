//! Reader and writer for pyphot reduction files.
//!
//! A pyphot file holds the configuration of a photometric reduction run: free-form
//! `[section]` / `key = value` lines, a `setup` block naming instrument
//! setups, and a `data` block listing raw frames either as paths and globs
//! or as a `|`-delimited table.
//!
//! - **[`parse`]**: locate blocks, resolve data files, extract setups
//! - **[`config`]**: tokenise configuration lines into a tree and recover literal types
//! - **[`generate`]**: write new pyphot files
//! - **[`commands`]**: the `pyphot-file` subcommands built on the above
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod generate;
pub mod logging;
pub mod parse;

pub use error::{ConfigError, PyphotFileError, Result};
pub use generate::{PyphotFileContents, make_pyphot_file};
pub use parse::{DataBlock, ParseOptions, PyphotFile, parse_cfg_lines, parse_pyphot_file};

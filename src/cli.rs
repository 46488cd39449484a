//! Command-line arguments for `pyphot-file`.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for reading and writing pyphot files.
#[derive(Parser, Debug)]
#[command(
    name = "pyphot-file",
    about = "Read, inspect and generate pyphot reduction files",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a pyphot file and report its configuration, setups and data
    Parse(ParseOpts),
    /// Print the configuration lines of a pyphot file as a tree
    Config(ConfigOpts),
    /// Write a new pyphot file
    Generate(GenerateOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the command's log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
            Self::Generate(_) => "generate",
            Self::Version => "version",
        }
    }
}

/// Options for the `parse` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ParseOpts {
    /// Pyphot file to read
    pub file: PathBuf,

    /// Do not require data files to exist
    #[arg(long = "no-file-check", action = clap::ArgAction::SetFalse)]
    pub file_check: bool,

    /// Require a file complete enough for a reduction run
    #[arg(long)]
    pub runtime: bool,

    /// Print the parsed file as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for the `config` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ConfigOpts {
    /// Pyphot file to read
    pub file: PathBuf,

    /// Convert values that read as literals (numbers, booleans, lists)
    #[arg(long)]
    pub evaluate: bool,

    /// Print the tree as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for the `generate` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct GenerateOpts {
    /// Path of the file to write
    pub output: PathBuf,

    /// Camera name used in the default configuration
    #[arg(long)]
    pub camera: String,

    /// Data file entry (repeatable)
    #[arg(long = "file", value_name = "FILE")]
    pub files: Vec<String>,

    /// Search path for data files (repeatable)
    #[arg(long = "path", value_name = "DIR")]
    pub paths: Vec<PathBuf>,

    /// Line of the setup block (repeatable)
    #[arg(long = "setup", value_name = "LINE")]
    pub setup_lines: Vec<String>,

    /// Configuration line replacing the defaults (repeatable)
    #[arg(long = "cfg-line", value_name = "LINE")]
    pub cfg_lines: Vec<String>,

    /// Write the file as produced by the setup step
    #[arg(long)]
    pub setup_mode: bool,
}

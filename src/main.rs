//! `pyphot-file` command-line entry point.
use std::process::ExitCode;

use clap::Parser;

use pyphot_file::{cli, commands, logging};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let command = args.command.name();
    logging::init_subscriber(args.verbose, command);
    let log = logging::Logger::new(command);

    let result = match &args.command {
        cli::Command::Parse(opts) => commands::parse::run(opts, &log),
        cli::Command::Config(opts) => commands::config::run(opts, &log),
        cli::Command::Generate(opts) => commands::generate::run(opts, &log),
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log.error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

//! sbm, a simple bookmark manager.
//!
//! Entry point: sets up logging, parses the command line and runs one
//! command against the bookmark store.

use std::process::ExitCode;

use clap::Parser;

use sbm::cli::{self, Cli};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse_from(cli::normalize_args(std::env::args_os()));
    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

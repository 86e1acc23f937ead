//! Trolley CLI

use std::process::ExitCode;

use clap::Parser;
use trolley_app::observability;

use crate::cli::Cli;

mod cli;

fn main() -> ExitCode {
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = observability::init_subscriber(&cli.config.logging) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

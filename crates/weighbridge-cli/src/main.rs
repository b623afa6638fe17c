//! Weighbridge - two-stage vehicle weighing
//!
//! A CLI for capturing gross and tare masses, storing weighing
//! transactions, and reporting on them.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use weighbridge_app::logging::init_cli_logger;

fn main() {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

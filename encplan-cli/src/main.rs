// ============================================================================
// encplan-cli/src/main.rs
// ============================================================================
//
// ENCPLAN CLI: Entry point
//
// Parses arguments, initialises logging and dispatches to the command
// implementations in the library half of this crate. Errors are printed with
// their full context chain and turn into a non-zero exit status.

use clap::Parser;
use encplan_cli::{Cli, logging, run};
use owo_colors::OwoColorize;
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        if logging::use_color() {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
        } else {
            eprintln!("Error: {:#}", e);
        }
        process::exit(1);
    }
}

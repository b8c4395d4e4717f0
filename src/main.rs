// Hide console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! fxconverter - desktop currency converter
//!
//! - Window with amount entry, two currency pickers and a session history
//!   (default when launched without arguments)
//! - `fxconverter convert <AMOUNT> <FROM> <TO>` for a one-off conversion
//!
//! Rates come from ExchangeRate-API and are fetched fresh for every conversion.

mod cli;
mod core;
mod logging;
mod native_ui;
mod providers;

use clap::Parser;
use cli::{exit_codes, Cli, Commands};

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.json_output) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::UNEXPECTED_FAILURE;
    }

    // Rate fetches run here, off the UI thread
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create runtime: {}", e);
            return exit_codes::UNEXPECTED_FAILURE;
        }
    };

    match cli.command {
        Some(Commands::Convert(args)) => rt.block_on(async {
            match cli::convert::run(args).await {
                Ok(()) => exit_codes::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    cli::convert::exit_code_for(&e)
                }
            }
        }),
        Some(Commands::Gui) | None => match native_ui::run(rt.handle().clone()) {
            Ok(()) => exit_codes::SUCCESS,
            Err(e) => {
                tracing::error!("{:#}", e);
                exit_codes::UNEXPECTED_FAILURE
            }
        },
    }
}

//! Command line interface

pub mod convert;

use clap::{Parser, Subcommand};

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const UNEXPECTED_FAILURE: i32 = 1;
    pub const INVALID_INPUT: i32 = 2;
    pub const RATE_FETCH_FAILED: i32 = 3;
}

/// Currency converter with a session conversion history
#[derive(Debug, Parser)]
#[command(name = "fxconverter", version, about)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_output: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the converter window (default)
    Gui,
    /// Convert an amount once and print the result
    Convert(convert::ConvertArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_opens_window() {
        let cli = Cli::try_parse_from(["fxconverter"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_convert_args() {
        let cli = Cli::try_parse_from(["fxconverter", "-v", "convert", "100", "usd", "EUR"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Convert(args)) => {
                assert_eq!(args.amount, "100");
                assert_eq!(args.from, "USD");
                assert_eq!(args.to, "EUR");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_convert_keeps_amount_as_text() {
        let cli = Cli::try_parse_from(["fxconverter", "convert", "--", "-5", "EUR", "USD"]).unwrap();
        match cli.command {
            Some(Commands::Convert(args)) => assert_eq!(args.amount, "-5"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}

//! `fxconverter convert` - one conversion without opening the window

use clap::Args;

use crate::core::{ConvertError, ConvertStep, ConverterState, RateSource};
use crate::providers::ExchangeRateProvider;

use super::exit_codes;

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Amount to convert (validated like the window's amount field)
    pub amount: String,

    /// Currency code to convert from
    #[arg(value_parser = parse_code)]
    pub from: String,

    /// Currency code to convert to
    #[arg(value_parser = parse_code)]
    pub to: String,

    /// Print the conversion record as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_code(s: &str) -> Result<String, String> {
    let code = s.trim().to_ascii_uppercase();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(format!("'{}' is not a currency code", s));
    }
    Ok(code)
}

pub async fn run(args: ConvertArgs) -> anyhow::Result<()> {
    let provider = ExchangeRateProvider::new();
    run_with(args, &provider).await
}

async fn run_with(args: ConvertArgs, source: &dyn RateSource) -> anyhow::Result<()> {
    let mut state = ConverterState::new();
    state.amount_text = args.amount;
    state.from = args.from;
    state.to = args.to;

    let step = state.convert_with(source).await?;

    if args.json {
        if let Some(record) = state.history().records().last() {
            println!("{}", serde_json::to_string(record)?);
        } else if let Some(result) = &state.result {
            println!("{}", serde_json::json!({ "result": result }));
        }
        return Ok(());
    }

    if let Some(result) = &state.result {
        println!("Result: {}", result);
    }
    if step != ConvertStep::Done {
        if let Some(record) = state.history().records().last() {
            println!("{}", record);
        }
        if let Some(as_of) = state.rates_as_of {
            println!("Rates against {} as of {}", source.base(), as_of);
        }
    }

    Ok(())
}

/// Map a conversion failure to a process exit code
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ConvertError>() {
        Some(e) if e.is_input_error() => exit_codes::INVALID_INPUT,
        Some(_) => exit_codes::RATE_FETCH_FAILED,
        None => exit_codes::UNEXPECTED_FAILURE,
    }
}

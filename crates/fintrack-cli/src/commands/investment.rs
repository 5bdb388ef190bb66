use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::Value;

use fintrack_core::investment::{self, InvestmentInput, PortfolioInput};

use crate::input;

/// Arguments for single-investment valuation
#[derive(Args)]
pub struct ValuateArgs {
    /// Path to JSON input file (one investment record)
    #[arg(long)]
    pub input: Option<String>,

    /// Evaluation date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

/// Arguments for portfolio aggregation
#[derive(Args)]
pub struct PortfolioArgs {
    /// Path to JSON input file (list of investment records)
    #[arg(long)]
    pub input: Option<String>,

    /// Evaluation date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

/// The system clock enters here, at the boundary; the core stays
/// deterministic by always taking an explicit date.
fn evaluation_date(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Local::now().date_naive())
}

pub fn run_valuate(args: ValuateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let investment: InvestmentInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for valuation".into());
    };
    let result = investment::valuate_investment(&investment, evaluation_date(args.as_of))?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_portfolio(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let portfolio: PortfolioInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for portfolio valuation".into());
    };
    let result = investment::valuate_portfolio(&portfolio, evaluation_date(args.as_of))?;
    Ok(serde_json::to_value(result)?)
}

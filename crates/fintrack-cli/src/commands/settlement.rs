use clap::Args;
use serde_json::Value;

use fintrack_core::settlement::{self, SettlementInput};

use crate::input;

/// Arguments for group settlement
#[derive(Args)]
pub struct SettleArgs {
    /// Path to JSON input file (members, expenses, optional tolerance)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_settle(args: SettleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let settle_input: SettlementInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for settlement".into());
    };
    let result = settlement::compute_settlement(&settle_input)?;
    Ok(serde_json::to_value(result)?)
}

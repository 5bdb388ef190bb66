use clap::Args;
use serde_json::Value;

use fintrack_core::vault::{self, VaultFundingInput};

use crate::input;

/// Arguments for vault funding
#[derive(Args)]
pub struct VaultFundArgs {
    /// Path to JSON input file (current amount, target, contribution)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_vault_fund(args: VaultFundArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let funding: VaultFundingInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for vault funding".into());
    };
    let result = vault::fund_vault_item(&funding)?;
    Ok(serde_json::to_value(result)?)
}

mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::investment::{PortfolioArgs, ValuateArgs};
use commands::settlement::SettleArgs;
use commands::vault::VaultFundArgs;

/// Personal-finance calculations for shared expenses and investments
#[derive(Parser)]
#[command(
    name = "ftk",
    version,
    about = "Personal-finance calculations for shared expenses and investments",
    long_about = "A CLI for the fintrack computation engine. Settles shared-expense \
                  groups with greedy netting, valuates one-time and recurring \
                  investments under monthly compounding, and applies savings-vault \
                  contributions, all with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute group net balances and a settling transfer plan
    Settle(SettleArgs),
    /// Valuate a single investment (invested, current, future value)
    Valuate(ValuateArgs),
    /// Aggregate valuation across a set of investments
    Portfolio(PortfolioArgs),
    /// Apply a contribution to a savings-vault item
    VaultFund(VaultFundArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Settle(args) => commands::settlement::run_settle(args),
        Commands::Valuate(args) => commands::investment::run_valuate(args),
        Commands::Portfolio(args) => commands::investment::run_portfolio(args),
        Commands::VaultFund(args) => commands::vault::run_vault_fund(args),
        Commands::Version => {
            println!("ftk {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

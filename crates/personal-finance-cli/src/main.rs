mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::batch::BatchArgs;
use commands::investment::{FdArgs, SipArgs, SwpArgs};
use commands::lending::LoanArgs;
use personal_finance_core::display::{DisplayConfig, Grouping};

/// SIP, SWP, loan EMI and fixed deposit projections
#[derive(Parser)]
#[command(
    name = "pfc",
    version,
    about = "Personal finance calculators: SIP, SWP, loan EMI and fixed deposits",
    long_about = "Computes SIP future value, SWP remaining balance, loan EMI and fixed \
                  deposit maturity from numeric inputs. Every figure is rounded to the \
                  nearest whole currency unit."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Currency symbol for formatted amounts
    #[arg(long, default_value = "₹", global = true)]
    currency_symbol: String,

    /// Thousands grouping for formatted amounts
    #[arg(long, default_value = "indian", global = true)]
    grouping: CliGrouping,

    /// Log each calculation step to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Future value of a monthly Systematic Investment Plan
    Sip(SipArgs),
    /// Balance left after a Systematic Withdrawal Plan
    Swp(SwpArgs),
    /// Equated monthly installment of a fixed-rate loan
    #[command(alias = "loan")]
    Emi(LoanArgs),
    /// Maturity value of a fixed deposit
    Fd(FdArgs),
    /// Month-by-month amortization schedule of a loan
    Schedule(LoanArgs),
    /// Evaluate a JSON array of tagged requests
    Batch(BatchArgs),
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

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliGrouping {
    Indian,
    Western,
}

impl From<CliGrouping> for Grouping {
    fn from(value: CliGrouping) -> Self {
        match value {
            CliGrouping::Indian => Grouping::Indian,
            CliGrouping::Western => Grouping::Western,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let display = DisplayConfig {
        currency_symbol: cli.currency_symbol.clone(),
        grouping: cli.grouping.into(),
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Sip(args) => commands::investment::run_sip(args, &display),
        Commands::Swp(args) => commands::investment::run_swp(args, &display),
        Commands::Emi(args) => commands::lending::run_emi(args, &display),
        Commands::Fd(args) => commands::investment::run_fd(args, &display),
        Commands::Schedule(args) => commands::lending::run_schedule(args, &display),
        Commands::Batch(args) => commands::batch::run_batch(args, &display),
        Commands::Version => {
            println!("pfc {}", env!("CARGO_PKG_VERSION"));
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

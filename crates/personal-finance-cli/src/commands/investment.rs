use clap::Args;
use serde_json::Value;

use personal_finance_core::display::DisplayConfig;
use personal_finance_core::input::{FdForm, SipForm, SwpForm};
use personal_finance_core::investment::fd::{self, FdInput};
use personal_finance_core::investment::sip::{self, SipInput};
use personal_finance_core::investment::swp::{self, SwpInput};
use personal_finance_core::{Calculator, ZeroRatePolicy};

use super::{required, with_display, zero_rate_policy};
use crate::input;

/// Arguments for the SIP future value
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SipArgs {
    /// Monthly investment amount
    #[arg(long)]
    pub principal: Option<String>,

    /// Expected annual return in percent (e.g. 12 for 12%)
    #[arg(long)]
    pub rate: Option<String>,

    /// Investment period in years
    #[arg(long, alias = "time")]
    pub years: Option<String>,

    /// Fail on a zero return rate instead of summing contributions
    #[arg(long)]
    pub reject_zero_rate: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the SWP remaining balance
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SwpArgs {
    /// Initial investment
    #[arg(long)]
    pub principal: Option<String>,

    /// Expected annual return in percent
    #[arg(long)]
    pub rate: Option<String>,

    /// Withdrawal period in years
    #[arg(long, alias = "time")]
    pub years: Option<String>,

    /// Amount withdrawn every month
    #[arg(long)]
    pub withdrawal: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the fixed deposit maturity value
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FdArgs {
    /// Amount deposited
    #[arg(long)]
    pub principal: Option<String>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<String>,

    /// Deposit term in years
    #[arg(long, alias = "time")]
    pub years: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sip(args: SipArgs, display: &DisplayConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input: SipInput = match input::read_input::<SipInput>(args.input.as_deref())? {
        Some(parsed) => SipInput {
            zero_rate_policy: zero_rate_policy(args.reject_zero_rate, parsed.zero_rate_policy),
            ..parsed
        },
        None => SipForm {
            principal: required(args.principal, "--principal")?,
            rate: required(args.rate, "--rate")?,
            time: required(args.years, "--years")?,
        }
        .parse(zero_rate_policy(args.reject_zero_rate, ZeroRatePolicy::default()))?,
    };

    let output = sip::calculate_sip(&sip_input)?;
    let headline = output.result.future_value;
    Ok(with_display(
        serde_json::to_value(output)?,
        Calculator::Sip,
        headline,
        display,
    ))
}

pub fn run_swp(args: SwpArgs, display: &DisplayConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let swp_input: SwpInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => SwpForm {
            principal: required(args.principal, "--principal")?,
            rate: required(args.rate, "--rate")?,
            time: required(args.years, "--years")?,
            withdrawal: required(args.withdrawal, "--withdrawal")?,
        }
        .parse()?,
    };

    let output = swp::calculate_swp(&swp_input)?;
    let headline = output.result.remaining_balance;
    Ok(with_display(
        serde_json::to_value(output)?,
        Calculator::Swp,
        headline,
        display,
    ))
}

pub fn run_fd(args: FdArgs, display: &DisplayConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let fd_input: FdInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => FdForm {
            principal: required(args.principal, "--principal")?,
            rate: required(args.rate, "--rate")?,
            time: required(args.years, "--years")?,
        }
        .parse()?,
    };

    let output = fd::calculate_fd(&fd_input)?;
    let headline = output.result.maturity_value;
    Ok(with_display(
        serde_json::to_value(output)?,
        Calculator::Fd,
        headline,
        display,
    ))
}

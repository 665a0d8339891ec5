use clap::Args;
use serde_json::Value;

use personal_finance_core::display::DisplayConfig;
use personal_finance_core::input::LoanForm;
use personal_finance_core::lending::emi::{self, LoanInput};
use personal_finance_core::lending::schedule;
use personal_finance_core::{Calculator, ZeroRatePolicy};

use super::{required, with_display, zero_rate_policy};
use crate::input;

/// Arguments for the loan EMI and amortization schedule
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<String>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<String>,

    /// Tenure in years
    #[arg(long, alias = "time")]
    pub years: Option<String>,

    /// Fail on an interest-free loan instead of splitting the principal evenly
    #[arg(long)]
    pub reject_zero_rate: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn loan_input(args: LoanArgs) -> Result<LoanInput, Box<dyn std::error::Error>> {
    if let Some(parsed) = input::read_input::<LoanInput>(args.input.as_deref())? {
        return Ok(LoanInput {
            zero_rate_policy: zero_rate_policy(args.reject_zero_rate, parsed.zero_rate_policy),
            ..parsed
        });
    }
    let form = LoanForm {
        principal: required(args.principal, "--principal")?,
        rate: required(args.rate, "--rate")?,
        time: required(args.years, "--years")?,
    };
    Ok(form.parse(zero_rate_policy(args.reject_zero_rate, ZeroRatePolicy::default()))?)
}

pub fn run_emi(args: LoanArgs, display: &DisplayConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = loan_input(args)?;
    let output = emi::calculate_loan(&loan)?;
    let headline = output.result.emi;
    Ok(with_display(
        serde_json::to_value(output)?,
        Calculator::Loan,
        headline,
        display,
    ))
}

pub fn run_schedule(
    args: LoanArgs,
    display: &DisplayConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = loan_input(args)?;
    let output = schedule::amortization_schedule(&loan)?;
    let headline = output.result.emi;
    Ok(with_display(
        serde_json::to_value(output)?,
        Calculator::Loan,
        headline,
        display,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args_from_file(name: &str, json: &str, reject_zero_rate: bool) -> (LoanArgs, std::path::PathBuf) {
        let path = std::env::temp_dir().join(format!("pfc-{name}-{}.json", std::process::id()));
        fs::write(&path, json).unwrap();
        let args = LoanArgs {
            principal: None,
            rate: None,
            years: None,
            reject_zero_rate,
            input: Some(path.to_string_lossy().into_owned()),
        };
        (args, path)
    }

    #[test]
    fn test_reject_flag_applies_to_input_file() {
        let (args, path) = args_from_file(
            "loan-reject",
            r#"{"principal": 120000, "rate": 0, "time": 1}"#,
            true,
        );
        let result = run_emi(args, &DisplayConfig::default());
        fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("Degenerate rate"), "{err}");
    }

    #[test]
    fn test_input_file_policy_kept_without_flag() {
        let (args, path) = args_from_file(
            "loan-linear",
            r#"{"principal": 120000, "rate": 0, "time": 1}"#,
            false,
        );
        let parsed = loan_input(args);
        fs::remove_file(&path).unwrap();

        let parsed = parsed.unwrap();
        assert_eq!(parsed.zero_rate_policy, ZeroRatePolicy::Linear);
        assert_eq!(emi::loan_emi(&parsed).unwrap(), 10_000.0);
    }
}

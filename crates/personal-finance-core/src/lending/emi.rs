use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::input::{require_non_negative, require_positive};
use crate::time_value::{amortizing_payment, ensure_finite, monthly_rate, months, round_currency};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years, ZeroRatePolicy};
use crate::FinanceResult;

/// Input parameters for a fixed-rate amortizing loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed
    pub principal: Money,
    /// Annual interest rate in percent
    #[serde(alias = "rate")]
    pub annual_rate_percent: Percent,
    /// Tenure in years
    #[serde(alias = "time")]
    pub years: Years,
    /// Treatment of an interest-free loan
    #[serde(default)]
    pub zero_rate_policy: ZeroRatePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanOutput {
    /// Equated monthly installment
    pub emi: Money,
    /// EMI times the number of installments
    pub total_payment: Money,
    pub total_interest: Money,
    pub months: f64,
}

/// Equated Monthly Installment, rounded to the nearest whole unit.
///
/// EMI = P * i * (1 + i)^n / ((1 + i)^n - 1),  i = r / 12 / 100, n = years * 12
///
/// An interest-free loan repays `P / n` a month under the default
/// [`ZeroRatePolicy::Linear`] and is a `DegenerateRate` error under
/// [`ZeroRatePolicy::Reject`].
pub fn loan_emi(input: &LoanInput) -> FinanceResult<Money> {
    Ok(round_currency(emi_unrounded(input)?))
}

/// EMI with total payment and interest, wrapped in the standard output
/// envelope.
pub fn calculate_loan(input: &LoanInput) -> FinanceResult<ComputationOutput<LoanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let emi = emi_unrounded(input)?;
    let n = months(input.years);
    let total_payment = round_currency(ensure_finite(emi * n, "loan total payment")?);

    if input.annual_rate_percent == 0.0 {
        warnings.push("Interest-free loan: EMI is the principal split evenly across installments".into());
    }
    if n.fract() != 0.0 {
        warnings.push(format!(
            "Tenure of {n} months is not a whole number of installments"
        ));
    }

    let output = LoanOutput {
        emi: round_currency(emi),
        total_payment,
        total_interest: total_payment - round_currency(input.principal),
        months: n,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "EMI via standard amortization formula (monthly compounding)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

pub(crate) fn emi_unrounded(input: &LoanInput) -> FinanceResult<Money> {
    validate_loan_input(input)?;

    let rate = monthly_rate(input.annual_rate_percent);
    let n = months(input.years);
    let emi = amortizing_payment(rate, n, input.principal, input.zero_rate_policy)?;

    debug!(
        "emi: principal={} rate={}% years={} -> {}",
        input.principal, input.annual_rate_percent, input.years, emi
    );
    Ok(emi)
}

pub(crate) fn validate_loan_input(input: &LoanInput) -> FinanceResult<()> {
    require_positive("principal", input.principal)?;
    // Zero is left to the zero-rate policy
    require_non_negative("annual_rate_percent", input.annual_rate_percent)?;
    require_positive("years", input.years)?;
    Ok(())
}

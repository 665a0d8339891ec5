use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::input::{require_non_negative, require_positive};
use crate::time_value::{annual_rate, fv_lump_sum, round_currency};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::FinanceResult;

/// Input parameters for a fixed deposit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FdInput {
    /// Amount deposited once, at the start
    pub principal: Money,
    /// Annual interest rate in percent
    #[serde(alias = "rate")]
    pub annual_rate_percent: Percent,
    /// Term in years (fractional terms compound fractionally)
    #[serde(alias = "time")]
    pub years: Years,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FdOutput {
    pub maturity_value: Money,
    pub interest_earned: Money,
}

/// Maturity value under annual compounding, `P * (1 + r/100)^t`, rounded
/// to the nearest whole unit.
pub fn fd_maturity_value(input: &FdInput) -> FinanceResult<Money> {
    validate_fd_input(input)?;

    let maturity = fv_lump_sum(
        annual_rate(input.annual_rate_percent),
        input.years,
        input.principal,
    )?;

    debug!(
        "fd: principal={} rate={}% years={} -> {}",
        input.principal, input.annual_rate_percent, input.years, maturity
    );
    Ok(round_currency(maturity))
}

pub fn calculate_fd(input: &FdInput) -> FinanceResult<ComputationOutput<FdOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let maturity_value = fd_maturity_value(input)?;
    if input.annual_rate_percent == 0.0 {
        warnings.push("Zero interest rate: maturity equals the deposit".into());
    }

    let output = FdOutput {
        maturity_value,
        interest_earned: maturity_value - round_currency(input.principal),
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Fixed deposit maturity (annual compounding)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

pub(crate) fn validate_fd_input(input: &FdInput) -> FinanceResult<()> {
    require_positive("principal", input.principal)?;
    require_non_negative("annual_rate_percent", input.annual_rate_percent)?;
    require_positive("years", input.years)?;
    Ok(())
}

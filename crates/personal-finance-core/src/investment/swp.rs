use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::input::{require_non_negative, require_positive};
use crate::time_value::{ensure_finite, monthly_rate, months, round_currency};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::FinanceResult;

/// Input parameters for a Systematic Withdrawal Plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpInput {
    /// Initial corpus
    pub principal: Money,
    /// Expected annual return in percent
    #[serde(alias = "rate")]
    pub annual_rate_percent: Percent,
    /// Withdrawal horizon in years
    #[serde(alias = "time")]
    pub years: Years,
    /// Fixed amount withdrawn at the end of every month
    #[serde(alias = "withdrawal")]
    pub monthly_withdrawal: Money,
}

/// Output of the SWP simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpOutput {
    /// Balance after the last withdrawal. Negative once the fund is exhausted.
    pub remaining_balance: Money,
    pub total_withdrawn: Money,
    /// Months simulated
    pub months: u32,
    /// First month the balance went below zero, if it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depletion_month: Option<u32>,
}

struct SwpTrace {
    balance: Money,
    months: u32,
    depletion_month: Option<u32>,
}

/// Balance left after withdrawing monthly for the whole horizon, rounded to
/// the nearest whole unit.
///
/// Month by month: `balance = balance * (1 + i) - W`. Rounding is applied
/// only to the final balance. A negative result means the withdrawals
/// outlasted the corpus; it is returned, not treated as an error.
pub fn swp_remaining_balance(input: &SwpInput) -> FinanceResult<Money> {
    let trace = simulate(input)?;
    Ok(round_currency(trace.balance))
}

/// SWP simulation with withdrawal totals and depletion month, wrapped in the
/// standard output envelope.
pub fn calculate_swp(input: &SwpInput) -> FinanceResult<ComputationOutput<SwpOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let trace = simulate(input)?;
    let remaining_balance = round_currency(trace.balance);
    let total_withdrawn = round_currency(ensure_finite(
        input.monthly_withdrawal * f64::from(trace.months),
        "SWP total withdrawn",
    )?);

    if let Some(month) = trace.depletion_month {
        warnings.push(format!(
            "Corpus exhausted in month {month}; withdrawals exceed what the fund can sustain"
        ));
    }
    if months(input.years).fract() != 0.0 {
        warnings.push(format!(
            "Horizon rounded up to {} whole months",
            trace.months
        ));
    }

    let output = SwpOutput {
        remaining_balance,
        total_withdrawn,
        months: trace.months,
        depletion_month: trace.depletion_month,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "SWP month-by-month balance simulation",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn simulate(input: &SwpInput) -> FinanceResult<SwpTrace> {
    validate_swp_input(input)?;

    let total_months = simulation_months(input.years)?;
    let rate = monthly_rate(input.annual_rate_percent);

    let mut balance = input.principal;
    let mut depletion_month = None;
    for month in 1..=total_months {
        balance = balance * (1.0 + rate) - input.monthly_withdrawal;
        if !balance.is_finite() {
            return Err(FinanceError::ArithmeticOverflow {
                context: format!("SWP balance at month {month}"),
            });
        }
        if depletion_month.is_none() && balance < 0.0 {
            depletion_month = Some(month);
        }
    }

    debug!(
        "swp: principal={} rate={}% months={} withdrawal={} -> {}",
        input.principal, input.annual_rate_percent, total_months, input.monthly_withdrawal, balance
    );

    Ok(SwpTrace {
        balance,
        months: total_months,
        depletion_month,
    })
}

/// Whole months to simulate; a trailing partial month counts as a month.
fn simulation_months(years: Years) -> FinanceResult<u32> {
    let n = months(years).ceil();
    if n > f64::from(u32::MAX) {
        return Err(FinanceError::invalid(
            "years",
            "horizon is too long to simulate month by month",
        ));
    }
    Ok(n as u32)
}

pub(crate) fn validate_swp_input(input: &SwpInput) -> FinanceResult<()> {
    require_positive("principal", input.principal)?;
    require_non_negative("annual_rate_percent", input.annual_rate_percent)?;
    require_positive("years", input.years)?;
    require_non_negative("monthly_withdrawal", input.monthly_withdrawal)?;
    simulation_months(input.years)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swp(principal: f64, rate: f64, years: f64, withdrawal: f64) -> SwpInput {
        SwpInput {
            principal,
            annual_rate_percent: rate,
            years,
            monthly_withdrawal: withdrawal,
        }
    }

    #[test]
    fn test_swp_matches_direct_simulation() {
        let input = swp(1_000_000.0, 8.0, 20.0, 5000.0);
        let mut balance = 1_000_000.0_f64;
        for _ in 0..240 {
            balance = balance * (1.0 + 8.0 / 12.0 / 100.0) - 5000.0;
        }
        assert_eq!(swp_remaining_balance(&input).unwrap(), round_currency(balance));
        assert_eq!(swp_remaining_balance(&input).unwrap(), 1_981_701.0);
    }

    #[test]
    fn test_swp_depletion_is_a_result() {
        let out = calculate_swp(&swp(1_000_000.0, 6.0, 10.0, 20_000.0)).unwrap();
        assert_eq!(out.result.remaining_balance, -1_458_190.0);
        assert_eq!(out.result.total_withdrawn, 2_400_000.0);
        assert!(out.result.depletion_month.is_some());
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_swp_zero_withdrawal_compounds_monthly() {
        let balance = swp_remaining_balance(&swp(100_000.0, 12.0, 1.0, 0.0)).unwrap();
        // 100000 * 1.01^12
        assert_eq!(balance, 112_683.0);
    }

    #[test]
    fn test_swp_fractional_horizon_rounds_up() {
        let out = calculate_swp(&swp(10_000.0, 0.0, 0.5 / 12.0, 100.0)).unwrap();
        assert_eq!(out.result.months, 1);
        assert_eq!(out.result.remaining_balance, 9_900.0);
    }

    #[test]
    fn test_swp_negative_withdrawal_rejected() {
        let err = swp_remaining_balance(&swp(10_000.0, 5.0, 1.0, -1.0)).unwrap_err();
        assert!(matches!(err, FinanceError::InvalidInput { ref field, .. } if field == "monthly_withdrawal"));
    }

    #[test]
    fn test_swp_horizon_too_long() {
        let err = swp_remaining_balance(&swp(10_000.0, 5.0, 1e12, 0.0)).unwrap_err();
        assert!(matches!(err, FinanceError::InvalidInput { ref field, .. } if field == "years"));
    }

    #[test]
    fn test_swp_divergent_balance_overflows() {
        let err = swp_remaining_balance(&swp(1e300, 1e6, 10.0, 0.0)).unwrap_err();
        assert!(matches!(err, FinanceError::ArithmeticOverflow { .. }));
    }
}

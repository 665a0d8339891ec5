use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::input::{require_non_negative, require_positive};
use crate::time_value::{ensure_finite, fv_annuity_due, monthly_rate, months, round_currency};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years, ZeroRatePolicy};
use crate::FinanceResult;

/// Input parameters for a Systematic Investment Plan projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipInput {
    /// Fixed monthly contribution
    pub principal: Money,
    /// Expected annual return in percent (12.0 = 12%)
    #[serde(alias = "rate")]
    pub annual_rate_percent: Percent,
    /// Investment horizon in years
    #[serde(alias = "time")]
    pub years: Years,
    /// Treatment of a zero (or vanishingly small) return rate
    #[serde(default)]
    pub zero_rate_policy: ZeroRatePolicy,
}

/// Output of the SIP projection. All money figures are whole units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipOutput {
    /// Corpus at the end of the horizon
    pub future_value: Money,
    /// Sum of all contributions
    pub total_invested: Money,
    /// Growth on top of contributions
    pub estimated_returns: Money,
    pub months: f64,
}

/// Future value of a monthly SIP, rounded to the nearest whole unit.
///
/// Contributions are credited at the start of each month (annuity-due) and
/// compound monthly at `annual_rate_percent / 12 / 100`:
///
/// FV = P * ((1 + i)^n - 1) / i * (1 + i),  n = years * 12
///
/// At a zero rate the result is `P * n` unless the input asks for
/// [`ZeroRatePolicy::Reject`].
pub fn sip_future_value(input: &SipInput) -> FinanceResult<Money> {
    validate_sip_input(input)?;

    let rate = monthly_rate(input.annual_rate_percent);
    let n = months(input.years);
    let future_value = fv_annuity_due(rate, n, input.principal, input.zero_rate_policy)?;

    debug!(
        "sip: principal={} rate={}% years={} -> {}",
        input.principal, input.annual_rate_percent, input.years, future_value
    );
    Ok(round_currency(future_value))
}

/// SIP projection with contribution/returns breakdown, wrapped in the
/// standard output envelope.
pub fn calculate_sip(input: &SipInput) -> FinanceResult<ComputationOutput<SipOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let future_value = sip_future_value(input)?;

    let n = months(input.years);
    let total_invested = round_currency(ensure_finite(
        input.principal * n,
        "SIP total invested",
    )?);

    if input.annual_rate_percent == 0.0 {
        warnings.push("Zero return rate: value is the plain sum of contributions".into());
    }
    if n.fract() != 0.0 {
        warnings.push(format!(
            "Horizon of {n} months is not a whole number of months; growth is prorated"
        ));
    }

    let output = SipOutput {
        future_value,
        total_invested,
        estimated_returns: future_value - total_invested,
        months: n,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "SIP future value (annuity-due, monthly compounding)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

pub(crate) fn validate_sip_input(input: &SipInput) -> FinanceResult<()> {
    require_positive("principal", input.principal)?;
    require_non_negative("annual_rate_percent", input.annual_rate_percent)?;
    require_positive("years", input.years)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinanceError;

    fn sip(principal: f64, rate: f64, years: f64) -> SipInput {
        SipInput {
            principal,
            annual_rate_percent: rate,
            years,
            zero_rate_policy: ZeroRatePolicy::Linear,
        }
    }

    #[test]
    fn test_sip_reference_value() {
        // 5000/month at 12% for 10 years
        assert_eq!(sip_future_value(&sip(5000.0, 12.0, 10.0)).unwrap(), 1_161_695.0);
    }

    #[test]
    fn test_sip_zero_rate_is_sum_of_contributions() {
        assert_eq!(sip_future_value(&sip(5000.0, 0.0, 10.0)).unwrap(), 600_000.0);
    }

    #[test]
    fn test_sip_zero_rate_reject_policy() {
        let mut input = sip(5000.0, 0.0, 10.0);
        input.zero_rate_policy = ZeroRatePolicy::Reject;
        assert!(matches!(
            sip_future_value(&input).unwrap_err(),
            FinanceError::DegenerateRate { .. }
        ));
    }

    #[test]
    fn test_sip_breakdown() {
        let out = calculate_sip(&sip(5000.0, 12.0, 10.0)).unwrap();
        assert_eq!(out.result.total_invested, 600_000.0);
        assert_eq!(out.result.estimated_returns, 561_695.0);
        assert_eq!(out.result.months, 120.0);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_sip_zero_rate_warns() {
        let out = calculate_sip(&sip(1000.0, 0.0, 1.0)).unwrap();
        assert_eq!(out.result.estimated_returns, 0.0);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_sip_negative_rate_rejected() {
        let err = sip_future_value(&sip(5000.0, -1.0, 10.0)).unwrap_err();
        assert!(matches!(err, FinanceError::InvalidInput { ref field, .. } if field == "annual_rate_percent"));
    }
}

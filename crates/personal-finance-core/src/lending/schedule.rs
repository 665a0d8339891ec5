use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::emi::{emi_unrounded, LoanInput};
use crate::error::FinanceError;
use crate::time_value::{monthly_rate, months, round_currency};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinanceResult;

/// 1000 years of monthly rows
const MAX_SCHEDULE_MONTHS: f64 = 12_000.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub principal_repaid: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// Headline EMI, whole units
    pub emi: Money,
    /// Sum of the interest column, whole units
    pub total_interest: Money,
    pub rows: Vec<AmortizationRow>,
}

/// Month-by-month split of each installment into interest and principal.
///
/// Rows carry the exact (unrounded) EMI and show figures to the cent; the
/// final installment absorbs the floating-point residue so the loan closes
/// at exactly zero. The tenure must be a whole number of months.
pub fn amortization_schedule(
    input: &LoanInput,
) -> FinanceResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let emi = emi_unrounded(input)?;
    let n = months(input.years);
    if n.fract() != 0.0 {
        return Err(FinanceError::invalid(
            "years",
            format!("{n} months is not a whole number of installments"),
        ));
    }
    if n > MAX_SCHEDULE_MONTHS {
        return Err(FinanceError::invalid(
            "years",
            format!("schedules are limited to {MAX_SCHEDULE_MONTHS} installments"),
        ));
    }

    let rate = monthly_rate(input.annual_rate_percent);
    let total_months = n as u32;
    let mut rows = Vec::with_capacity(total_months as usize);
    let mut balance = input.principal;
    let mut total_interest = 0.0;

    for month in 1..=total_months {
        let interest = balance * rate;
        let principal_repaid = if month == total_months {
            balance
        } else {
            emi - interest
        };
        let payment = interest + principal_repaid;
        let closing = balance - principal_repaid;

        rows.push(AmortizationRow {
            month,
            opening_balance: round_cents(balance),
            payment: round_cents(payment),
            interest: round_cents(interest),
            principal_repaid: round_cents(principal_repaid),
            closing_balance: round_cents(closing),
        });

        total_interest += interest;
        balance = closing;
    }

    if let Some(last) = rows.last() {
        if (last.payment - round_cents(emi)).abs() > 1.0 {
            warnings.push(format!(
                "Final installment of {} differs from the EMI by more than one unit",
                last.payment
            ));
        }
    }

    let output = AmortizationSchedule {
        emi: round_currency(emi),
        total_interest: round_currency(total_interest),
        rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Amortization schedule (level EMI, monthly compounding)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn round_cents(value: Money) -> Money {
    (value * 100.0).round() / 100.0
}

use log::{debug, warn};

use crate::error::FinanceError;
use crate::types::{Money, Percent, Rate, Years, ZeroRatePolicy};
use crate::FinanceResult;

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Monthly periodic rate from an annual percentage (`r / 12 / 100`).
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / MONTHS_PER_YEAR / 100.0
}

/// Annual periodic rate from an annual percentage (`r / 100`).
pub fn annual_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / 100.0
}

/// Number of monthly periods in `years`. May be fractional.
pub fn months(years: Years) -> f64 {
    years * MONTHS_PER_YEAR
}

/// Round to the nearest whole currency unit, halves towards +infinity.
///
/// Equivalent to `floor(x + 0.5)` but without the spurious carry that
/// `x + 0.5` produces for values just below a half.
pub fn round_currency(value: Money) -> Money {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Pass `value` through if finite, otherwise report an overflow in `context`.
pub fn ensure_finite(value: f64, context: &str) -> FinanceResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        warn!("{context} left the finite range ({value})");
        Err(FinanceError::ArithmeticOverflow {
            context: context.into(),
        })
    }
}

/// Compound growth factor `(1 + rate)^nper`
pub fn growth_factor(rate: Rate, nper: f64, context: &str) -> FinanceResult<f64> {
    ensure_finite((1.0 + rate).powf(nper), context)
}

/// Future value of a lump sum: `present_value * (1 + rate)^nper`.
pub fn fv_lump_sum(rate: Rate, nper: f64, present_value: Money) -> FinanceResult<Money> {
    let factor = growth_factor(rate, nper, "lump-sum growth factor")?;
    ensure_finite(present_value * factor, "lump-sum future value")
}

/// Future value of an annuity-due (payments at the start of each period):
/// `pmt * ((1 + i)^n - 1) / i * (1 + i)`.
///
/// When the growth term `(1 + i)^n - 1` is exactly zero, either because the
/// rate is zero or because it is below double precision resolution, the
/// result falls back to `pmt * n` under [`ZeroRatePolicy::Linear`].
pub fn fv_annuity_due(
    rate: Rate,
    nper: f64,
    pmt: Money,
    policy: ZeroRatePolicy,
) -> FinanceResult<Money> {
    let factor = growth_factor(rate, nper, "annuity-due growth factor")?;
    let growth = factor - 1.0;
    if growth == 0.0 {
        return zero_rate_fallback(policy, "annuity-due future value", || pmt * nper);
    }
    ensure_finite(
        pmt * (growth / rate) * (1.0 + rate),
        "annuity-due future value",
    )
}

/// Level payment that amortizes `present_value` over `nper` periods:
/// `pv * i * (1 + i)^n / ((1 + i)^n - 1)`.
pub fn amortizing_payment(
    rate: Rate,
    nper: f64,
    present_value: Money,
    policy: ZeroRatePolicy,
) -> FinanceResult<Money> {
    if nper <= 0.0 {
        return Err(FinanceError::invalid(
            "nper",
            "Number of periods must be > 0",
        ));
    }

    let factor = growth_factor(rate, nper, "amortization growth factor")?;
    let growth = factor - 1.0;
    if growth == 0.0 {
        return zero_rate_fallback(policy, "amortizing payment", || present_value / nper);
    }
    ensure_finite(
        present_value * rate * factor / growth,
        "amortizing payment",
    )
}

fn zero_rate_fallback(
    policy: ZeroRatePolicy,
    context: &str,
    linear: impl FnOnce() -> Money,
) -> FinanceResult<Money> {
    match policy {
        ZeroRatePolicy::Linear => {
            debug!("{context}: growth term vanished, using the linear limit");
            ensure_finite(linear(), context)
        }
        ZeroRatePolicy::Reject => Err(FinanceError::DegenerateRate {
            context: context.into(),
        }),
    }
}

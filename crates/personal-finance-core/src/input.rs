//! Validation boundary between raw form fields and the calculators.
//!
//! The UI hands over every field as text. Nothing reaches a formula until it
//! has been parsed into a finite number and range-checked here; a field that
//! fails is reported by name and never replaced with a default.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::FinanceResult;

#[cfg(feature = "investment")]
use crate::investment::{fd::FdInput, sip::SipInput, swp::SwpInput};
#[cfg(feature = "lending")]
use crate::lending::emi::LoanInput;
#[cfg(any(feature = "investment", feature = "lending"))]
use crate::types::ZeroRatePolicy;

/// Most fractional digits a decimal literal can carry without rounding.
const MAX_FRACTION_DIGITS: usize = 28;

/// Parse one form field into a finite `f64`.
///
/// Accepts plain decimals (`"5000"`, `"12.5"`, `"-3"`) and scientific
/// notation (`"1.2e6"`). Anything else (separators, `_`, `%`, `NaN`,
/// infinities) "is not a number". Well-formed literals beyond the ±7.9e28
/// range or 28 fractional digits a decimal can carry are "out of range"
/// rather than silently truncated.
pub fn parse_number(field: &str, raw: &str) -> FinanceResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FinanceError::invalid(field, "is required"));
    }
    let Some(literal) = NumericLiteral::scan(trimmed) else {
        return Err(FinanceError::invalid(field, format!("'{trimmed}' is not a number")));
    };

    let out_of_range = || FinanceError::invalid(field, format!("'{trimmed}' is out of range"));
    if literal.fraction_digits > MAX_FRACTION_DIGITS {
        return Err(out_of_range());
    }

    let parsed = if literal.has_exponent {
        Decimal::from_scientific(trimmed)
    } else {
        Decimal::from_str(trimmed)
    }
    .map_err(|_| out_of_range())?;

    parsed
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(out_of_range)
}

/// Shape of a well-formed numeric literal:
/// `[+-] digits [. digits] [(e|E) [+-] digits]`, at least one mantissa digit.
struct NumericLiteral {
    fraction_digits: usize,
    has_exponent: bool,
}

impl NumericLiteral {
    fn scan(text: &str) -> Option<Self> {
        let (mantissa, exponent) = match text.find(['e', 'E']) {
            Some(at) => (&text[..at], Some(&text[at + 1..])),
            None => (text, None),
        };

        let unsigned = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if whole.len() + fraction.len() == 0 || !all_digits(whole) || !all_digits(fraction) {
            return None;
        }

        if let Some(exponent) = exponent {
            let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
            if digits.is_empty() || !all_digits(digits) {
                return None;
            }
        }

        Some(Self {
            fraction_digits: fraction.len(),
            has_exponent: exponent.is_some(),
        })
    }
}

/// Finite and strictly positive.
pub fn require_positive(field: &str, value: f64) -> FinanceResult<()> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(FinanceError::invalid(field, "must be greater than zero"));
    }
    Ok(())
}

/// Finite and zero or above.
pub fn require_non_negative(field: &str, value: f64) -> FinanceResult<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(FinanceError::invalid(field, "cannot be negative"));
    }
    Ok(())
}

fn require_finite(field: &str, value: f64) -> FinanceResult<()> {
    if !value.is_finite() {
        return Err(FinanceError::invalid(field, "must be a finite number"));
    }
    Ok(())
}

/// Report typed-record validation failures under the form's field names.
#[cfg(any(feature = "investment", feature = "lending"))]
fn to_form_field(err: FinanceError) -> FinanceError {
    match err {
        FinanceError::InvalidInput { field, reason } => {
            let field = match field.as_str() {
                "annual_rate_percent" => "rate".to_string(),
                "years" => "time".to_string(),
                "monthly_withdrawal" => "withdrawal".to_string(),
                _ => field,
            };
            FinanceError::InvalidInput { field, reason }
        }
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Form records
// ---------------------------------------------------------------------------

/// Raw SIP form: monthly investment, expected return (%), period (years).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SipForm {
    #[serde(default)]
    pub principal: String,
    #[serde(default)]
    pub rate: String,
    #[serde(default)]
    pub time: String,
}

/// Raw SWP form: initial investment, expected return (%), period (years),
/// monthly withdrawal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwpForm {
    #[serde(default)]
    pub principal: String,
    #[serde(default)]
    pub rate: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub withdrawal: String,
}

/// Raw loan form: loan amount, interest rate (%), tenure (years).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanForm {
    #[serde(default)]
    pub principal: String,
    #[serde(default)]
    pub rate: String,
    #[serde(default)]
    pub time: String,
}

/// Raw fixed deposit form: principal, interest rate (%), period (years).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FdForm {
    #[serde(default)]
    pub principal: String,
    #[serde(default)]
    pub rate: String,
    #[serde(default)]
    pub time: String,
}

#[cfg(feature = "investment")]
impl SipForm {
    pub fn parse(&self, zero_rate_policy: ZeroRatePolicy) -> FinanceResult<SipInput> {
        let input = SipInput {
            principal: parse_number("principal", &self.principal)?,
            annual_rate_percent: parse_number("rate", &self.rate)?,
            years: parse_number("time", &self.time)?,
            zero_rate_policy,
        };
        crate::investment::sip::validate_sip_input(&input).map_err(to_form_field)?;
        Ok(input)
    }
}

#[cfg(feature = "investment")]
impl SwpForm {
    pub fn parse(&self) -> FinanceResult<SwpInput> {
        let input = SwpInput {
            principal: parse_number("principal", &self.principal)?,
            annual_rate_percent: parse_number("rate", &self.rate)?,
            years: parse_number("time", &self.time)?,
            monthly_withdrawal: parse_number("withdrawal", &self.withdrawal)?,
        };
        crate::investment::swp::validate_swp_input(&input).map_err(to_form_field)?;
        Ok(input)
    }
}

#[cfg(feature = "lending")]
impl LoanForm {
    pub fn parse(&self, zero_rate_policy: ZeroRatePolicy) -> FinanceResult<LoanInput> {
        let input = LoanInput {
            principal: parse_number("principal", &self.principal)?,
            annual_rate_percent: parse_number("rate", &self.rate)?,
            years: parse_number("time", &self.time)?,
            zero_rate_policy,
        };
        crate::lending::emi::validate_loan_input(&input).map_err(to_form_field)?;
        Ok(input)
    }
}

#[cfg(feature = "investment")]
impl FdForm {
    pub fn parse(&self) -> FinanceResult<FdInput> {
        let input = FdInput {
            principal: parse_number("principal", &self.principal)?,
            annual_rate_percent: parse_number("rate", &self.rate)?,
            years: parse_number("time", &self.time)?,
        };
        crate::investment::fd::validate_fd_input(&input).map_err(to_form_field)?;
        Ok(input)
    }
}

use serde::{Deserialize, Serialize};

/// Currency amounts. Double precision throughout; rounding to whole units
/// happens once, on the final figure.
pub type Money = f64;

/// Annual rates as percentages (12.0 = 12% p.a.), the way users type them.
pub type Percent = f64;

/// Periodic rates as fractions (0.01 = 1% per month).
pub type Rate = f64;

/// Durations in (possibly fractional) years
pub type Years = f64;

/// How a closed-form annuity formula treats a growth term that vanishes.
///
/// A zero rate makes `(1 + i)^n - 1` zero and the textbook formulas divide
/// by it. `Linear` substitutes the limit as the rate tends to zero (plain sum
/// of payments for SIP, `P / n` for an EMI); `Reject` reports the input as a
/// degenerate rate instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroRatePolicy {
    #[default]
    Linear,
    Reject,
}

/// The four calculators, used to tag batch requests and result slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Calculator {
    Sip,
    Swp,
    Loan,
    Fd,
}

impl Calculator {
    /// Caption shown next to the headline figure.
    pub fn result_label(self) -> &'static str {
        match self {
            Calculator::Sip => "Total Value",
            Calculator::Swp => "Remaining Balance",
            Calculator::Loan => "Monthly EMI",
            Calculator::Fd => "Maturity Amount",
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
    pub rounding: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "ieee754_f64".to_string(),
            rounding: "nearest_unit_half_up".to_string(),
        },
    }
}

pub mod batch;
pub mod investment;
pub mod lending;

use serde_json::Value;

use personal_finance_core::display::{format_result, DisplayConfig};
use personal_finance_core::{Calculator, Money, ZeroRatePolicy};

/// Attach the formatted headline (`"Total Value: ₹11,61,695"`) to an output
/// envelope.
pub fn with_display(
    mut value: Value,
    calculator: Calculator,
    headline: Money,
    config: &DisplayConfig,
) -> Value {
    if let Value::Object(ref mut map) = value {
        map.insert(
            "display".to_string(),
            Value::String(format_result(calculator, headline, config)),
        );
    }
    value
}

/// `--reject-zero-rate` wins over whatever the input record asked for, so the
/// flag also holds for `--input` files and piped JSON.
pub fn zero_rate_policy(reject_zero_rate: bool, requested: ZeroRatePolicy) -> ZeroRatePolicy {
    if reject_zero_rate {
        ZeroRatePolicy::Reject
    } else {
        requested
    }
}

/// Flag value or a "required" error naming the flag.
pub fn required(value: Option<String>, flag: &str) -> Result<String, String> {
    value.ok_or_else(|| format!("{flag} is required (or provide --input)"))
}

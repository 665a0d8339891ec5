//! Presentation helpers for the headline figures.
//!
//! The calculators return bare numbers; this module turns them into the
//! strings a result card shows (`Total Value: ₹11,61,695`) and keeps the
//! caller-side memory of the last successful result per calculator.

use serde::{Deserialize, Serialize};

use crate::time_value::round_currency;
use crate::types::{Calculator, Money};
use crate::FinanceResult;

/// Digit grouping for the integer part of an amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// 12,34,567 (lakh/crore)
    #[default]
    Indian,
    /// 1,234,567
    Western,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    pub grouping: Grouping,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            currency_symbol: "₹".to_string(),
            grouping: Grouping::Indian,
        }
    }
}

/// Format an amount as whole currency units with thousands separators,
/// e.g. `₹11,61,695`. The sign follows the symbol, as the web UI shows it:
/// `₹-14,58,190`.
pub fn format_amount(value: Money, config: &DisplayConfig) -> String {
    let rounded = round_currency(value);
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!(
        "{}{sign}{}",
        config.currency_symbol,
        group_digits(&digits, config.grouping)
    )
}

/// `"<label>: <amount>"` as shown under each calculator.
pub fn format_result(calculator: Calculator, value: Money, config: &DisplayConfig) -> String {
    format!(
        "{}: {}",
        calculator.result_label(),
        format_amount(value, config)
    )
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let group = match grouping {
        Grouping::Indian => 2,
        Grouping::Western => 3,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(group);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

/// Last successful result per calculator, held by the caller.
///
/// Each slot is unset until its calculator first succeeds. Failed
/// computations leave the previous value in place, so a form can show an
/// error next to the last good figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultBoard {
    pub sip: Option<Money>,
    pub swp: Option<Money>,
    pub loan: Option<Money>,
    pub fd: Option<Money>,
}

impl ResultBoard {
    pub fn get(&self, calculator: Calculator) -> Option<Money> {
        match calculator {
            Calculator::Sip => self.sip,
            Calculator::Swp => self.swp,
            Calculator::Loan => self.loan,
            Calculator::Fd => self.fd,
        }
    }

    /// Store `outcome` if it succeeded. Returns whether the slot changed.
    pub fn record(&mut self, calculator: Calculator, outcome: &FinanceResult<Money>) -> bool {
        let Ok(value) = outcome else {
            return false;
        };
        let slot = match calculator {
            Calculator::Sip => &mut self.sip,
            Calculator::Swp => &mut self.swp,
            Calculator::Loan => &mut self.loan,
            Calculator::Fd => &mut self.fd,
        };
        *slot = Some(*value);
        true
    }

    /// Rendered result line, or `None` while the slot is unset.
    pub fn render(&self, calculator: Calculator, config: &DisplayConfig) -> Option<String> {
        self.get(calculator)
            .map(|value| format_result(calculator, value, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinanceError;
    use pretty_assertions::assert_eq;

    fn western() -> DisplayConfig {
        DisplayConfig {
            currency_symbol: "$".into(),
            grouping: Grouping::Western,
        }
    }

    #[test]
    fn test_indian_grouping() {
        let cfg = DisplayConfig::default();
        assert_eq!(format_amount(1_161_695.0, &cfg), "₹11,61,695");
        assert_eq!(format_amount(10_797.0, &cfg), "₹10,797");
        assert_eq!(format_amount(999.0, &cfg), "₹999");
        assert_eq!(format_amount(123_456_789.0, &cfg), "₹12,34,56,789");
    }

    #[test]
    fn test_western_grouping() {
        assert_eq!(format_amount(1_161_695.0, &western()), "$1,161,695");
        assert_eq!(format_amount(1000.0, &western()), "$1,000");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(
            format_amount(-1_458_190.0, &DisplayConfig::default()),
            "₹-14,58,190"
        );
        assert_eq!(format_amount(-1_234_567.0, &western()), "₹-1,234,567");
        assert_eq!(format_amount(-0.2, &DisplayConfig::default()), "₹0");
    }

    #[test]
    fn test_format_result_label() {
        assert_eq!(
            format_result(Calculator::Loan, 10_797.0, &DisplayConfig::default()),
            "Monthly EMI: ₹10,797"
        );
    }

    #[test]
    fn test_result_board_keeps_last_success() {
        let mut board = ResultBoard::default();
        assert_eq!(board.render(Calculator::Sip, &DisplayConfig::default()), None);

        assert!(board.record(Calculator::Sip, &Ok(1_161_695.0)));
        let failed: FinanceResult<Money> = Err(FinanceError::invalid("time", "is required"));
        assert!(!board.record(Calculator::Sip, &failed));

        assert_eq!(board.get(Calculator::Sip), Some(1_161_695.0));
        assert_eq!(board.get(Calculator::Fd), None);
        assert_eq!(
            board.render(Calculator::Sip, &DisplayConfig::default()).as_deref(),
            Some("Total Value: ₹11,61,695")
        );
    }
}

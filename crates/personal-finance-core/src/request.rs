use serde::{Deserialize, Serialize};

use crate::investment::{
    fd::{self, FdInput},
    sip::{self, SipInput},
    swp::{self, SwpInput},
};
use crate::lending::emi::{self, LoanInput};
use crate::types::{Calculator, Money};
use crate::FinanceResult;

/// One calculation, tagged by calculator: `{"calculator": "sip", ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "lowercase")]
pub enum CalculationRequest {
    Sip(SipInput),
    Swp(SwpInput),
    Loan(LoanInput),
    Fd(FdInput),
}

impl CalculationRequest {
    pub fn calculator(&self) -> Calculator {
        match self {
            CalculationRequest::Sip(_) => Calculator::Sip,
            CalculationRequest::Swp(_) => Calculator::Swp,
            CalculationRequest::Loan(_) => Calculator::Loan,
            CalculationRequest::Fd(_) => Calculator::Fd,
        }
    }

    /// Headline figure for this request.
    pub fn evaluate(&self) -> FinanceResult<Money> {
        match self {
            CalculationRequest::Sip(input) => sip::sip_future_value(input),
            CalculationRequest::Swp(input) => swp::swp_remaining_balance(input),
            CalculationRequest::Loan(input) => emi::loan_emi(input),
            CalculationRequest::Fd(input) => fd::fd_maturity_value(input),
        }
    }

    /// Full output envelope for this request, as JSON.
    pub fn evaluate_detailed(&self) -> FinanceResult<serde_json::Value> {
        let value = match self {
            CalculationRequest::Sip(input) => serde_json::to_value(sip::calculate_sip(input)?)?,
            CalculationRequest::Swp(input) => serde_json::to_value(swp::calculate_swp(input)?)?,
            CalculationRequest::Loan(input) => serde_json::to_value(emi::calculate_loan(input)?)?,
            CalculationRequest::Fd(input) => serde_json::to_value(fd::calculate_fd(input)?)?,
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_accepts_form_field_names() {
        let req: CalculationRequest = serde_json::from_value(json!({
            "calculator": "swp",
            "principal": 1_000_000.0,
            "rate": 8.0,
            "time": 20.0,
            "withdrawal": 5000.0
        }))
        .unwrap();
        assert_eq!(req.calculator(), Calculator::Swp);
        assert_eq!(req.evaluate().unwrap(), 1_981_701.0);
    }

    #[test]
    fn test_request_detailed_envelope() {
        let req: CalculationRequest = serde_json::from_value(json!({
            "calculator": "loan",
            "principal": 1_200_000.0,
            "annual_rate_percent": 9.0,
            "years": 20.0
        }))
        .unwrap();
        let value = req.evaluate_detailed().unwrap();
        assert_eq!(value["result"]["emi"], json!(10_797.0));
        assert!(value["methodology"].as_str().unwrap().contains("EMI"));
    }

    #[test]
    fn test_request_unknown_calculator() {
        let parsed: Result<CalculationRequest, _> =
            serde_json::from_value(json!({"calculator": "ppf", "principal": 1.0}));
        assert!(parsed.is_err());
    }
}

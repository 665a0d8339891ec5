use clap::Args;
use serde::Serialize;
use serde_json::Value;

use personal_finance_core::display::{DisplayConfig, ResultBoard};
use personal_finance_core::request::CalculationRequest;
use personal_finance_core::{Calculator, Money};

use crate::input;

/// Arguments for batch evaluation
#[derive(Args)]
pub struct BatchArgs {
    /// Path to a JSON array of requests, each tagged with "calculator"
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchRow {
    index: usize,
    calculator: Calculator,
    value: Option<Money>,
    display: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchOutput {
    results: Vec<BatchRow>,
    last_results: ResultBoard,
}

pub fn run_batch(args: BatchArgs, display: &DisplayConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let requests: Vec<CalculationRequest> = input::read_input(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for batch evaluation")?;
    Ok(serde_json::to_value(evaluate_requests(&requests, display))?)
}

/// Evaluate every request independently. A failing request is reported in
/// its row and does not stop the rest; it also leaves that calculator's last
/// result untouched.
fn evaluate_requests(requests: &[CalculationRequest], display: &DisplayConfig) -> BatchOutput {
    let mut board = ResultBoard::default();
    let mut results = Vec::with_capacity(requests.len());

    for (index, request) in requests.iter().enumerate() {
        let calculator = request.calculator();
        let outcome = request.evaluate();
        board.record(calculator, &outcome);

        let row = match outcome {
            Ok(value) => BatchRow {
                index,
                calculator,
                value: Some(value),
                display: board.render(calculator, display),
                error: None,
            },
            Err(e) => {
                log::warn!("request {index} ({calculator:?}) failed: {e}");
                BatchRow {
                    index,
                    calculator,
                    value: None,
                    display: None,
                    error: Some(e.to_string()),
                }
            }
        };
        results.push(row);
    }

    BatchOutput {
        results,
        last_results: board,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn requests(raw: Value) -> Vec<CalculationRequest> {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_failed_request_keeps_its_row_and_the_rest_run() {
        let batch = requests(json!([
            {"calculator": "sip", "principal": 5000, "rate": 12, "time": 10},
            {"calculator": "sip", "principal": 0, "rate": 12, "time": 10},
            {"calculator": "loan", "principal": 1200000, "rate": 9, "time": 20},
            {"calculator": "sip", "principal": 1000, "rate": 0, "time": 1}
        ]));
        let output = evaluate_requests(&batch, &DisplayConfig::default());

        assert_eq!(output.results.len(), 4);
        let indices: Vec<usize> = output.results.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);

        let first = &output.results[0];
        assert_eq!(first.calculator, Calculator::Sip);
        assert_eq!(first.value, Some(1_161_695.0));
        assert_eq!(first.display.as_deref(), Some("Total Value: ₹11,61,695"));
        assert!(first.error.is_none());

        let failed = &output.results[1];
        assert_eq!(failed.calculator, Calculator::Sip);
        assert!(failed.value.is_none());
        assert!(failed.display.is_none());
        assert_eq!(
            failed.error.as_deref(),
            Some("Invalid input: principal — must be greater than zero")
        );

        assert_eq!(output.results[2].value, Some(10_797.0));
        assert_eq!(output.results[3].value, Some(12_000.0));
        assert_eq!(output.results[3].display.as_deref(), Some("Total Value: ₹12,000"));

        assert_eq!(output.last_results.sip, Some(12_000.0));
        assert_eq!(output.last_results.loan, Some(10_797.0));
        assert_eq!(output.last_results.swp, None);
        assert_eq!(output.last_results.fd, None);
    }

    #[test]
    fn test_failure_after_success_keeps_last_result() {
        let batch = requests(json!([
            {"calculator": "fd", "principal": 100000, "rate": 7, "time": 5},
            {"calculator": "fd", "principal": 100000, "rate": 7, "time": -1}
        ]));
        let output = evaluate_requests(&batch, &DisplayConfig::default());

        assert_eq!(
            output.results[1].error.as_deref(),
            Some("Invalid input: years — must be greater than zero")
        );
        assert_eq!(output.last_results.fd, Some(140_255.0));

        let rendered = serde_json::to_value(&output).unwrap();
        assert_eq!(rendered["results"][1]["value"], Value::Null);
        assert_eq!(rendered["last_results"]["fd"], json!(140255.0));
    }
}

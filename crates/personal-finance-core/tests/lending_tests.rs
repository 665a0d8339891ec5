use personal_finance_core::lending::{emi, schedule};
use personal_finance_core::{FinanceError, ZeroRatePolicy};
use pretty_assertions::assert_eq;

fn loan_input(principal: f64, rate: f64, years: f64) -> emi::LoanInput {
    emi::LoanInput {
        principal,
        annual_rate_percent: rate,
        years,
        zero_rate_policy: ZeroRatePolicy::Linear,
    }
}

// ===========================================================================
// EMI
// ===========================================================================

#[test]
fn test_emi_home_loan_reference() {
    // 12 lakh at 9% for 20 years: i = 0.0075, n = 240
    let i: f64 = 9.0 / 12.0 / 100.0;
    let factor = (1.0 + i).powf(240.0);
    let expected = 1_200_000.0 * i * factor / (factor - 1.0);
    let result = emi::loan_emi(&loan_input(1_200_000.0, 9.0, 20.0)).unwrap();
    assert_eq!(result, expected.round());
    assert_eq!(result, 10_797.0);
}

#[test]
fn test_emi_short_personal_loan() {
    // 100000 at 12% over 1 year: 8884.88
    let result = emi::loan_emi(&loan_input(100_000.0, 12.0, 1.0)).unwrap();
    assert_eq!(result, 8885.0);
}

#[test]
fn test_emi_zero_rate_policies() {
    let linear = emi::loan_emi(&loan_input(1_200_000.0, 0.0, 20.0)).unwrap();
    assert_eq!(linear, 5000.0);

    let strict = emi::LoanInput {
        zero_rate_policy: ZeroRatePolicy::Reject,
        ..loan_input(1_200_000.0, 0.0, 20.0)
    };
    assert_eq!(
        emi::loan_emi(&strict).unwrap_err(),
        FinanceError::DegenerateRate {
            context: "amortizing payment".into()
        }
    );
}

#[test]
fn test_emi_never_nan_or_infinite() {
    for (rate, years) in [(1e-12, 30.0), (0.0, 0.01), (99.0, 40.0)] {
        let result = emi::loan_emi(&loan_input(500_000.0, rate, years)).unwrap();
        assert!(result.is_finite(), "rate {rate}, years {years} gave {result}");
    }
}

#[test]
fn test_emi_overflow_reported() {
    let err = emi::loan_emi(&loan_input(1e300, 1e6, 1000.0)).unwrap_err();
    assert!(matches!(err, FinanceError::ArithmeticOverflow { .. }));
}

#[test]
fn test_emi_zero_rate_policy_defaults_from_json() {
    let input: emi::LoanInput =
        serde_json::from_str(r#"{"principal": 60000, "rate": 0, "time": 1}"#).unwrap();
    assert_eq!(input.zero_rate_policy, ZeroRatePolicy::Linear);
    assert_eq!(emi::loan_emi(&input).unwrap(), 5000.0);
}

// ===========================================================================
// Amortization schedule
// ===========================================================================

#[test]
fn test_schedule_totals_agree_with_emi_output() {
    let input = loan_input(1_200_000.0, 9.0, 20.0);
    let summary = emi::calculate_loan(&input).unwrap();
    let sched = schedule::amortization_schedule(&input).unwrap();
    assert_eq!(sched.result.emi, summary.result.emi);
    assert!((sched.result.total_interest - summary.result.total_interest).abs() <= 1.0);
}

#[test]
fn test_schedule_balances_decline() {
    let sched = schedule::amortization_schedule(&loan_input(300_000.0, 8.5, 3.0)).unwrap();
    let rows = &sched.result.rows;
    assert_eq!(rows.len(), 36);
    for pair in rows.windows(2) {
        assert!(pair[1].opening_balance < pair[0].opening_balance);
        assert_eq!(pair[1].opening_balance, pair[0].closing_balance);
    }
}

#[test]
fn test_schedule_zero_rate_is_even_split() {
    let sched = schedule::amortization_schedule(&loan_input(12_000.0, 0.0, 1.0)).unwrap();
    assert!(sched.result.rows.iter().all(|r| r.interest == 0.0 && r.payment == 1000.0));
    assert_eq!(sched.result.total_interest, 0.0);
}

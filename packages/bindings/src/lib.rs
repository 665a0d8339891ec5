use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use personal_finance_core::display::{format_result, DisplayConfig};
use personal_finance_core::input::{FdForm, LoanForm, SipForm, SwpForm};
use personal_finance_core::investment::{fd, sip, swp};
use personal_finance_core::lending::{emi, schedule};
use personal_finance_core::request::CalculationRequest;
use personal_finance_core::{Calculator, ZeroRatePolicy};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Form payload as posted by the web UI: the raw string fields plus an
/// optional zero-rate policy.
#[derive(Deserialize)]
struct FormPayload<F> {
    #[serde(flatten)]
    form: F,
    #[serde(default)]
    zero_rate_policy: ZeroRatePolicy,
}

fn read_form<F: for<'de> Deserialize<'de>>(form_json: &str) -> NapiResult<FormPayload<F>> {
    serde_json::from_str(form_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Form submissions (string fields in, headline number out)
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_sip(form_json: String) -> NapiResult<f64> {
    let payload: FormPayload<SipForm> = read_form(&form_json)?;
    let input = payload.form.parse(payload.zero_rate_policy).map_err(to_napi_error)?;
    sip::sip_future_value(&input).map_err(to_napi_error)
}

#[napi]
pub fn calculate_swp(form_json: String) -> NapiResult<f64> {
    let payload: FormPayload<SwpForm> = read_form(&form_json)?;
    let input = payload.form.parse().map_err(to_napi_error)?;
    swp::swp_remaining_balance(&input).map_err(to_napi_error)
}

#[napi]
pub fn calculate_loan(form_json: String) -> NapiResult<f64> {
    let payload: FormPayload<LoanForm> = read_form(&form_json)?;
    let input = payload.form.parse(payload.zero_rate_policy).map_err(to_napi_error)?;
    emi::loan_emi(&input).map_err(to_napi_error)
}

#[napi]
pub fn calculate_fd(form_json: String) -> NapiResult<f64> {
    let payload: FormPayload<FdForm> = read_form(&form_json)?;
    let input = payload.form.parse().map_err(to_napi_error)?;
    fd::fd_maturity_value(&input).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Detailed envelopes (typed JSON in, JSON out)
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_detailed(request_json: String) -> NapiResult<String> {
    let request: CalculationRequest =
        serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let output = request.evaluate_detailed().map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: emi::LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::amortization_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// `"Total Value: ₹11,61,695"` for the given calculator ("sip", "swp",
/// "loan", "fd"). `config_json` may be empty for the default ₹ / Indian
/// grouping.
#[napi]
pub fn format_headline(calculator: String, value: f64, config_json: Option<String>) -> NapiResult<String> {
    let calculator: Calculator =
        serde_json::from_value(serde_json::Value::String(calculator)).map_err(to_napi_error)?;
    let config = match config_json.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            serde_json::from_str::<DisplayConfig>(raw).map_err(to_napi_error)?
        }
        _ => DisplayConfig::default(),
    };
    Ok(format_result(calculator, value, &config))
}

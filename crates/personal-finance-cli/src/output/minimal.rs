use serde_json::Value;

/// Headline figure of each calculator, in lookup order.
const HEADLINE_KEYS: [&str; 4] = ["future_value", "remaining_balance", "emi", "maturity_value"];

/// Print just the headline number from the output.
///
/// Falls back to the first field of the result object when none of the
/// known headline keys is present.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        let headline = HEADLINE_KEYS
            .iter()
            .find_map(|key| map.get(*key).filter(|v| !v.is_null()));
        if let Some(val) = headline {
            println!("{}", format_minimal(val));
            return;
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        // Headline figures are whole units; drop the trailing ".0"
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

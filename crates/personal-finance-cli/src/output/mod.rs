pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => log::error!("could not render JSON output: {e}"),
    }
}

/// Row-shaped payload inside an envelope: `result.rows` for schedules,
/// top-level `results` for batches.
pub(crate) fn rows_of(map: &serde_json::Map<String, Value>) -> Option<&Vec<Value>> {
    if let Some(Value::Array(rows)) = map.get("result").and_then(|r| r.get("rows")) {
        return Some(rows);
    }
    match map.get("results") {
        Some(Value::Array(results)) => Some(results),
        _ => None,
    }
}

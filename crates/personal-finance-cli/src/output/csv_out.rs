use serde_json::Value;
use std::io;

use super::rows_of;

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
///
/// Schedules and batches become one record per row; single results become
/// two-column `field,value` records.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = match value {
        Value::Object(map) => match rows_of(map) {
            Some(rows) => write_rows(&mut wtr, rows),
            None => write_fields(&mut wtr, map.get("result").unwrap_or(value)),
        },
        Value::Array(arr) => write_rows(&mut wtr, arr),
        _ => wtr.write_record([format_csv_value(value)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        log::error!("CSV output failed: {e}");
    }
}

fn write_fields(wtr: &mut StdoutWriter<'_>, value: &Value) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    if let Value::Object(map) = value {
        for (key, val) in map {
            wtr.write_record([key.as_str(), &format_csv_value(val)])?;
        }
    }
    Ok(())
}

fn write_rows(wtr: &mut StdoutWriter<'_>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([format_csv_value(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;

    for map in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

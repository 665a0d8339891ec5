pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Load a typed input from `--input <file.json>`, or from piped stdin when no
/// file is given. `Ok(None)` means neither was supplied and the caller should
/// fall back to individual flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Some(file::read_json(path)?)),
        None => stdin::read_stdin(),
    }
}

/// Deserialise a calculator record, naming where the text came from when the
/// JSON does not fit the expected shape.
fn parse_record<T: DeserializeOwned>(source: &str, text: &str) -> Result<T, String> {
    serde_json::from_str(text).map_err(|e| format!("Failed to parse {source}: {e}"))
}

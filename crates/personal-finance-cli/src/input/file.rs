use log::debug;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use super::parse_record;

/// Read a calculator record (or a batch of requests) from a JSON file.
/// Relative paths resolve against the working directory.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    debug!("reading input from {}", resolved.display());
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;
    Ok(parse_record(&format!("'{}'", resolved.display()), &contents)?)
}

fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.is_file() {
        return Err(format!("Input file not found: {}", resolved.display()).into());
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use personal_finance_core::investment::fd::FdInput;

    #[test]
    fn test_reads_record_from_file() {
        let path = std::env::temp_dir().join(format!("pfc-fd-{}.json", std::process::id()));
        fs::write(&path, r#"{"principal": 100000, "rate": 7, "time": 5}"#).unwrap();

        let input: FdInput = read_json(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(input.principal, 100_000.0);
        assert_eq!(input.annual_rate_percent, 7.0);
        assert_eq!(input.years, 5.0);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = read_json::<FdInput>("no/such/pfc-input.json").unwrap_err();
        assert!(err.to_string().starts_with("Input file not found:"), "{err}");
    }
}

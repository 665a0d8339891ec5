use log::debug;
use serde::de::DeserializeOwned;
use std::io::{self, Read};

use super::parse_record;

/// Calculator record piped on stdin. An interactive terminal means the user
/// is passing flags instead, so nothing is read.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    read_piped(io::stdin().lock())
}

/// An empty or whitespace-only pipe counts as no input, so `echo | pfc sip
/// --principal ...` still falls back to the flags.
fn read_piped<T: DeserializeOwned>(mut reader: impl Read) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    debug!("read {} bytes of JSON from stdin", trimmed.len());
    Ok(Some(parse_record("stdin", trimmed)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use personal_finance_core::investment::sip::SipInput;
    use personal_finance_core::ZeroRatePolicy;

    #[test]
    fn test_piped_record_is_typed() {
        let json = r#"{"principal": 5000, "rate": 12, "time": 10, "zero_rate_policy": "reject"}"#;
        let input: SipInput = read_piped(json.as_bytes()).unwrap().unwrap();
        assert_eq!(input.principal, 5000.0);
        assert_eq!(input.annual_rate_percent, 12.0);
        assert_eq!(input.years, 10.0);
        assert_eq!(input.zero_rate_policy, ZeroRatePolicy::Reject);
    }

    #[test]
    fn test_blank_pipe_is_no_input() {
        let input: Option<SipInput> = read_piped(" \n\t".as_bytes()).unwrap();
        assert!(input.is_none());
    }

    #[test]
    fn test_wrong_shape_names_stdin() {
        let err = read_piped::<SipInput>(r#"{"principal": "lots"}"#.as_bytes()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse stdin:"), "{err}");
    }
}

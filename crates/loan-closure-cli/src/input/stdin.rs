use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialise JSON piped on stdin.
///
/// Returns None when stdin is a TTY (interactive) or carries no data.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(
    buffer: &str,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: T = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse JSON from stdin: {}", e))?;
    tracing::debug!(bytes = trimmed.len(), "read input from stdin");
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_closure_core::optimizer::ClosureInput;
    use rust_decimal_macros::dec;

    #[test]
    fn test_blank_stdin_is_none() {
        let parsed: Option<ClosureInput> = parse_piped("  \n").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_piped_closure_input() {
        let parsed: Option<ClosureInput> = parse_piped(
            r#"{"principal": "1000000", "annual_rate_pct": "8.5", "tenure_years": 20, "extra_monthly": "5000"}"#,
        )
        .unwrap();
        let input = parsed.unwrap();
        assert_eq!(input.extra_monthly, dec!(5000));
        assert_eq!(input.lump_sum_month, 0);
    }

    #[test]
    fn test_invalid_json_errors() {
        let parsed: Result<Option<ClosureInput>, _> = parse_piped("principal=1");
        assert!(parsed.unwrap_err().to_string().contains("stdin"));
    }
}

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML input file and deserialise into a typed struct.
///
/// Files ending in `.yaml`/`.yml` are parsed as YAML, everything else as JSON.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let value: T = if is_yaml(&canonical) {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    tracing::debug!(path = %canonical.display(), "loaded input file");
    Ok(value)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Resolve and validate the path.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_closure_core::emi::LoanTerms;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_read_json_input() {
        let file = write_temp(
            ".json",
            r#"{"principal": "1000000", "annual_rate_pct": "8.5", "tenure_years": 20}"#,
        );
        let terms: LoanTerms = read_input(file.path().to_str().unwrap()).unwrap();
        assert_eq!(terms, LoanTerms::new(dec!(1_000_000), dec!(8.5), 20));
    }

    #[test]
    fn test_read_yaml_input() {
        let file = write_temp(
            ".yaml",
            "principal: \"250000\"\nannual_rate_pct: \"9.25\"\ntenure_years: 15\n",
        );
        let terms: LoanTerms = read_input(file.path().to_str().unwrap()).unwrap();
        assert_eq!(terms, LoanTerms::new(dec!(250_000), dec!(9.25), 15));
    }

    #[test]
    fn test_malformed_json_reports_path() {
        let file = write_temp(".json", "{ not json");
        let result: Result<LoanTerms, _> = read_input(file.path().to_str().unwrap());
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_missing_file() {
        let result: Result<LoanTerms, _> = read_input("/definitely/not/here.json");
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("File not found"));
    }

    #[test]
    fn test_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<LoanTerms, _> = read_input(dir.path().to_str().unwrap());
        assert!(result.unwrap_err().to_string().contains("Not a file"));
    }
}

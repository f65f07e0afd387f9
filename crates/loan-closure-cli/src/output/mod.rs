pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Split a result object into scalar fields and the first array of row
/// objects (e.g. an amortization schedule).
pub(crate) fn split_rows(result: &Map<String, Value>) -> (Vec<(&str, &Value)>, Option<&[Value]>) {
    let mut scalars = Vec::new();
    let mut rows = None;
    for (key, val) in result {
        match val {
            Value::Array(arr) if rows.is_none() && arr.iter().all(Value::is_object) => {
                rows = Some(arr.as_slice());
            }
            _ => scalars.push((key.as_str(), val)),
        }
    }
    (scalars, rows)
}

/// Render a JSON value as a plain cell string.
pub(crate) fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

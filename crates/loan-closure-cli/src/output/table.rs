use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cell, split_rows};

/// Format output as tables using the tabled crate.
///
/// Scalar result fields go in a Field/Value table; a schedule array is
/// printed as its own table underneath.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                print_result_tables(result);
                print_envelope_notes(map);
            } else {
                print_result_tables(map);
            }
        }
        Value::Array(arr) => print_rows_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_tables(result: &Map<String, Value>) {
    let (scalars, rows) = split_rows(result);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in scalars {
        builder.push_record([key.to_string(), cell(val)]);
    }
    println!("{}", Table::from(builder));

    if let Some(rows) = rows {
        println!();
        print_rows_table(rows);
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_rows_table(arr: &[Value]) {
    println!("{}", rows_table(arr));
}

fn rows_table(arr: &[Value]) -> String {
    if arr.is_empty() {
        return "(empty)".to_string();
    }

    let Some(Value::Object(first)) = arr.first() else {
        return arr.iter().map(cell).collect::<Vec<_>>().join("\n");
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(cell).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    Table::from(builder).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_table_has_headers_and_values() {
        let rows = json!([
            {"month": 1, "remaining_balance": "610.00"},
            {"month": 2, "remaining_balance": "0.00"}
        ]);
        let rendered = rows_table(rows.as_array().unwrap());
        assert!(rendered.contains("month"));
        assert!(rendered.contains("remaining_balance"));
        assert!(rendered.contains("610.00"));
    }

    #[test]
    fn test_rows_table_empty() {
        assert_eq!(rows_table(&[]), "(empty)");
    }
}

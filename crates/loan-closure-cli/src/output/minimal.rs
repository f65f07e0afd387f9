use serde_json::Value;

use super::cell;

/// Priority list of headline fields, most specific analysis first.
const PRIORITY_KEYS: [&str; 4] = [
    "interest_saved",
    "total_months",
    "monthly_payment",
    "total_interest_paid",
];

/// Print just the key answer value from the output.
///
/// Looks for the headline field of each analysis in priority order,
/// then falls back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return cell(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, cell(val));
        }
    }

    cell(result_obj)
}

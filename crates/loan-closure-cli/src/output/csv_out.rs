use serde_json::{Map, Value};
use std::io::{self, Write};

use super::{cell, split_rows};

/// Write output as CSV to stdout.
///
/// Result fields are written as a two-column field,value listing. A
/// schedule in the result follows after a blank line, one row per month.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, value).and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV output error: {}", e);
    }
}

// Sections differ in width, so records may vary in length.
fn writer<W: io::Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().flexible(true).from_writer(inner)
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    match value {
        Value::Object(map) => {
            let result = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            write_result(wtr, result)
        }
        Value::Array(arr) => write_rows(wtr, arr),
        _ => wtr.write_record([cell(value)]),
    }
}

fn write_result<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    result: &Map<String, Value>,
) -> csv::Result<()> {
    let (scalars, rows) = split_rows(result);

    wtr.write_record(["field", "value"])?;
    for (key, val) in scalars {
        wtr.write_record([key.to_string(), cell(val)])?;
    }

    if let Some(rows) = rows {
        wtr.flush()?;
        wtr.get_mut().write_all(b"\n")?;
        write_rows(wtr, rows)?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([cell(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers)?;

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(cell).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

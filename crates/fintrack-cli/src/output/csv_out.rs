use serde_json::Value;
use std::io;

use super::format_value;

/// Write output as CSV to stdout.
///
/// Scalar result fields become field,value rows; a transfer plan or balance
/// list (array of records) becomes its own header+rows block.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in result {
                    if !matches!(val, Value::Array(arr) if matches!(arr.first(), Some(Value::Object(_)))) {
                        let _ = wtr.write_record([key.as_str(), &format_value(val)]);
                    }
                }
                for (key, val) in result {
                    if let Value::Array(arr) = val {
                        if matches!(arr.first(), Some(Value::Object(_))) {
                            let _ = wtr.write_record([key.as_str()]);
                            write_record_block(&mut wtr, arr);
                        }
                    }
                }
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_value(val)]);
                }
            }
        }
        Value::Array(arr) => write_record_block(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_record_block(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_value(item)]);
        }
    }
}

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(rows) => Ok(render_rows(&rows)),
        Value::Object(map) => {
            let rows: Vec<Vec<String>> = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect();
            Ok(table::render_table(&["key", "value"], &rows))
        }
        scalar => Ok(value_to_cell(&scalar)),
    }
}

/// One column per key seen in any row.
fn render_rows(rows: &[Value]) -> String {
    if rows.is_empty() {
        return String::from("(no rows)");
    }

    let mut headers: Vec<String> = Vec::new();
    for row in rows.iter().filter_map(Value::as_object) {
        for key in row.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        let cells: Vec<Vec<String>> = rows.iter().map(|v| vec![value_to_cell(v)]).collect();
        return table::render_table(&["value"], &cells);
    }

    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|h| row.get(h).map_or_else(|| String::from("-"), value_to_cell))
                .collect()
        })
        .collect();
    table::render_table(&header_refs, &cells)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.replace('\n', " "),
        Value::Array(items) if items.iter().all(|v| !v.is_object() && !v.is_array()) => items
            .iter()
            .map(value_to_cell)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

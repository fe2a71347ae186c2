//! ui::display
//!
//! Render RPC results for the operator.
//!
//! # Layout
//!
//! - Objects: one `key: value` line per member, keys sorted
//! - Nested objects and arrays open with `{`/`[` and are indented four
//!   spaces per level until the closing bracket
//! - Amount keys (fees, balances) print with eight decimals
//! - A top-level string containing newlines (help text) prints raw
//! - Everything else prints as a JSON literal

use serde_json::{Map, Value};

/// Keys whose numeric values are amounts in BTC.
pub const AMOUNT_KEYS: &[&str] = &[
    "relayfee",
    "balance",
    "paytxfee",
    "fee",
    "modifiedfee",
    "immature_balance",
    "unconfirmed_balance",
];

const INDENT: &str = "    ";

/// Render `result` as display lines, skipping object keys in `exclude` at any depth.
///
/// # Example
///
/// ```
/// use sbtc::ui::display::render_lines;
/// use serde_json::json;
///
/// let lines = render_lines(&json!({"blocks": 10, "fee": 0.0001}), &[]);
/// assert_eq!(lines, vec!["blocks: 10", "fee: 0.00010000"]);
/// ```
pub fn render_lines(result: &Value, exclude: &[&str]) -> Vec<String> {
    let mut lines = Vec::new();
    match result {
        Value::Object(map) => render_object(map, exclude, 0, &mut lines),
        Value::Array(items) => render_array(items, exclude, 0, &mut lines),
        Value::String(text) if text.contains('\n') => lines.push(text.clone()),
        other => lines.push(other.to_string()),
    }
    lines
}

fn render_object(map: &Map<String, Value>, exclude: &[&str], depth: usize, lines: &mut Vec<String>) {
    let pad = INDENT.repeat(depth);
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();

    for key in keys {
        if exclude.contains(&key.as_str()) {
            continue;
        }
        let value = &map[key];
        match value {
            Value::Object(inner) => {
                lines.push(format!("{}{}: {{", pad, key));
                render_object(inner, exclude, depth + 1, lines);
                lines.push(format!("{}}}", pad));
            }
            Value::Array(items) => {
                lines.push(format!("{}{}: [", pad, key));
                render_array(items, exclude, depth + 1, lines);
                lines.push(format!("{}]", pad));
            }
            Value::Number(n) if AMOUNT_KEYS.contains(&key.as_str()) => {
                lines.push(format!("{}{}: {:.8}", pad, key, n.as_f64().unwrap_or_default()));
            }
            scalar => lines.push(format!("{}{}: {}", pad, key, scalar)),
        }
    }
}

fn render_array(items: &[Value], exclude: &[&str], depth: usize, lines: &mut Vec<String>) {
    let pad = INDENT.repeat(depth);
    for item in items {
        match item {
            Value::Object(inner) => {
                lines.push(format!("{}{{", pad));
                render_object(inner, exclude, depth + 1, lines);
                lines.push(format!("{}}}", pad));
            }
            Value::Array(inner) => {
                lines.push(format!("{}[", pad));
                render_array(inner, exclude, depth + 1, lines);
                lines.push(format!("{}]", pad));
            }
            scalar => lines.push(format!("{}{}", pad, scalar)),
        }
    }
}

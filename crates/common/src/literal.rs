//! JavaScript literal formatting for example payloads.
//!
//! Examples embedded in documentation comments are printed as source-level
//! literals rather than JSON: identifier keys are unquoted, strings use single
//! quotes, and non-finite numbers print as `NaN`, `Infinity` and `-Infinity`.

use crate::ident::{quote_key, quote_string};

/// A literal value, wide enough to hold the non-finite numbers JSON cannot.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer beyond `i64`
    UInt(u64),
    /// Any other number, including non-finite ones
    Float(f64),
    /// Single-quoted string
    String(String),
    /// Array literal
    Array(Vec<Self>),
    /// Object literal with keys in insertion order
    Object(Vec<(String, Self)>),
}

impl From<&serde_json::Value> for Literal {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Literal::Null,
            serde_json::Value::Bool(b) => Literal::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Literal::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Literal::UInt(u)
                } else {
                    Literal::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Literal::String(s.clone()),
            serde_json::Value::Array(items) => {
                Literal::Array(items.iter().map(Literal::from).collect())
            }
            serde_json::Value::Object(map) => Literal::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Literal::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Pretty-print a literal, one entry per line, nested levels indented by `indentation`.
pub fn format_literal(value: &Literal, indentation: &str) -> String {
    let mut out = String::new();
    write_literal(&mut out, value, indentation, 0);
    out
}

fn write_literal(out: &mut String, value: &Literal, unit: &str, level: usize) {
    match value {
        Literal::Null => out.push_str("null"),
        Literal::Bool(b) => out.push_str(&b.to_string()),
        Literal::Int(i) => out.push_str(&i.to_string()),
        Literal::UInt(u) => out.push_str(&u.to_string()),
        Literal::Float(f) => out.push_str(&format_float(*f)),
        Literal::String(s) => out.push_str(&quote_string(s)),
        Literal::Array(items) if items.is_empty() => out.push_str("[]"),
        Literal::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                out.push_str(&unit.repeat(level + 1));
                write_literal(out, item, unit, level + 1);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&unit.repeat(level));
            out.push(']');
        }
        Literal::Object(entries) if entries.is_empty() => out.push_str("{ }"),
        Literal::Object(entries) => {
            out.push_str("{\n");
            for (i, (key, item)) in entries.iter().enumerate() {
                out.push_str(&unit.repeat(level + 1));
                out.push_str(&quote_key(key));
                out.push_str(": ");
                write_literal(out, item, unit, level + 1);
                if i + 1 < entries.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&unit.repeat(level));
            out.push('}');
        }
    }
}

/// Format a float the way JavaScript prints numbers in source.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() && f.is_sign_positive() {
        "Infinity".to_string()
    } else if f.is_infinite() {
        "-Infinity".to_string()
    } else if f == 0.0 {
        "0".to_string()
    } else if !(1e-6..1e21).contains(&f.abs()) {
        exponent_form(f)
    } else if f.fract() == 0.0 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

/// Shortest exponent notation with an explicit sign on positive exponents (`1e+21`, `1.5e-7`).
fn exponent_form(f: f64) -> String {
    let formatted = format!("{f:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

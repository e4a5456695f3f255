//! Identifier helpers for TypeScript output.
//!
//! Keys and strings are always emitted with single quotes so that generated
//! declarations and formatted example literals share one quoting style.

/// Check if a name can be used as a bare identifier.
///
/// Returns false if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    starts_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Check if a name is a canonical non-negative integer (`0`, `200`, but not `007`).
fn is_index(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_digit())
        && (name == "0" || !name.starts_with('0'))
}

/// Escape a string for use inside a single-quoted JavaScript string literal.
pub fn escape_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}

/// Wrap a string in single quotes, escaping as needed.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_single_quoted(s))
}

/// Quote a property key unless it is a bare identifier or an integer index.
pub fn quote_key(name: &str) -> String {
    if is_identifier(name) || is_index(name) {
        name.to_string()
    } else {
        quote_string(name)
    }
}

/// Turn an arbitrary string into a usable identifier.
///
/// - Replaces every non-identifier character with `_`
/// - Prepends `_` if it starts with a digit or is empty
pub fn sanitize_identifier(name: &str) -> String {
    let mut result: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if result.chars().next().is_none_or(|c| c.is_ascii_digit()) {
        result.insert(0, '_');
    }

    result
}

//! Common utilities shared across normalization and code generation.

use raml2ts_common::sanitize_identifier;

/// Join a parent and child resource path.
///
/// A child of exactly `/` contributes nothing, and runs of consecutive
/// slashes collapse into one.
pub fn join_url(parent: &str, child: &str) -> String {
    let child = if child == "/" { "" } else { child };
    collapse_slashes(&format!("{parent}{child}"))
}

/// Collapse every run of `/` into a single slash.
pub fn collapse_slashes(url: &str) -> String {
    let mut result = String::with_capacity(url.len());
    let mut previous_slash = false;
    for c in url.chars() {
        if c == '/' {
            if !previous_slash {
                result.push(c);
            }
            previous_slash = true;
        } else {
            result.push(c);
            previous_slash = false;
        }
    }
    result
}

/// A `{name}` placeholder in a URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Text between the braces
    pub name: String,
    /// Byte offset just past the closing brace
    pub end: usize,
}

/// Find every `{name}` placeholder in `url`, in order.
pub fn url_placeholders(url: &str) -> Vec<Placeholder> {
    let mut placeholders = Vec::new();
    let mut start = None;
    for (i, c) in url.char_indices() {
        match c {
            '{' => start = Some(i + 1),
            '}' => {
                if let Some(s) = start.take() {
                    placeholders.push(Placeholder {
                        name: url[s..i].to_string(),
                        end: i + 1,
                    });
                }
            }
            _ => {}
        }
    }
    placeholders
}

/// Derive the short model name from a model identifier.
///
/// Everything up to the last namespace separator (`:`, `/`, `#` or `.`) is
/// dropped, so `urn:jsonschema:com:example:Project` and
/// `#/definitions/Project` both become `Project`. The result is made a
/// valid identifier.
pub fn model_name(id: &str) -> String {
    let short = id
        .trim_end_matches(['/', '#'])
        .rsplit([':', '/', '#', '.'])
        .next()
        .unwrap_or(id);
    sanitize_identifier(short)
}

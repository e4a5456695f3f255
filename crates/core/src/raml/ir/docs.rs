//! Documentation comment synthesis.

use raml2ts_common::{Literal, format_literal};
use serde_json::Value;

use super::api::HttpMethod;
use super::types::DocComment;

/// Everything a documentation comment can be built from.
#[derive(Debug, Default)]
pub struct DocParts<'a> {
    /// Free-text description
    pub description: Option<&'a str>,
    /// Default value, already formatted for display
    pub default: Option<String>,
    /// Endpoints the documented item is returned for
    pub endpoints: Vec<(HttpMethod, &'a str)>,
    /// Example payload, printed as a literal
    pub example: Option<&'a Value>,
}

/// Build a documentation comment.
///
/// Sections, each omitted when empty: the description with the default
/// spliced in, the endpoint cross-references, and an `@example` block.
pub fn build_doc_comment(
    parts: &DocParts<'_>,
    method_order: &[HttpMethod],
    indentation: &str,
) -> DocComment {
    let mut docs = DocComment::default();

    let description = parts.description.unwrap_or("").trim();
    match &parts.default {
        Some(default) => docs.push_text(splice_default(description, default)),
        None => docs.push_text(description),
    }

    match sort_endpoints_for_jsdoc(&parts.endpoints, method_order).as_slice() {
        [] => {}
        [(method, url)] => docs.push_text(format!("Returned for `{method} {url}`.")),
        endpoints => {
            let mut lines = vec!["Returned for:".to_string()];
            lines.extend(
                endpoints
                    .iter()
                    .map(|(method, url)| format!("- `{method} {url}`")),
            );
            docs.push_lines(lines);
        }
    }

    if let Some(example) = parts.example {
        let mut lines = vec!["@example".to_string()];
        lines.extend(
            format_literal(&Literal::from(example), indentation)
                .lines()
                .map(str::to_string),
        );
        docs.push_lines(lines);
    }

    docs
}

/// Insert `` Defaults to `x`. `` after the first sentence of `description`.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace or the end of
/// the text. Without a sentence terminator the default is appended.
pub fn splice_default(description: &str, default: &str) -> String {
    let note = format!("Defaults to `{default}`.");
    let description = description.trim();
    if description.is_empty() {
        return note;
    }

    let mut chars = description.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?')
            && chars.peek().is_none_or(|(_, next)| next.is_whitespace())
        {
            let (head, tail) = description.split_at(i + c.len_utf8());
            return format!("{head} {note}{tail}");
        }
    }

    format!("{description}. {note}")
}

/// Order (method, url) pairs by method order then URL, dropping duplicates.
///
/// Methods missing from `method_order` sort after all listed ones.
pub fn sort_endpoints_for_jsdoc<'a>(
    endpoints: &[(HttpMethod, &'a str)],
    method_order: &[HttpMethod],
) -> Vec<(HttpMethod, &'a str)> {
    let rank = |method: HttpMethod| {
        method_order
            .iter()
            .position(|m| *m == method)
            .unwrap_or(method_order.len())
    };

    let mut sorted = endpoints.to_vec();
    sorted.sort_by(|a, b| {
        rank(a.0)
            .cmp(&rank(b.0))
            .then(a.0.cmp(&b.0))
            .then(a.1.cmp(b.1))
    });
    sorted.dedup();
    sorted
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::raml::ir::types::DocSection;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const ORDER: [HttpMethod; 5] = HttpMethod::ALL;

    #[test]
    fn test_sort_endpoints_collapses_duplicates() {
        let endpoints = [
            (HttpMethod::Post, "/projects"),
            (HttpMethod::Get, "/projects/{project}"),
            (HttpMethod::Get, "/projects"),
            (HttpMethod::Post, "/projects"),
        ];
        assert_eq!(
            sort_endpoints_for_jsdoc(&endpoints, &ORDER),
            vec![
                (HttpMethod::Get, "/projects"),
                (HttpMethod::Get, "/projects/{project}"),
                (HttpMethod::Post, "/projects"),
            ]
        );
    }

    #[test]
    fn test_sort_endpoints_custom_order() {
        let endpoints = [
            (HttpMethod::Get, "/a"),
            (HttpMethod::Delete, "/a"),
            (HttpMethod::Put, "/a"),
        ];
        assert_eq!(
            sort_endpoints_for_jsdoc(&endpoints, &[HttpMethod::Delete]),
            vec![
                (HttpMethod::Delete, "/a"),
                (HttpMethod::Get, "/a"),
                (HttpMethod::Put, "/a"),
            ]
        );
    }

    #[test]
    fn test_splice_default() {
        assert_eq!(splice_default("", "10"), "Defaults to `10`.");
        assert_eq!(
            splice_default("The page size. Capped at 100.", "10"),
            "The page size. Defaults to `10`. Capped at 100."
        );
        assert_eq!(splice_default("Version 1.2 only", "x"), "Version 1.2 only. Defaults to `x`.");
        assert_eq!(splice_default("Really?", "no"), "Really? Defaults to `no`.");
    }

    #[test]
    fn test_single_endpoint_reference() {
        let parts = DocParts {
            description: Some("A project."),
            endpoints: vec![(HttpMethod::Get, "/projects/{project}")],
            ..DocParts::default()
        };
        let docs = build_doc_comment(&parts, &ORDER, "  ");
        assert_eq!(
            docs.sections,
            vec![
                DocSection::Text("A project.".into()),
                DocSection::Text("Returned for `GET /projects/{project}`.".into()),
            ]
        );
    }

    #[test]
    fn test_several_endpoints_and_example() {
        let example = json!({ "name": "demo", "tags": [] });
        let parts = DocParts {
            description: None,
            default: None,
            endpoints: vec![(HttpMethod::Post, "/projects"), (HttpMethod::Get, "/projects")],
            example: Some(&example),
        };
        let docs = build_doc_comment(&parts, &ORDER, "  ");
        assert_eq!(
            docs.sections,
            vec![
                DocSection::Lines(vec![
                    "Returned for:".into(),
                    "- `GET /projects`".into(),
                    "- `POST /projects`".into(),
                ]),
                DocSection::Lines(vec![
                    "@example".into(),
                    "{".into(),
                    "  name: 'demo',".into(),
                    "  tags: []".into(),
                    "}".into(),
                ]),
            ]
        );
    }

    #[test]
    fn test_nothing_present() {
        let docs = build_doc_comment(&DocParts::default(), &ORDER, "  ");
        assert!(docs.is_empty());
    }
}

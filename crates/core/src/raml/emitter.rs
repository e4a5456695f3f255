//! TypeScript declaration emitter for RAML documents.
//!
//! This module is a thin wrapper around the IR-based code generation.
//! The pipeline is:
//! 1. Decode: RAML (YAML) text -> generic value tree
//! 2. Normalize: value tree -> ParsedDocument (all RAML logic resolved)
//! 3. Codegen: ParsedDocument -> TsModule (TypeScript AST)
//! 4. Emit: TsModule -> String (via Emit trait)

use serde_json::Value;

use crate::config::RendererOptions;
use crate::error::Result;
use crate::raml::ir::api::ParsedDocument;
use crate::raml::ir::{Emit, EmitStyle, codegen_module, normalize_document};
use crate::raml::spec::decode_document;

/// A RAML document, as text or already decoded.
#[derive(Debug, Clone, Copy)]
pub enum RamlInput<'a> {
    /// RAML (YAML) source text
    Text(&'a str),
    /// A document already decoded into a value tree
    Decoded(&'a Value),
}

impl<'a> From<&'a str> for RamlInput<'a> {
    fn from(text: &'a str) -> Self {
        RamlInput::Text(text)
    }
}

impl<'a> From<&'a String> for RamlInput<'a> {
    fn from(text: &'a String) -> Self {
        RamlInput::Text(text)
    }
}

impl<'a> From<&'a Value> for RamlInput<'a> {
    fn from(value: &'a Value) -> Self {
        RamlInput::Decoded(value)
    }
}

/// Decode and normalize a RAML document.
pub fn parse_document<'a>(input: impl Into<RamlInput<'a>>) -> Result<ParsedDocument> {
    match input.into() {
        RamlInput::Text(text) => normalize_document(&decode_document(text)?),
        RamlInput::Decoded(value) => normalize_document(value),
    }
}

/// Render a parsed document as TypeScript declarations.
///
/// Returns an empty string when the document has no endpoints and no models.
pub fn render(doc: &ParsedDocument, options: &RendererOptions) -> Result<String> {
    if doc.endpoints.is_empty() && doc.models.is_empty() {
        return Ok(String::new());
    }

    let style = EmitStyle {
        indentation: options.indentation.clone(),
        max_line_length: options.max_line_length,
    };
    Ok(codegen_module(doc, options)?.emit(&style, 0))
}

/// Generate TypeScript declarations from a RAML document.
pub fn generate_declarations<'a>(
    input: impl Into<RamlInput<'a>>,
    options: &RendererOptions,
) -> Result<String> {
    let doc = parse_document(input)?;
    render(&doc, options)
}

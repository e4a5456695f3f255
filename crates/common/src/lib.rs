//! Text-layout utilities shared by the RAML normalizer and the TypeScript renderer.
//!
//! - `ident`: identifier checks, key quoting and string escaping
//! - `wrap`: word wrapping of comment text
//! - `literal`: JavaScript literal formatting for documentation examples

pub mod ident;
pub mod literal;
pub mod wrap;

pub use ident::{is_identifier, quote_key, quote_string, sanitize_identifier};
pub use literal::{Literal, format_literal};
pub use wrap::{word_wrap, wrap_paragraphs};

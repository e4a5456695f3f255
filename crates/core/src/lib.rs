//! Core of the RAML to TypeScript declaration generator.
//!
//! ```
//! use raml2ts_core::{RendererOptions, generate_declarations};
//!
//! let raml = "#%RAML 0.8\ntitle: Empty\n";
//! let output = generate_declarations(raml, &RendererOptions::default()).unwrap();
//! assert!(output.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod raml;

pub use config::RendererOptions;
pub use error::{GenerateError, Result};
pub use raml::{RamlInput, generate_declarations, parse_document, render};

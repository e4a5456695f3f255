//! Intermediate Representation for RAML to TypeScript code generation.
//!
//! This module defines a three-layer architecture:
//! 1. API-level IR: normalized endpoints, parameters, and the model registry
//! 2. TypeScript AST IR: types, documentation comments, declarations
//! 3. Emission: AST to TypeScript code strings via the `Emit` trait
//!
//! ## Module Structure
//!
//! - `api`: API-level IR (Endpoint, Parameter, ParsedDocument)
//! - `schema`: Schema IR (PropertyDefinition, ModelRegistry)
//! - `normalize`: RAML document -> API IR conversion
//! - `docs`: Documentation comment synthesis
//! - `codegen`: API IR -> TypeScript AST
//! - `types`: TypeScript AST IR (TsType, TsInterface, TsModule)
//! - `emit`: TypeScript AST -> code strings (via Emit trait)
//! - `utils`: Common utilities shared across modules

pub mod api;
mod codegen;
pub mod docs;
mod emit;
mod normalize;
pub mod schema;
pub mod types;
pub mod utils;

// Re-export the main entry points
pub use codegen::codegen_module;
pub use emit::{Emit, EmitStyle};
pub use normalize::{decode_schema, inherit_uri_parameters, normalize_document, normalize_schema};

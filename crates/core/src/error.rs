//! Error types for RAML normalization and TypeScript rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a generation run. There is no partial output.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The document text is not valid YAML.
    #[error("Failed to decode RAML document: {0}")]
    Decode(#[from] serde_yaml::Error),

    /// The decoded document (or a fragment of it) has the wrong shape.
    #[error("Invalid RAML document: {0}")]
    InvalidDocument(String),

    /// An embedded schema or example is not valid JSON.
    #[error("Invalid JSON in {context}: {source}")]
    InvalidJson {
        /// Where the text was found, e.g. `GET /projects response 200 schema`.
        context: String,
        /// The JSON parser error.
        #[source]
        source: serde_json::Error,
    },

    /// A schema fragment does not have the shape of a schema definition.
    #[error("Invalid schema in {context}: {message}")]
    InvalidSchema {
        /// Where the schema was found.
        context: String,
        /// What is wrong with it.
        message: String,
    },

    /// A schema carries a `type` this generator does not understand.
    #[error("Unhandled schema kind {kind}: {schema}")]
    UnhandledSchema {
        /// The offending `type` value.
        kind: String,
        /// The offending schema, serialized for diagnostics.
        schema: String,
    },

    /// An object schema with neither an identity nor a map shape was used as a type.
    #[error("Cannot name object schema without id, $ref or additionalProperties: {0}")]
    UnnamedObject(String),

    /// A URL placeholder has no definition on the endpoint or any of its ancestors.
    #[error("URI parameter '{name}' used in '{url}' is not defined on the resource or any ancestor")]
    MissingUriParameter {
        /// Placeholder name without braces.
        name: String,
        /// The endpoint URL containing the placeholder.
        url: String,
    },

    /// A renderer configuration file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A renderer configuration file is not valid.
    #[error("Invalid renderer configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result alias used throughout the crate.
pub type Result<T, E = GenerateError> = std::result::Result<T, E>;

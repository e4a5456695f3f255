//! Renderer options.
//!
//! Options can be read from a TOML file whose keys use the same camelCase
//! names as the options themselves:
//! ```toml
//! addEndpointList = true
//! interfacePrefix = "I"
//! methodSortOrder = ["GET", "DELETE"]
//! ```
//! Every key is optional; missing keys keep their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};
use crate::raml::HttpMethod;

/// Options controlling the generated declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RendererOptions {
    /// Emit the endpoint index interface
    pub add_endpoint_list: bool,
    /// Type text integer fields render as
    pub emit_integer_as: String,
    /// Prefix every field with `readonly`
    pub emit_interfaces_as_readonly: bool,
    /// Include request body examples in model comments
    pub emit_request_examples: bool,
    /// Include response body examples in model comments
    pub emit_response_examples: bool,
    /// List the endpoints returning each model in its comment
    #[serde(rename = "emitRequestURLs")]
    pub emit_request_urls: bool,
    /// Name of the endpoint index interface
    pub endpoint_interface: String,
    /// One level of indentation
    pub indentation: String,
    /// Prepended to every model interface name
    pub interface_prefix: String,
    /// Appended to every model interface name
    pub interface_suffix: String,
    /// Target width of comment lines
    pub max_line_length: usize,
    /// Order of method groups in the endpoint index and of endpoint references
    pub method_sort_order: Vec<HttpMethod>,
    /// Sort model declarations by name instead of discovery order
    pub sort_interfaces: bool,
    /// Sort fields by name instead of schema order
    pub sort_keys: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            add_endpoint_list: false,
            emit_integer_as: "Integer".to_string(),
            emit_interfaces_as_readonly: false,
            emit_request_examples: false,
            emit_response_examples: false,
            emit_request_urls: false,
            endpoint_interface: "Endpoints".to_string(),
            indentation: "  ".to_string(),
            interface_prefix: String::new(),
            interface_suffix: String::new(),
            max_line_length: 80,
            method_sort_order: HttpMethod::ALL.to_vec(),
            sort_interfaces: true,
            sort_keys: false,
        }
    }
}

impl RendererOptions {
    /// Parse options from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load options from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| GenerateError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

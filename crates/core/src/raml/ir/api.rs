//! API-level IR for normalized endpoints.
//!
//! This module defines the intermediate representation of a RAML document:
//! - Endpoint: one (method, URL) pair with its request/response contract
//! - Parameter: URI and query parameters
//! - RequestBody / Response: bodies with normalized schemas and parsed examples
//! - ParsedDocument: the result of a normalization pass

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema::{ModelRegistry, PropertyDefinition};

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    #[serde(alias = "get")]
    Get,
    /// POST
    #[serde(alias = "post")]
    Post,
    /// PUT
    #[serde(alias = "put")]
    Put,
    /// PATCH
    #[serde(alias = "patch")]
    Patch,
    /// DELETE
    #[serde(alias = "delete")]
    Delete,
}

impl HttpMethod {
    /// Methods in their conventional order.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    /// Upper-case method name, as used for endpoint index groups.
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Map a RAML resource key (`get`, `post`, ...) to a method.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "patch" => Some(HttpMethod::Patch),
            "delete" => Some(HttpMethod::Delete),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive type of a URI or query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    /// `boolean`
    Boolean,
    /// `number`, also used for RAML `integer`
    Number,
    /// `string`, also used for RAML `date`
    String,
}

impl ParameterType {
    /// TypeScript keyword for the type.
    pub const fn as_str(self) -> &'static str {
        match self {
            ParameterType::Boolean => "boolean",
            ParameterType::Number => "number",
            ParameterType::String => "string",
        }
    }
}

/// Single URI or query parameter definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Free-text description
    pub description: Option<String>,
    /// Value type
    pub ty: ParameterType,
    /// Whether the parameter must be supplied
    pub required: bool,
    /// Whether the parameter may be supplied multiple times
    pub repeat: bool,
    /// Default value, as written in the document
    pub default: Option<String>,
    /// Example value, as written in the document
    pub example: Option<String>,
}

/// Request body IR
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    /// e.g. `application/json` or `multipart/form-data`
    pub mime_type: String,
    /// Parsed example payload
    pub example: Option<Value>,
    /// Normalized body schema
    pub schema: Option<PropertyDefinition>,
}

/// Response IR for a single status code
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// Free-text description of the status
    pub description: Option<String>,
    /// Normalized JSON body schema
    pub body_schema: Option<PropertyDefinition>,
    /// Parsed JSON body example
    pub body_example: Option<Value>,
}

/// Normalized API endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    /// HTTP method
    pub method: HttpMethod,
    /// URL path (e.g., "/projects/{project}")
    pub url: String,
    /// Method description, falling back to the resource's
    pub description: Option<String>,
    /// URI parameters, including those inherited from ancestor paths
    pub url_parameters: IndexMap<String, Parameter>,
    /// Query string parameters
    pub query_parameters: IndexMap<String, Parameter>,
    /// Request body, if the method declares one
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code, in ascending order
    pub responses: BTreeMap<u16, Response>,
}

/// Result of normalizing a RAML document
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// API title
    pub title: Option<String>,
    /// Base URI, placeholders left unexpanded
    pub base_uri: Option<String>,
    /// API version
    pub version: Option<String>,
    /// All endpoints, in document order
    pub endpoints: Vec<Endpoint>,
    /// Named object schemas discovered while normalizing bodies
    pub models: ModelRegistry,
}

//! RAML document structs for serde deserialization.
//!
//! This module defines the subset of RAML 0.8 we need to produce TypeScript
//! declarations, plus the JSON Schema (draft 3/4) subset used by embedded
//! body schemas. Documents are decoded from YAML into a generic
//! `serde_json::Value` tree first, then read through these structs.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{GenerateError, Result};

/// Root RAML document. Resource paths are collected in `entries`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RamlDocument {
    /// API title
    pub title: Option<String>,
    /// API version, a string or a number
    pub version: Option<Value>,
    /// Base URI of the API
    pub base_uri: Option<String>,
    /// Named schemas: a list of single-entry maps, or a map.
    pub schemas: Option<Value>,
    /// Every other top-level key, resource paths among them
    #[serde(flatten)]
    pub entries: IndexMap<String, Value>,
}

/// A resource: its own URI parameters, nested resources and methods.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Resource description
    pub description: Option<String>,
    /// Placeholders defined by this path
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri_parameters: IndexMap<String, NamedParameter>,
    /// Nested paths, methods and anything else
    #[serde(flatten)]
    pub entries: IndexMap<String, Value>,
}

/// An HTTP method on a resource.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    /// Method description
    pub description: Option<String>,
    /// Query string parameters
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_parameters: IndexMap<String, NamedParameter>,
    /// Bodies keyed by mime type.
    pub body: Option<IndexMap<String, Option<BodyType>>>,
    /// Responses keyed by status code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub responses: IndexMap<String, Option<RamlResponse>>,
}

/// A body for one mime type.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyType {
    /// JSON schema text, a schema name, or an inline mapping.
    pub schema: Option<Value>,
    /// JSON example text or an inline value.
    pub example: Option<Value>,
    /// Fields of a form body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub form_parameters: IndexMap<String, NamedParameter>,
}

/// A response definition.
#[derive(Debug, Default, Deserialize)]
pub struct RamlResponse {
    /// Status description
    pub description: Option<String>,
    /// Bodies keyed by mime type
    pub body: Option<IndexMap<String, Option<BodyType>>>,
}

/// A RAML named parameter (URI, query or form parameter).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedParameter {
    /// Parameter description
    pub description: Option<String>,
    /// `string`, `number`, `integer`, `date`, `boolean` or `file`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Explicit required flag
    pub required: Option<bool>,
    /// Whether the parameter may repeat
    #[serde(default)]
    pub repeat: bool,
    /// Default value
    pub default: Option<Value>,
    /// Example value
    pub example: Option<Value>,
}

/// JSON Schema definition embedded in a body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSchema {
    /// The type of the schema (string, number, integer, boolean, any, object, array).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,

    /// Globally unique identifier of an object schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Identifier of another object schema.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Draft 3 flag on the property, or draft 4 list on the parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Required>,

    /// Item schema for array types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<RawSchema>>,

    /// Properties for object types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, RawSchema>>,

    /// Value schema for map-like objects.
    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,

    /// Allowed literal values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
}

/// `required` is a boolean (draft 3) or a list of property names (draft 4).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Required {
    /// Draft 3: the property itself is required
    Flag(bool),
    /// Draft 4: these members of the object are required
    Names(Vec<String>),
}

/// Additional properties can be a boolean or a schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` allows any value, `false` none
    Bool(bool),
    /// Values must match this schema
    Schema(Box<RawSchema>),
}

/// Treat an explicit `null` (e.g. `responses:` with nothing below) as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RawSchema {
    /// Serialize for error messages.
    pub fn to_diagnostic(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

/// Decode RAML (YAML) text into a generic value tree.
///
/// Mapping keys are stringified (`200:` becomes `"200"`), tags such as
/// `!include` are dropped in favor of their value, and key order is kept.
pub fn decode_document(text: &str) -> Result<Value> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
    yaml_to_json(yaml)
}

fn yaml_to_json(value: serde_yaml::Value) -> Result<Value> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number_to_json(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(yaml_key_to_string(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number_to_json(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or_else(|| Value::String(n.to_string()), Value::Number)
    }
}

fn yaml_key_to_string(key: serde_yaml::Value) -> Result<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key_to_string(tagged.value),
        other => Err(GenerateError::InvalidDocument(format!(
            "unsupported mapping key: {other:?}"
        ))),
    }
}

/// Render a scalar document value as text (`10`, `true`, `asc`).
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

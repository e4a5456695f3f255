//! Normalization from a RAML document to API IR.
//!
//! This module handles all the RAML-specific logic:
//! - Endpoint discovery over the two-level resource tree
//! - Request/response body resolution (JSON and form bodies)
//! - Schema decoding and identity-based model registration
//! - URI parameter inheritance from ancestor paths

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{GenerateError, Result};
use crate::raml::spec::{
    AdditionalProperties, BodyType, Method, NamedParameter, RamlDocument, RamlResponse, RawSchema,
    Required, Resource, scalar_to_string,
};

use super::api::{
    Endpoint, HttpMethod, Parameter, ParameterType, ParsedDocument, RequestBody, Response,
};
use super::schema::{ModelRegistry, ObjectDefinition, Primitive, PropertyDefinition, PropertyKind};
use super::utils::{join_url, url_placeholders};

/// Mime types treated as form bodies.
const FORM_MIME_TYPES: [&str; 2] = ["multipart/form-data", "application/x-www-form-urlencoded"];

/// Shared state for one normalization pass.
struct Normalizer {
    /// Named schema texts from the document's top-level `schemas`
    schemas: IndexMap<String, Value>,
    registry: ModelRegistry,
}

/// Normalize a decoded RAML document into API IR
pub fn normalize_document(document: &Value) -> Result<ParsedDocument> {
    if !document.is_object() {
        return Err(GenerateError::InvalidDocument(format!(
            "expected a mapping at the document root, found {}",
            value_kind(document)
        )));
    }

    let raml = RamlDocument::deserialize(document)
        .map_err(|e| GenerateError::InvalidDocument(e.to_string()))?;

    let mut normalizer = Normalizer {
        schemas: collect_named_schemas(raml.schemas.as_ref())?,
        registry: ModelRegistry::new(),
    };

    let mut endpoints = normalizer.discover_endpoints(&raml.entries)?;
    inherit_uri_parameters(&mut endpoints)?;

    debug!(
        endpoints = endpoints.len(),
        models = normalizer.registry.len(),
        "Normalized RAML document."
    );

    Ok(ParsedDocument {
        title: raml.title,
        base_uri: raml.base_uri,
        version: raml.version.as_ref().and_then(scalar_to_string),
        endpoints,
        models: normalizer.registry,
    })
}

/// Collect `schemas` entries, given either as a list of single-entry maps or as a map.
fn collect_named_schemas(schemas: Option<&Value>) -> Result<IndexMap<String, Value>> {
    let mut named = IndexMap::new();
    match schemas {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            named.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Some(Value::Array(items)) => {
            for item in items {
                let Value::Object(map) = item else {
                    return Err(GenerateError::InvalidDocument(format!(
                        "expected a mapping in schemas, found {}",
                        value_kind(item)
                    )));
                };
                named.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        Some(other) => {
            return Err(GenerateError::InvalidDocument(format!(
                "expected schemas to be a list or mapping, found {}",
                value_kind(other)
            )));
        }
    }
    Ok(named)
}

impl Normalizer {
    /// Walk parent paths, their child paths, then methods.
    fn discover_endpoints(&mut self, entries: &IndexMap<String, Value>) -> Result<Vec<Endpoint>> {
        let mut endpoints = Vec::new();

        for (parent_path, parent_value) in entries.iter().filter(|(k, _)| k.starts_with('/')) {
            let parent = read_resource(parent_path, parent_value)?;

            for (child_path, child_value) in parent.entries.iter().filter(|(k, _)| k.starts_with('/'))
            {
                let url = join_url(parent_path, child_path);
                let child = read_resource(&url, child_value)?;
                let ancestor_params = merge_uri_parameters(&parent, &child)?;

                for (key, method_value) in &child.entries {
                    let Some(method) = HttpMethod::from_key(key) else {
                        continue;
                    };
                    let request = read_method(method, &url, method_value)?;
                    debug!(method = %method, url = %url, "Discovered endpoint.");
                    let mut endpoint = self.traverse_request(
                        &request,
                        method,
                        &url,
                        ancestor_params.as_ref(),
                    )?;
                    if endpoint.description.is_none() {
                        endpoint.description.clone_from(&child.description);
                    }
                    endpoints.push(endpoint);
                }
            }
        }

        Ok(endpoints)
    }

    /// Build an endpoint from a method definition.
    fn traverse_request(
        &mut self,
        request: &Method,
        method: HttpMethod,
        url: &str,
        ancestor_params: Option<&IndexMap<String, Parameter>>,
    ) -> Result<Endpoint> {
        let context = format!("{method} {url}");

        let query_parameters = request
            .query_parameters
            .iter()
            .map(|(name, p)| Ok((name.clone(), normalize_parameter(p, false, &context)?)))
            .collect::<Result<IndexMap<_, _>>>()?;

        let request_body = match &request.body {
            Some(bodies) => self.normalize_request_body(bodies, &context)?,
            None => None,
        };

        let responses = self.traverse_responses(&request.responses, &context)?;

        Ok(Endpoint {
            method,
            url: url.to_string(),
            description: request.description.clone(),
            url_parameters: ancestor_params.cloned().unwrap_or_default(),
            query_parameters,
            request_body,
            responses,
        })
    }

    /// Resolve the request body: a JSON body first, then a form body.
    fn normalize_request_body(
        &mut self,
        bodies: &IndexMap<String, Option<BodyType>>,
        context: &str,
    ) -> Result<Option<RequestBody>> {
        if let Some((mime_type, body)) = find_json_body(bodies) {
            let context = format!("{context} request body");
            let example = match body {
                Some(b) => parse_example(b.example.as_ref(), &context)?,
                None => None,
            };
            let schema = match body.and_then(|b| b.schema.as_ref()) {
                Some(schema) => Some(self.normalize_body_schema(schema, &context)?),
                None => None,
            };
            return Ok(Some(RequestBody {
                mime_type: mime_type.to_string(),
                example,
                schema,
            }));
        }

        for form_type in FORM_MIME_TYPES {
            if let Some(body) = bodies.get(form_type) {
                let fields = body
                    .as_ref()
                    .map(|b| &b.form_parameters)
                    .into_iter()
                    .flatten()
                    .map(|(name, field)| Ok((name.clone(), form_field_definition(field, context)?)))
                    .collect::<Result<IndexMap<_, _>>>()?;
                let required = fields.values().any(|f| f.required == Some(true));

                let mut schema = PropertyDefinition::new(PropertyKind::Object(ObjectDefinition {
                    properties: fields,
                    ..ObjectDefinition::default()
                }));
                schema.required = Some(required);

                return Ok(Some(RequestBody {
                    mime_type: form_type.to_string(),
                    example: None,
                    schema: Some(schema),
                }));
            }
        }

        Ok(None)
    }

    /// Build responses for every status code.
    fn traverse_responses(
        &mut self,
        responses: &IndexMap<String, Option<RamlResponse>>,
        context: &str,
    ) -> Result<BTreeMap<u16, Response>> {
        let mut result = BTreeMap::new();

        for (code, response) in responses {
            let status: u16 = code.parse().map_err(|_| {
                GenerateError::InvalidDocument(format!(
                    "invalid status code '{code}' in {context}"
                ))
            })?;

            let Some(response) = response else {
                result.insert(status, Response::default());
                continue;
            };

            let mut normalized = Response {
                description: response.description.clone(),
                ..Response::default()
            };

            if let Some((_, Some(body))) = response.body.as_ref().and_then(find_json_body) {
                let context = format!("{context} response {status}");
                normalized.body_example = parse_example(body.example.as_ref(), &context)?;
                if let Some(schema) = &body.schema {
                    normalized.body_schema = Some(self.normalize_body_schema(schema, &context)?);
                }
            }

            result.insert(status, normalized);
        }

        Ok(result)
    }

    /// Parse a body schema (JSON text, schema name or inline mapping) and normalize it.
    fn normalize_body_schema(&mut self, schema: &Value, context: &str) -> Result<PropertyDefinition> {
        let value = match schema {
            Value::String(text) => {
                let resolved = self.schemas.get(text.trim()).cloned();
                match resolved {
                    Some(Value::String(named)) => parse_json(&named, context)?,
                    Some(other) => other,
                    None => parse_json(text, context)?,
                }
            }
            other => other.clone(),
        };

        let raw = RawSchema::deserialize(&value).map_err(|e| GenerateError::InvalidSchema {
            context: context.to_string(),
            message: e.to_string(),
        })?;

        let definition = decode_schema(&raw)?;
        Ok(normalize_schema(&definition, &mut self.registry))
    }
}

/// Read a resource mapping; an empty resource (`/path:` with no value) is allowed.
fn read_resource(path: &str, value: &Value) -> Result<Resource> {
    if value.is_null() {
        return Ok(Resource::default());
    }
    Resource::deserialize(value)
        .map_err(|e| GenerateError::InvalidDocument(format!("resource '{path}': {e}")))
}

/// Read a method mapping; `get:` with no value is allowed.
fn read_method(method: HttpMethod, url: &str, value: &Value) -> Result<Method> {
    if value.is_null() {
        return Ok(Method::default());
    }
    Method::deserialize(value)
        .map_err(|e| GenerateError::InvalidDocument(format!("{method} {url}: {e}")))
}

/// URI parameters declared on the parent resource, overridden by the child's.
fn merge_uri_parameters(
    parent: &Resource,
    child: &Resource,
) -> Result<Option<IndexMap<String, Parameter>>> {
    if parent.uri_parameters.is_empty() && child.uri_parameters.is_empty() {
        return Ok(None);
    }

    let mut merged = IndexMap::new();
    for (name, p) in parent.uri_parameters.iter().chain(&child.uri_parameters) {
        merged.insert(name.clone(), normalize_parameter(p, true, "uriParameters")?);
    }
    Ok(Some(merged))
}

/// Find the first JSON body (`application/json` or `*+json`).
fn find_json_body(
    bodies: &IndexMap<String, Option<BodyType>>,
) -> Option<(&str, Option<&BodyType>)> {
    bodies
        .iter()
        .find(|(mime, _)| *mime == "application/json" || mime.ends_with("+json"))
        .map(|(mime, body)| (mime.as_str(), body.as_ref()))
}

/// Normalize a URI or query parameter. URI parameters default to required.
fn normalize_parameter(p: &NamedParameter, uri: bool, context: &str) -> Result<Parameter> {
    let ty = match p.kind.as_deref() {
        None | Some("string" | "date") => ParameterType::String,
        Some("number" | "integer") => ParameterType::Number,
        Some("boolean") => ParameterType::Boolean,
        Some(other) => {
            return Err(GenerateError::InvalidDocument(format!(
                "unsupported parameter type '{other}' in {context}"
            )));
        }
    };

    Ok(Parameter {
        description: p.description.clone(),
        ty,
        required: p.required.unwrap_or(uri),
        repeat: p.repeat,
        default: p.default.as_ref().and_then(scalar_to_string),
        example: p.example.as_ref().and_then(scalar_to_string),
    })
}

/// Turn a form parameter into a property definition.
fn form_field_definition(field: &NamedParameter, context: &str) -> Result<PropertyDefinition> {
    let primitive = match field.kind.as_deref() {
        None | Some("string" | "date") => Primitive::String,
        Some("number") => Primitive::Number,
        Some("integer") => Primitive::Integer,
        Some("boolean") => Primitive::Boolean,
        Some("file") => Primitive::Any,
        Some(other) => {
            return Err(GenerateError::InvalidDocument(format!(
                "unsupported form parameter type '{other}' in {context}"
            )));
        }
    };

    Ok(PropertyDefinition {
        kind: PropertyKind::Primitive(primitive),
        description: field.description.clone(),
        example: field.example.clone(),
        default: field.default.clone(),
        required: Some(field.required.unwrap_or(false)),
    })
}

/// Parse an example: JSON text is decoded, inline values are taken as is.
fn parse_example(example: Option<&Value>, context: &str) -> Result<Option<Value>> {
    match example {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => parse_json(text, &format!("{context} example")).map(Some),
        Some(other) => Ok(Some(other.clone())),
    }
}

fn parse_json(text: &str, context: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|source| GenerateError::InvalidJson {
        context: context.to_string(),
        source,
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

/// Decode a raw JSON schema into a property definition.
///
/// A schema without `type` is treated as an object when it carries `$ref`,
/// `properties` or `additionalProperties`. Any other missing or unknown type
/// is an unhandled schema.
pub fn decode_schema(raw: &RawSchema) -> Result<PropertyDefinition> {
    let kind = match &raw.kind {
        Some(Value::String(t)) => t.as_str(),
        None if raw.reference.is_some()
            || raw.properties.is_some()
            || raw.additional_properties.is_some() =>
        {
            "object"
        }
        other => return Err(unhandled(other.as_ref(), raw)),
    };

    let kind = match kind {
        "any" => PropertyKind::Primitive(Primitive::Any),
        "boolean" => PropertyKind::Primitive(Primitive::Boolean),
        "integer" | "number" | "string"
            if raw.enum_values.as_ref().is_some_and(|values| !values.is_empty()) =>
        {
            PropertyKind::Enum(raw.enum_values.clone().unwrap_or_default())
        }
        "integer" => PropertyKind::Primitive(Primitive::Integer),
        "number" => PropertyKind::Primitive(Primitive::Number),
        "string" => PropertyKind::Primitive(Primitive::String),
        "array" => {
            let Some(items) = &raw.items else {
                return Err(GenerateError::InvalidSchema {
                    context: raw.to_diagnostic(),
                    message: "array schema without items".to_string(),
                });
            };
            PropertyKind::Array(Box::new(decode_schema(items)?))
        }
        "object" => PropertyKind::Object(decode_object(raw)?),
        _ => return Err(unhandled(raw.kind.as_ref(), raw)),
    };

    Ok(PropertyDefinition {
        kind,
        description: raw.description.clone(),
        example: raw.example.clone(),
        default: raw.default.clone(),
        required: match &raw.required {
            Some(Required::Flag(flag)) => Some(*flag),
            _ => None,
        },
    })
}

fn decode_object(raw: &RawSchema) -> Result<ObjectDefinition> {
    let required_names: &[String] = match &raw.required {
        Some(Required::Names(names)) => names,
        _ => &[],
    };

    let mut properties = IndexMap::new();
    for (name, schema) in raw.properties.iter().flatten() {
        let mut property = decode_schema(schema)?;
        if property.required.is_none() && required_names.contains(name) {
            property.required = Some(true);
        }
        properties.insert(name.clone(), property);
    }

    let additional_properties = match &raw.additional_properties {
        None | Some(AdditionalProperties::Bool(false)) => None,
        Some(AdditionalProperties::Bool(true)) => Some(Box::new(PropertyDefinition::new(
            PropertyKind::Primitive(Primitive::Any),
        ))),
        Some(AdditionalProperties::Schema(schema)) => Some(Box::new(decode_schema(schema)?)),
    };

    Ok(ObjectDefinition {
        id: raw.id.clone().filter(|id| !id.is_empty()),
        reference: raw.reference.clone().filter(|r| !r.is_empty()),
        properties,
        additional_properties,
    })
}

fn unhandled(kind: Option<&Value>, raw: &RawSchema) -> GenerateError {
    GenerateError::UnhandledSchema {
        kind: kind.map_or_else(|| "(missing)".to_string(), Value::to_string),
        schema: raw.to_diagnostic(),
    }
}

/// Normalize a schema, registering named objects in `registry`.
///
/// - Primitives and enums are returned unchanged.
/// - Arrays are rebuilt around their normalized items and never registered.
/// - Objects are looked up by `$ref`, then `id`. A known key resolves to a
///   `Model` reference to the existing entry. A new `id` is reserved before
///   the members are normalized, which keeps cyclic schemas finite.
///   Objects without `id` stay inline with normalized members.
pub fn normalize_schema(def: &PropertyDefinition, registry: &mut ModelRegistry) -> PropertyDefinition {
    match &def.kind {
        PropertyKind::Primitive(_) | PropertyKind::Enum(_) | PropertyKind::Model(_) => def.clone(),
        PropertyKind::Array(items) => {
            def.with_kind(PropertyKind::Array(Box::new(normalize_schema(items, registry))))
        }
        PropertyKind::Object(object) => {
            let key = object.identity().unwrap_or("");
            if registry.contains(key) {
                return def.with_kind(PropertyKind::Model(key.to_string()));
            }

            match &object.id {
                Some(id) => {
                    let placeholder = def.with_kind(PropertyKind::Object(ObjectDefinition {
                        id: Some(id.clone()),
                        ..ObjectDefinition::default()
                    }));
                    if !registry.reserve(id, placeholder) {
                        return def.with_kind(PropertyKind::Model(id.clone()));
                    }
                    debug!(model = %id, "Registered model.");

                    let members = normalize_members(object, registry);
                    registry.complete(id, def.with_kind(PropertyKind::Object(members)));
                    def.with_kind(PropertyKind::Model(id.clone()))
                }
                None => def.with_kind(PropertyKind::Object(normalize_members(object, registry))),
            }
        }
    }
}

fn normalize_members(object: &ObjectDefinition, registry: &mut ModelRegistry) -> ObjectDefinition {
    let properties = object
        .properties
        .iter()
        .map(|(name, property)| (name.clone(), normalize_schema(property, registry)))
        .collect();

    let additional_properties = object
        .additional_properties
        .as_ref()
        .map(|value| Box::new(normalize_schema(value, registry)));

    ObjectDefinition {
        id: object.id.clone(),
        reference: object.reference.clone(),
        properties,
        additional_properties,
    }
}

/// Copy URI parameters from ancestor endpoints onto their descendants.
///
/// Endpoints are processed shortest URL first. For each placeholder, the URL
/// prefix ending at its closing brace is looked up among the endpoints already
/// processed; a match contributes its URI parameters without overriding the
/// endpoint's own. Every placeholder must end up defined.
pub fn inherit_uri_parameters(endpoints: &mut [Endpoint]) -> Result<()> {
    let mut order: Vec<usize> = (0..endpoints.len()).collect();
    order.sort_by_key(|&i| endpoints[i].url.len());

    for (position, &index) in order.iter().enumerate() {
        let url = endpoints[index].url.clone();
        let placeholders = url_placeholders(&url);

        for placeholder in &placeholders {
            let prefix = &url[..placeholder.end];
            let ancestor = order[..position]
                .iter()
                .copied()
                .find(|&j| endpoints[j].url == prefix);

            let Some(ancestor) = ancestor else {
                continue;
            };

            let inherited = endpoints[ancestor].url_parameters.clone();
            let own = &mut endpoints[index].url_parameters;
            for (name, parameter) in inherited {
                if !own.contains_key(&name) {
                    debug!(url = %url, parameter = %name, from = %prefix, "Inherited URI parameter.");
                    own.insert(name, parameter);
                }
            }
        }

        for placeholder in placeholders {
            if !endpoints[index].url_parameters.contains_key(&placeholder.name) {
                warn!(url = %url, parameter = %placeholder.name, "Undefined URI parameter.");
                return Err(GenerateError::MissingUriParameter {
                    name: placeholder.name,
                    url,
                });
            }
        }
    }

    Ok(())
}

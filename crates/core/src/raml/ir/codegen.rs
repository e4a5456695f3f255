//! Code generation from API IR to TypeScript AST.
//!
//! This module turns the normalized document (endpoints and the model
//! registry) into declaration nodes:
//! - the integer alias
//! - the optional endpoint index, keyed by method then URL
//! - one interface per registered model
//!
//! The generated AST can then be emitted to strings via the `Emit` trait.

use indexmap::IndexMap;
use raml2ts_common::{Literal, quote_string};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::RendererOptions;
use crate::error::{GenerateError, Result};

use super::api::{Endpoint, HttpMethod, Parameter, ParameterType, ParsedDocument};
use super::docs::{DocParts, build_doc_comment, splice_default};
use super::schema::{ObjectDefinition, Primitive, PropertyDefinition, PropertyKind};
use super::types::{
    DocComment, TsDecl, TsInterface, TsModule, TsPrimitive, TsProp, TsType, TsTypeAlias,
};
use super::utils::model_name;

/// Name of the alias declared in every module's preamble.
const INTEGER_ALIAS: &str = "Integer";

/// Generate a complete TypeScript module from a parsed document.
pub fn codegen_module(doc: &ParsedDocument, options: &RendererOptions) -> Result<TsModule> {
    let codegen = Codegen::new(doc, options);

    let mut decls = vec![TsDecl::TypeAlias(Codegen::integer_alias())];

    if options.add_endpoint_list {
        decls.push(TsDecl::Interface(codegen.endpoint_index()?));
    }

    let mut models = doc
        .models
        .iter()
        .map(|(id, def)| codegen.model_interface(id, def))
        .collect::<Result<Vec<_>>>()?;
    if options.sort_interfaces {
        models.sort_by(|a, b| a.name.cmp(&b.name));
    }
    warn_on_name_collisions(&models);

    info!(
        models = models.len(),
        endpoints = doc.endpoints.len(),
        endpoint_index = options.add_endpoint_list,
        "Generated declarations."
    );

    decls.extend(models.into_iter().map(TsDecl::Interface));

    Ok(TsModule {
        header: vec![header_line(doc)],
        decls,
    })
}

fn header_line(doc: &ParsedDocument) -> String {
    let title = doc.title.as_deref().unwrap_or("API");
    match &doc.version {
        Some(version) => format!("Generated from {title} version {version}. Do not edit."),
        None => format!("Generated from {title}. Do not edit."),
    }
}

fn warn_on_name_collisions(models: &[TsInterface]) {
    let mut seen: Vec<&str> = Vec::with_capacity(models.len());
    for model in models {
        if seen.contains(&model.name.as_str()) {
            warn!(name = %model.name, "Several models derive the same interface name.");
        } else {
            seen.push(&model.name);
        }
    }
}

/// Where a model is used: the endpoints returning it and their examples.
#[derive(Debug, Default)]
struct ModelUsage<'a> {
    endpoints: Vec<(HttpMethod, &'a str)>,
    response_examples: Vec<&'a Value>,
    request_examples: Vec<&'a Value>,
}

/// Registry key a body schema resolves to, if it names a model directly.
fn model_key(def: &PropertyDefinition) -> Option<&str> {
    match &def.kind {
        PropertyKind::Model(key) => Some(key),
        PropertyKind::Object(object) => object.reference.as_deref(),
        _ => None,
    }
}

fn is_empty_example(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Format a schema default for display inside a comment.
fn display_default(value: &Value) -> String {
    match value {
        Value::String(s) => quote_string(s),
        other => other.to_string(),
    }
}

struct Codegen<'a> {
    doc: &'a ParsedDocument,
    options: &'a RendererOptions,
    usage: IndexMap<&'a str, ModelUsage<'a>>,
}

impl<'a> Codegen<'a> {
    fn new(doc: &'a ParsedDocument, options: &'a RendererOptions) -> Self {
        let mut usage: IndexMap<&'a str, ModelUsage<'a>> = IndexMap::new();

        for endpoint in &doc.endpoints {
            for response in endpoint.responses.values() {
                let Some(key) = response.body_schema.as_ref().and_then(model_key) else {
                    continue;
                };
                let entry = usage.entry(key).or_default();
                entry.endpoints.push((endpoint.method, endpoint.url.as_str()));
                if let Some(example) = response.body_example.as_ref() {
                    entry.response_examples.push(example);
                }
            }

            if let Some(body) = &endpoint.request_body
                && let Some(key) = body.schema.as_ref().and_then(model_key)
            {
                let entry = usage.entry(key).or_default();
                if let Some(example) = body.example.as_ref() {
                    entry.request_examples.push(example);
                }
            }
        }

        Self {
            doc,
            options,
            usage,
        }
    }

    // =========================================================================
    // Names and types
    // =========================================================================

    fn interface_name(&self, id: &str) -> String {
        format!(
            "{}{}{}",
            self.options.interface_prefix,
            model_name(id),
            self.options.interface_suffix
        )
    }

    fn integer_alias() -> TsTypeAlias {
        let mut docs = DocComment::default();
        docs.push_text("An integral number, represented as a `number`.");
        TsTypeAlias {
            name: INTEGER_ALIAS.to_string(),
            docs,
            ty: TsType::Primitive(TsPrimitive::Number),
        }
    }

    /// The type a property renders as.
    fn type_of(&self, def: &PropertyDefinition, context: &str) -> Result<TsType> {
        Ok(match &def.kind {
            PropertyKind::Primitive(Primitive::Any) => TsType::Primitive(TsPrimitive::Any),
            PropertyKind::Primitive(Primitive::Boolean) => TsType::Primitive(TsPrimitive::Boolean),
            PropertyKind::Primitive(Primitive::Integer) => {
                TsType::Ref(self.options.emit_integer_as.clone())
            }
            PropertyKind::Primitive(Primitive::Number) => TsType::Primitive(TsPrimitive::Number),
            PropertyKind::Primitive(Primitive::String) => TsType::Primitive(TsPrimitive::String),
            PropertyKind::Enum(values) => {
                TsType::union(values.iter().map(|v| TsType::Literal(Literal::from(v))))
            }
            PropertyKind::Array(items) => {
                TsType::Array(Box::new(self.type_of(items, &format!("{context}[]"))?))
            }
            PropertyKind::Model(key) => TsType::Ref(self.interface_name(key)),
            PropertyKind::Object(object) => {
                if let Some(identity) = object.identity() {
                    if !self.doc.models.contains(identity) {
                        debug!(model = %identity, "Reference to an unregistered model.");
                    }
                    TsType::Ref(self.interface_name(identity))
                } else if let Some(value) = &object.additional_properties {
                    TsType::Map(Box::new(self.type_of(value, &format!("{context}[key]"))?))
                } else {
                    return Err(GenerateError::UnnamedObject(context.to_string()));
                }
            }
        })
    }

    /// The type a request or response body renders as.
    ///
    /// Anonymous objects, such as form bodies, render as inline object types.
    fn body_type_of(&self, def: &PropertyDefinition, context: &str) -> Result<TsType> {
        match &def.kind {
            PropertyKind::Object(object)
                if object.identity().is_none() && object.additional_properties.is_none() =>
            {
                Ok(TsType::Object(self.fields(object, context)?))
            }
            _ => self.type_of(def, context),
        }
    }

    /// The registered model a property points at, if any.
    fn resolve_model(&self, def: &PropertyDefinition) -> Option<&'a PropertyDefinition> {
        model_key(def).and_then(|key| self.doc.models.get(key))
    }

    /// Object members of a definition, following model references.
    fn members<'b>(&'b self, def: &'b PropertyDefinition) -> Option<&'b ObjectDefinition> {
        match self.resolve_model(def) {
            Some(model) => model.as_object(),
            None => def.as_object(),
        }
    }

    fn examples_enabled(&self) -> bool {
        self.options.emit_request_examples || self.options.emit_response_examples
    }

    fn docs(&self, parts: &DocParts<'_>) -> DocComment {
        build_doc_comment(parts, &self.options.method_sort_order, &self.options.indentation)
    }

    fn prop(&self, name: impl Into<String>, ty: TsType, optional: bool, docs: DocComment) -> TsProp {
        TsProp {
            name: name.into(),
            ty,
            optional,
            readonly: self.options.emit_interfaces_as_readonly,
            docs,
        }
    }

    // =========================================================================
    // Models
    // =========================================================================

    fn model_interface(&self, id: &str, def: &PropertyDefinition) -> Result<TsInterface> {
        let name = self.interface_name(id);
        let usage = self.usage.get(id);

        let endpoints = match usage {
            Some(usage) if self.options.emit_request_urls => usage.endpoints.clone(),
            _ => Vec::new(),
        };
        let docs = self.docs(&DocParts {
            description: def.description.as_deref(),
            default: None,
            endpoints,
            example: usage.and_then(|usage| self.model_example(usage)),
        });

        let (props, index_signature) = match def.as_object() {
            Some(object) => (
                self.fields(object, &name)?,
                object
                    .additional_properties
                    .as_ref()
                    .map(|value| self.type_of(value, &format!("{name}[key]")))
                    .transpose()?,
            ),
            None => (Vec::new(), None),
        };

        debug!(model = %id, interface = %name, fields = props.len(), "Generated model interface.");

        Ok(TsInterface {
            name,
            docs,
            props,
            index_signature,
        })
    }

    /// First non-empty response example, then the first non-empty request example.
    fn model_example(&self, usage: &ModelUsage<'a>) -> Option<&'a Value> {
        let first = |examples: &[&'a Value]| examples.iter().copied().find(|e| !is_empty_example(e));

        let response = if self.options.emit_response_examples {
            first(&usage.response_examples)
        } else {
            None
        };
        response.or_else(|| {
            if self.options.emit_request_examples {
                first(&usage.request_examples)
            } else {
                None
            }
        })
    }

    /// One field per object property, sorted by name when `sortKeys` is set.
    fn fields(&self, object: &ObjectDefinition, context: &str) -> Result<Vec<TsProp>> {
        let mut properties: Vec<_> = object.properties.iter().collect();
        if self.options.sort_keys {
            properties.sort_by(|a, b| a.0.cmp(b.0));
        }

        properties
            .into_iter()
            .map(|(name, def)| self.field(name, def, &format!("{context}.{name}")))
            .collect()
    }

    fn field(&self, name: &str, def: &PropertyDefinition, context: &str) -> Result<TsProp> {
        let model = self.resolve_model(def);
        let required = def
            .required
            .or(model.and_then(|m| m.required))
            .unwrap_or(false);
        let description = def
            .description
            .as_deref()
            .or(model.and_then(|m| m.description.as_deref()));

        let docs = self.docs(&DocParts {
            description,
            default: def.default.as_ref().map(display_default),
            endpoints: Vec::new(),
            example: def.example.as_ref().filter(|_| self.examples_enabled()),
        });

        Ok(self.prop(name, self.type_of(def, context)?, !required, docs))
    }

    // =========================================================================
    // Endpoint index
    // =========================================================================

    /// `export interface Endpoints { GET: { '/url': { ... } } }`
    fn endpoint_index(&self) -> Result<TsInterface> {
        let mut groups = Vec::new();
        let mut seen_methods = Vec::new();

        for &method in &self.options.method_sort_order {
            if seen_methods.contains(&method) {
                continue;
            }
            seen_methods.push(method);

            let mut endpoints: Vec<&Endpoint> = self
                .doc
                .endpoints
                .iter()
                .filter(|e| e.method == method)
                .collect();
            endpoints.sort_by(|a, b| a.url.cmp(&b.url));

            let mut props = Vec::with_capacity(endpoints.len());
            let mut previous: Option<&str> = None;
            for endpoint in endpoints {
                if previous == Some(endpoint.url.as_str()) {
                    warn!(method = %method, url = %endpoint.url, "Duplicate endpoint, keeping the first.");
                    continue;
                }
                previous = Some(&endpoint.url);

                let mut docs = DocComment::default();
                docs.push_text(endpoint.description.as_deref().unwrap_or(""));
                props.push(self.prop(&endpoint.url, self.endpoint_type(endpoint)?, false, docs));
            }

            groups.push(self.prop(method.as_str(), TsType::Object(props), false, DocComment::default()));
        }

        for endpoint in &self.doc.endpoints {
            if !seen_methods.contains(&endpoint.method) {
                warn!(method = %endpoint.method, url = %endpoint.url, "Method missing from methodSortOrder, left out of the endpoint index.");
            }
        }

        Ok(TsInterface {
            name: self.options.endpoint_interface.clone(),
            docs: DocComment::default(),
            props: groups,
            index_signature: None,
        })
    }

    fn endpoint_type(&self, endpoint: &Endpoint) -> Result<TsType> {
        let context = format!("{} {}", endpoint.method, endpoint.url);

        // Request
        let mut parts = Vec::new();
        if !endpoint.url_parameters.is_empty() {
            parts.push(self.parameters_prop("params", &endpoint.url_parameters));
        }
        if !endpoint.query_parameters.is_empty() {
            parts.push(self.parameters_prop("query", &endpoint.query_parameters));
        }
        if let Some(body) = &endpoint.request_body {
            let (ty, required) = match &body.schema {
                Some(schema) => (
                    self.body_type_of(schema, &format!("{context} request"))?,
                    self.body_required(schema),
                ),
                None => (TsType::Primitive(TsPrimitive::Any), false),
            };
            parts.push(self.prop("body", ty, !required, DocComment::default()));
        }
        let request_optional = parts.iter().all(|p| p.optional);

        // Responses
        let mut statuses = Vec::with_capacity(endpoint.responses.len());
        for (status, response) in &endpoint.responses {
            let ty = match &response.body_schema {
                Some(schema) => self.body_type_of(schema, &format!("{context} {status}"))?,
                None => TsType::Primitive(TsPrimitive::Void),
            };
            let example = if self.options.emit_response_examples {
                response.body_example.as_ref()
            } else {
                None
            };
            let docs = self.docs(&DocParts {
                description: response.description.as_deref(),
                example,
                ..DocParts::default()
            });
            statuses.push(self.prop(status.to_string(), ty, false, docs));
        }

        let response = if statuses.is_empty() {
            TsType::Primitive(TsPrimitive::Void)
        } else {
            TsType::union(statuses.iter().map(|p| p.ty.clone()))
        };

        Ok(TsType::Object(vec![
            self.prop("request", TsType::Object(parts), request_optional, DocComment::default()),
            self.prop("response", response, false, DocComment::default()),
            self.prop("responses", TsType::Object(statuses), false, DocComment::default()),
        ]))
    }

    /// A body is required when its schema says so or any of its fields is.
    fn body_required(&self, def: &PropertyDefinition) -> bool {
        def.required == Some(true)
            || self.members(def).is_some_and(|object| {
                object.properties.values().any(|p| p.required == Some(true))
            })
    }

    fn parameters_prop(&self, name: &str, parameters: &IndexMap<String, Parameter>) -> TsProp {
        let fields: Vec<TsProp> = parameters
            .iter()
            .map(|(name, p)| self.parameter_field(name, p))
            .collect();
        let optional = fields.iter().all(|f| f.optional);
        self.prop(name, TsType::Object(fields), optional, DocComment::default())
    }

    fn parameter_field(&self, name: &str, p: &Parameter) -> TsProp {
        let base = TsType::Primitive(match p.ty {
            ParameterType::Boolean => TsPrimitive::Boolean,
            ParameterType::Number => TsPrimitive::Number,
            ParameterType::String => TsPrimitive::String,
        });
        let ty = if p.repeat {
            TsType::Union(vec![base.clone(), TsType::Array(Box::new(base))])
        } else {
            base
        };

        let mut docs = DocComment::default();
        let description = p.description.as_deref().unwrap_or("");
        match &p.default {
            Some(default) => docs.push_text(splice_default(description, default)),
            None => docs.push_text(description),
        }
        if let Some(example) = &p.example {
            let example = match p.ty {
                ParameterType::String => quote_string(example),
                ParameterType::Boolean | ParameterType::Number => example.clone(),
            };
            docs.push_lines(vec!["@example".to_string(), example]);
        }

        self.prop(name, ty, !p.required, docs)
    }
}

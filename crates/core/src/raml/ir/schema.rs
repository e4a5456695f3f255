//! Normalized schema IR and the model registry.
//!
//! Schemas embedded in RAML bodies are decoded into `PropertyDefinition`
//! trees. Object schemas carrying an `id` are moved into the `ModelRegistry`
//! during normalization and replaced by `PropertyKind::Model` references, so
//! every use of the same id points at one canonical definition and cyclic
//! schemas stay finite.

use indexmap::IndexMap;
use serde_json::Value;

/// Primitive schema types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Unconstrained value, also used for file form fields
    Any,
    /// `true` or `false`
    Boolean,
    /// Whole number, rendered through the integer alias
    Integer,
    /// Any JSON number
    Number,
    /// Any JSON string
    String,
}

/// The shape of a property definition, discriminated by its `type`.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// any, boolean, integer, number, string
    Primitive(Primitive),
    /// A string or number restricted to a list of literal values
    Enum(Vec<Value>),
    /// Array with a single item schema
    Array(Box<PropertyDefinition>),
    /// Inline object: anonymous, a map, or an alias of another model via `$ref`
    Object(ObjectDefinition),
    /// Reference to a registered model, by registry key
    Model(String),
}

/// Object schema members
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectDefinition {
    /// Globally unique model identifier
    pub id: Option<String>,
    /// Identifier of the model this object aliases (`$ref`)
    pub reference: Option<String>,
    /// Named members, in schema order
    pub properties: IndexMap<String, PropertyDefinition>,
    /// Value schema when the object is a string-keyed map
    pub additional_properties: Option<Box<PropertyDefinition>>,
}

impl ObjectDefinition {
    /// The identifier this object is known by: `$ref` first, then `id`.
    pub fn identity(&self) -> Option<&str> {
        self.reference.as_deref().or(self.id.as_deref())
    }
}

/// A schema node together with the metadata of the site it appears at.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    /// What the schema describes
    pub kind: PropertyKind,
    /// Free-text description from the schema
    pub description: Option<String>,
    /// Example value from the schema
    pub example: Option<Value>,
    /// Default value from the schema
    pub default: Option<Value>,
    /// Explicit required flag; `None` when the schema does not say
    pub required: Option<bool>,
}

impl PropertyDefinition {
    /// Create a definition of the given kind with no metadata.
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            kind,
            description: None,
            example: None,
            default: None,
            required: None,
        }
    }

    /// Same site metadata, different kind.
    pub fn with_kind(&self, kind: PropertyKind) -> Self {
        Self {
            kind,
            description: self.description.clone(),
            example: self.example.clone(),
            default: self.default.clone(),
            required: self.required,
        }
    }

    /// Object members, if this is an inline object.
    pub fn as_object(&self) -> Option<&ObjectDefinition> {
        match &self.kind {
            PropertyKind::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// Registry of named models, keyed by model id, in discovery order.
///
/// Entries are never removed and never replaced by another model with the
/// same id: the first definition seen for an id is canonical.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelRegistry {
    models: IndexMap<String, PropertyDefinition>,
}

impl ModelRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a model is registered (or reserved) under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.models.contains_key(id)
    }

    /// The model registered under `id`.
    pub fn get(&self, id: &str) -> Option<&PropertyDefinition> {
        self.models.get(id)
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether no model has been registered.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Iterate models in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyDefinition)> {
        self.models.iter().map(|(id, def)| (id.as_str(), def))
    }

    /// Claim `id` before its members are normalized.
    ///
    /// Returns false, leaving the registry untouched, if the id is taken.
    pub(crate) fn reserve(&mut self, id: &str, placeholder: PropertyDefinition) -> bool {
        if self.models.contains_key(id) {
            return false;
        }
        self.models.insert(id.to_string(), placeholder);
        true
    }

    /// Fill in a reserved entry once its members are normalized.
    pub(crate) fn complete(&mut self, id: &str, definition: PropertyDefinition) {
        if let Some(entry) = self.models.get_mut(id) {
            *entry = definition;
        }
    }
}

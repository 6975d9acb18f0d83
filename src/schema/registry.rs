//! Node-type registry.
//!
//! Node types are declared in configuration and registered once at startup.
//! Each type names its fields and whether nodes of that type are reachable
//! by URL at all (content blocks usually are not).

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::field::{FieldKind, FieldMap, FieldSpec};

/// A node type: a name, a reachability flag and a field schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeType {
    pub name: String,
    /// Whether nodes of this type can be resolved from a URL.
    #[serde(default = "default_true")]
    pub reachable: bool,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

fn default_true() -> bool {
    true
}

impl NodeType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reachable: true,
            fields: Vec::new(),
        }
    }

    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check the declaration itself (names, enum values).
    fn check(&self) -> Result<(), SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyTypeName);
        }

        let mut seen = FxHashSet::default();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    node_type: self.name.clone(),
                    field: field.name.clone(),
                });
            }
            if field.kind == FieldKind::Enum && field.values.is_empty() {
                return Err(SchemaError::EmptyEnum {
                    node_type: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Errors in node-type declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("node type name is empty")]
    EmptyTypeName,

    #[error("node type `{0}` is declared twice")]
    DuplicateType(String),

    #[error("field `{field}` is declared twice on node type `{node_type}`")]
    DuplicateField { node_type: String, field: String },

    #[error("enum field `{field}` on node type `{node_type}` declares no values")]
    EmptyEnum { node_type: String, field: String },
}

/// A single problem found while validating node fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldViolation {
    #[error("unknown node type `{0}`")]
    UnknownType(String),

    #[error("node type `{node_type}` has no field `{field}`")]
    UnknownField { node_type: String, field: String },

    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("field `{field}` expects a {expected} value")]
    KindMismatch { field: String, expected: FieldKind },

    #[error("field `{field}` must be one of: {allowed}")]
    NotAllowed { field: String, allowed: String },
}

/// Registry mapping type names to their declarations.
///
/// Owned by the composition root and passed by reference; never global.
#[derive(Debug, Clone, Default)]
pub struct NodeTypeRegistry {
    types: FxHashMap<String, NodeType>,
}

impl NodeTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry, rejecting invalid or duplicate declarations.
    pub fn from_types(types: impl IntoIterator<Item = NodeType>) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        for node_type in types {
            registry.register(node_type)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, node_type: NodeType) -> Result<(), SchemaError> {
        node_type.check()?;
        if self.types.contains_key(&node_type.name) {
            return Err(SchemaError::DuplicateType(node_type.name));
        }
        self.types.insert(node_type.name.clone(), node_type);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&NodeType> {
        self.types.get(name)
    }

    /// Whether nodes of `name` may be resolved from a URL.
    ///
    /// Unknown types are never reachable.
    pub fn is_reachable(&self, name: &str) -> bool {
        self.types.get(name).is_some_and(|t| t.reachable)
    }

    /// Validate a field map against a node type.
    ///
    /// Collects every violation instead of stopping at the first one.
    pub fn validate(&self, node_type: &str, fields: &FieldMap) -> Result<(), Vec<FieldViolation>> {
        let Some(declared) = self.types.get(node_type) else {
            return Err(vec![FieldViolation::UnknownType(node_type.to_string())]);
        };

        let mut violations = Vec::new();

        for (name, value) in fields {
            match declared.field(name) {
                None => violations.push(FieldViolation::UnknownField {
                    node_type: node_type.to_string(),
                    field: name.clone(),
                }),
                Some(spec) if !spec.accepts(value) => {
                    violations.push(if spec.kind == FieldKind::Enum {
                        FieldViolation::NotAllowed {
                            field: name.clone(),
                            allowed: spec.values.join(", "),
                        }
                    } else {
                        FieldViolation::KindMismatch {
                            field: name.clone(),
                            expected: spec.kind,
                        }
                    });
                }
                Some(_) => {}
            }
        }

        for spec in declared.fields.iter().filter(|f| f.required) {
            if !fields.contains_key(&spec.name) {
                violations.push(FieldViolation::MissingField(spec.name.clone()));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

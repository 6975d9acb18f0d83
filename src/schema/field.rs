//! Field kinds, declarations and values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::date::CalendarDate;

/// Field values of one node source, keyed by field name.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Kind of value a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line string.
    String,
    /// Long-form text (markdown, HTML...). Stored as a string.
    Text,
    Integer,
    /// Floating point; integer values are accepted too.
    Decimal,
    Boolean,
    /// `YYYY-MM-DD` string.
    Date,
    /// String restricted to the declared `values`.
    Enum,
    /// Any structured value.
    Json,
}

impl FieldKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Enum => "enum",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration of one field on a node type.
///
/// ```toml
/// [[types.fields]]
/// name = "layout"
/// kind = "enum"
/// values = ["wide", "narrow"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Allowed values for `enum` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            values: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether `value` fits this field's kind.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match (self.kind, value) {
            (FieldKind::String | FieldKind::Text, FieldValue::String(_))
            | (FieldKind::Integer, FieldValue::Integer(_))
            | (FieldKind::Decimal, FieldValue::Decimal(_) | FieldValue::Integer(_))
            | (FieldKind::Boolean, FieldValue::Boolean(_))
            | (FieldKind::Json, _) => true,
            (FieldKind::Date, FieldValue::String(s)) => CalendarDate::parse(s).is_some(),
            (FieldKind::Enum, FieldValue::String(s)) => self.values.iter().any(|v| v == s),
            _ => false,
        }
    }
}

/// A field value.
///
/// Deserialized untagged, so plain TOML/JSON scalars map directly:
/// `true` -> `Boolean`, `3` -> `Integer`, `1.5` -> `Decimal`, `"x"` -> `String`,
/// arrays and tables -> `Json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    String(String),
    Json(serde_json::Value),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

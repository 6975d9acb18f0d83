//! Schema-driven node types.
//!
//! Nodes of different types carry different field sets. Instead of a
//! generated struct per type, every node carries its type name plus a
//! [`FieldMap`], and the [`NodeTypeRegistry`] validates maps against the
//! declared [`FieldSpec`]s.
//!
//! | Module     | Purpose                                          |
//! |------------|--------------------------------------------------|
//! | `field`    | `FieldKind`, `FieldSpec`, `FieldValue`           |
//! | `registry` | `NodeType`, `NodeTypeRegistry`, violations       |

mod field;
mod registry;

pub use field::{FieldKind, FieldMap, FieldSpec, FieldValue};
pub use registry::{FieldViolation, NodeType, NodeTypeRegistry, SchemaError};

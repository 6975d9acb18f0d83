//! `[[types]]` node-type declarations.
//!
//! # Example
//!
//! ```toml
//! [[types]]
//! name = "Article"
//! [[types.fields]]
//! name = "summary"
//! kind = "text"
//! required = true
//! [[types.fields]]
//! name = "category"
//! kind = "enum"
//! values = ["news", "event"]
//!
//! [[types]]
//! name = "Block"
//! reachable = false            # never resolvable by URL
//! ```
//!
//! When no type is declared, a single reachable `Page` type is used.

use rustc_hash::FxHashSet;

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::schema::{FieldKind, NodeType};

/// Type used when the config declares none.
pub fn default_types() -> Vec<NodeType> {
    vec![NodeType::new("Page")]
}

/// Check every declaration, reporting all problems at once.
pub fn validate_types(types: &[NodeType], diag: &mut ConfigDiagnostics) {
    let mut names = FxHashSet::default();

    for (i, node_type) in types.iter().enumerate() {
        if node_type.name.trim().is_empty() {
            diag.error(FieldPath::indexed("types", i, "name"), "type name is empty");
        } else if !names.insert(node_type.name.as_str()) {
            diag.error(
                FieldPath::indexed("types", i, "name"),
                format!("type `{}` is declared twice", node_type.name),
            );
        }

        let mut fields = FxHashSet::default();
        for (j, field) in node_type.fields.iter().enumerate() {
            let path = FieldPath::indexed(&format!("types[{i}].fields"), j, "");
            if !fields.insert(field.name.as_str()) {
                diag.error(
                    path.clone(),
                    format!("field `{}` is declared twice on `{}`", field.name, node_type.name),
                );
            }
            if field.kind == FieldKind::Enum && field.values.is_empty() {
                diag.error_with_hint(
                    path,
                    format!("enum field `{}` declares no values", field.name),
                    "add values = [\"a\", \"b\"]",
                );
            }
        }
    }
}

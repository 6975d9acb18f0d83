//! URL aliases.

use serde::Serialize;

use crate::core::{AliasId, NodeId};

/// An arbitrary stable string targeting one node.
///
/// Aliases are independent of node names and locales; the resolved
/// translation is the node's original one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlAlias {
    pub id: AliasId,
    pub alias: String,
    pub node: NodeId,
}

impl UrlAlias {
    pub fn new(id: AliasId, alias: impl Into<String>, node: NodeId) -> Self {
        Self {
            id,
            alias: alias.into(),
            node,
        }
    }
}

//! Content nodes.

use serde::Serialize;

use crate::core::{NodeId, NodeStatus, TranslationId};
use crate::schema::FieldMap;

/// Per-translation content of a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSource {
    pub translation: TranslationId,
    pub title: String,
    #[serde(skip_serializing_if = "FieldMap::is_empty")]
    pub fields: FieldMap,
}

impl NodeSource {
    pub fn new(translation: TranslationId, title: impl Into<String>) -> Self {
        Self {
            translation,
            title: title.into(),
            fields: FieldMap::new(),
        }
    }
}

/// A unit of content positioned in the node tree.
///
/// The tree owns the parent edge: `parent` is an id, never an owning
/// reference, and children are derived by the store from parent ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    /// Machine name, unique across the whole tree.
    pub name: String,
    /// Registered node type (see [`crate::schema::NodeTypeRegistry`]).
    pub node_type: String,
    pub status: NodeStatus,
    /// A locked node cannot be archived or deleted.
    pub locked: bool,
    /// Marks the site's home page.
    pub home: bool,
    /// Children of this node are not resolvable by path.
    pub hiding_children: bool,
    pub parent: Option<NodeId>,
    /// Sort key among siblings; gaps are allowed.
    pub position: f64,
    /// Insertion order under the current parent, breaks position ties.
    #[serde(skip)]
    pub seq: u64,
    /// Bumped on every committed change, used to detect conflicting writes.
    pub version: u64,
    /// Translated sources; the first one is the original translation.
    pub sources: Vec<NodeSource>,
}

impl Node {
    /// Create a root-level draft node.
    pub fn new(id: NodeId, name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            node_type: node_type.into(),
            status: NodeStatus::Draft,
            locked: false,
            home: false,
            hiding_children: false,
            parent: None,
            position: 0.0,
            seq: 0,
            version: 0,
            sources: Vec::new(),
        }
    }

    #[inline]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The translation this node's content was originally written in.
    pub fn original_translation(&self) -> Option<TranslationId> {
        self.sources.first().map(|s| s.translation)
    }

    pub fn source(&self, translation: TranslationId) -> Option<&NodeSource> {
        self.sources.iter().find(|s| s.translation == translation)
    }

    #[inline]
    pub fn has_translation(&self, translation: TranslationId) -> bool {
        self.source(translation).is_some()
    }

    /// Title in `translation`, falling back to the original, then the name.
    pub fn title(&self, translation: TranslationId) -> &str {
        self.source(translation)
            .or_else(|| self.sources.first())
            .map_or(self.name.as_str(), |s| s.title.as_str())
    }
}

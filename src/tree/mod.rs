//! Node tree invariants.
//!
//! The tree is not a service of its own: these are the rules every store
//! enforces when nodes are renamed, moved or asked whether they are
//! reachable. Stores expose their state through [`TreeView`]; the
//! operations here only *plan* changes, and the store applies a plan
//! atomically under its own write lock.
//!
//! | Module  | Purpose                                                |
//! |---------|--------------------------------------------------------|
//! | `order` | Sibling ordering, `Placement` -> position computation  |
//! | `walk`  | Ancestor walks, reachability, cycle checks             |
//! | `ops`   | Rename and move planning                               |

mod ops;
mod order;
mod walk;

use thiserror::Error;

use crate::content::Node;
use crate::core::NodeId;

pub use ops::{MovePlan, plan_insert, plan_move, plan_rename};
pub use order::{Placement, sort_siblings};
pub use walk::{ancestors, check_acyclic, is_reachable, nearest_reachable};

/// Read access to a node tree.
pub trait TreeView {
    fn node(&self, id: NodeId) -> Option<&Node>;

    /// Look up a node by its tree-unique name.
    fn node_named(&self, name: &str) -> Option<&Node>;

    /// Direct children of `parent` (`None` = root level), in any order.
    fn children_of(&self, parent: Option<NodeId>) -> Vec<&Node>;

    /// Children of `parent` in display order.
    fn sorted_children(&self, parent: Option<NodeId>) -> Vec<&Node> {
        let mut children = self.children_of(parent);
        sort_siblings(&mut children);
        children
    }
}

/// Tree invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("a node named `{0}` already exists")]
    NameAlreadyExists(String),

    #[error("title `{0}` does not produce a usable name")]
    EmptyName(String),

    #[error("placing {node} under {parent} would make it its own ancestor")]
    Cycle { node: NodeId, parent: NodeId },

    #[error("{0} is not a sibling at the target location")]
    NotASibling(NodeId),

    #[error("position must be a finite number")]
    InvalidPosition,
}

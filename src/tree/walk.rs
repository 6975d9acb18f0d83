//! Ancestor walks and reachability.
//!
//! Reachability is never cached: any ancestor's status or hiding flag can
//! change independently, so every question walks the current parent chain.

use rustc_hash::FxHashSet;

use crate::content::Node;
use crate::core::{NodeId, ViewMode};
use crate::schema::NodeTypeRegistry;

use super::{TreeError, TreeView};

/// Iterator over a node's ancestors, nearest first.
///
/// Panics if the parent chain loops: a cyclic tree is a corrupt
/// installation, not a per-request condition.
pub struct Ancestors<'a, V: TreeView + ?Sized> {
    view: &'a V,
    next: Option<NodeId>,
    origin: NodeId,
    seen: FxHashSet<NodeId>,
}

impl<'a, V: TreeView + ?Sized> Iterator for Ancestors<'a, V> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        assert!(
            id != self.origin && self.seen.insert(id),
            "node tree is cyclic: {id} repeats in the ancestor chain of {}",
            self.origin
        );
        let node = self.view.node(id)?;
        self.next = node.parent;
        Some(node)
    }
}

/// Walk the ancestors of `node`, nearest first.
pub fn ancestors<'a, V: TreeView + ?Sized>(view: &'a V, node: &Node) -> Ancestors<'a, V> {
    Ancestors {
        view,
        next: node.parent,
        origin: node.id,
        seen: FxHashSet::default(),
    }
}

/// Whether `node` may be served in `mode`.
///
/// A node is reachable when:
/// - its status is visible in `mode` (published, or any non-deleted status in preview)
/// - its node type is reachable
/// - no ancestor hides its children, and no ancestor is deleted
pub fn is_reachable<V: TreeView + ?Sized>(
    view: &V,
    node: &Node,
    registry: &NodeTypeRegistry,
    mode: ViewMode,
) -> bool {
    if !node.status.is_visible_in(mode) || !registry.is_reachable(&node.node_type) {
        return false;
    }
    ancestors(view, node).all(|a| !a.hiding_children && !a.status.is_deleted())
}

/// Nearest ancestor of `node` that is itself reachable in `mode`.
pub fn nearest_reachable<'a, V: TreeView + ?Sized>(
    view: &'a V,
    node: &Node,
    registry: &NodeTypeRegistry,
    mode: ViewMode,
) -> Option<&'a Node> {
    ancestors(view, node).find(|a| is_reachable(view, a, registry, mode))
}

/// Check that every parent chain among `nodes` terminates at a root.
///
/// Unlike [`ancestors`], reports the loop instead of panicking; used when
/// a store is built from persisted data.
pub fn check_acyclic<'a, V: TreeView + ?Sized>(
    view: &V,
    nodes: impl IntoIterator<Item = &'a Node>,
) -> Result<(), TreeError> {
    for node in nodes {
        let mut seen = FxHashSet::default();
        seen.insert(node.id);
        let mut current = node.parent;
        while let Some(id) = current {
            if !seen.insert(id) {
                return Err(TreeError::Cycle {
                    node: node.id,
                    parent: node.parent.unwrap_or(id),
                });
            }
            current = view.node(id).and_then(|n| n.parent);
        }
    }
    Ok(())
}

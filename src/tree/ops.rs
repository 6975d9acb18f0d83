//! Rename and move planning.
//!
//! Planning functions validate against a [`TreeView`] and return what the
//! store must write. Nothing here mutates; a rejected plan leaves the tree
//! untouched.

use crate::content::Node;
use crate::core::NodeId;
use crate::utils::slugify;

use super::order::{Slot, slot_for};
use super::{Placement, TreeError, TreeView};

/// Derive and validate a new machine name for `id` from `title`.
///
/// Returns the slug to store. Renaming a node to its current name is
/// allowed.
pub fn plan_rename<V: TreeView + ?Sized>(
    view: &V,
    id: NodeId,
    title: &str,
) -> Result<String, TreeError> {
    if view.node(id).is_none() {
        return Err(TreeError::NodeNotFound(id));
    }

    let name = slugify(title);
    if name.is_empty() {
        return Err(TreeError::EmptyName(title.to_string()));
    }

    match view.node_named(&name) {
        Some(owner) if owner.id != id => Err(TreeError::NameAlreadyExists(name)),
        _ => Ok(name),
    }
}

/// Result of a successful move plan.
#[derive(Debug, Clone, PartialEq)]
pub struct MovePlan {
    pub node: NodeId,
    pub parent: Option<NodeId>,
    pub position: f64,
    /// Siblings whose positions must be rewritten first, when no gap was left.
    pub renumbered: Vec<(NodeId, f64)>,
}

/// Plan moving `id` under `new_parent` (`None` = root level).
///
/// Rejects moves that would make the node its own ancestor.
pub fn plan_move<V: TreeView + ?Sized>(
    view: &V,
    id: NodeId,
    new_parent: Option<NodeId>,
    placement: Placement,
) -> Result<MovePlan, TreeError> {
    let node = view.node(id).ok_or(TreeError::NodeNotFound(id))?;

    if let Some(parent_id) = new_parent {
        let parent = view
            .node(parent_id)
            .ok_or(TreeError::NodeNotFound(parent_id))?;
        if parent_id == id || super::ancestors(view, parent).any(|a| a.id == id) {
            return Err(TreeError::Cycle {
                node: id,
                parent: parent_id,
            });
        }
    }

    let mut siblings = view.sorted_children(new_parent);
    siblings.retain(|n| n.id != node.id);

    let (position, renumbered) = place(&siblings, placement)?;
    Ok(MovePlan {
        node: id,
        parent: new_parent,
        position,
        renumbered,
    })
}

/// Plan the position of a node `id` about to be created under `parent`.
///
/// `id` must not be in the tree yet.
pub fn plan_insert<V: TreeView + ?Sized>(
    view: &V,
    id: NodeId,
    parent: Option<NodeId>,
    placement: Placement,
) -> Result<MovePlan, TreeError> {
    if let Some(parent_id) = parent
        && view.node(parent_id).is_none()
    {
        return Err(TreeError::NodeNotFound(parent_id));
    }

    let siblings = view.sorted_children(parent);
    let (position, renumbered) = place(&siblings, placement)?;
    Ok(MovePlan {
        node: id,
        parent,
        position,
        renumbered,
    })
}

/// Position for `placement` among sorted `siblings`, renumbering them when
/// no gap is left.
fn place(siblings: &[&Node], placement: Placement) -> Result<(f64, Vec<(NodeId, f64)>), TreeError> {
    if let Slot::Fits(position) = slot_for(siblings, placement)? {
        return Ok((position, Vec::new()));
    }

    // Gap exhausted: spread siblings out on whole numbers, then place again
    let respaced: Vec<Node> = siblings
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let mut copy = (*n).clone();
            copy.position = (i + 1) as f64;
            copy
        })
        .collect();
    let respaced_refs: Vec<&Node> = respaced.iter().collect();

    match slot_for(&respaced_refs, placement)? {
        Slot::Fits(position) => Ok((
            position,
            respaced.iter().map(|n| (n.id, n.position)).collect(),
        )),
        Slot::Exhausted => Err(TreeError::InvalidPosition),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::testing::TestTree;

    /// root(1) -> [a(2), b(3)], a -> [a1(4)]
    fn tree() -> TestTree {
        let mut tree = TestTree::default();
        tree.add(1, "root", None, 1.0);
        tree.add(2, "a", Some(1), 1.0);
        tree.add(3, "b", Some(1), 2.0);
        tree.add(4, "a1", Some(2), 1.0);
        tree
    }

    fn apply(tree: &mut TestTree, plan: &MovePlan) {
        for &(id, position) in &plan.renumbered {
            tree.get_mut(id).position = position;
        }
        let node = tree.get_mut(plan.node);
        node.parent = plan.parent;
        node.position = plan.position;
    }

    #[test]
    fn test_rename_slugifies() {
        let tree = tree();
        let name = plan_rename(&tree, NodeId::new(3), "Über Uns!").unwrap();
        assert_eq!(name, "uber-uns");
    }

    #[test]
    fn test_rename_to_own_name() {
        let tree = tree();
        assert_eq!(plan_rename(&tree, NodeId::new(3), "B").unwrap(), "b");
    }

    #[test]
    fn test_rename_collision() {
        let tree = tree();
        assert_eq!(
            plan_rename(&tree, NodeId::new(3), "A"),
            Err(TreeError::NameAlreadyExists("a".into()))
        );
    }

    #[test]
    fn test_rename_empty() {
        let tree = tree();
        assert!(matches!(
            plan_rename(&tree, NodeId::new(3), "!!!"),
            Err(TreeError::EmptyName(_))
        ));
        assert_eq!(
            plan_rename(&tree, NodeId::new(99), "x"),
            Err(TreeError::NodeNotFound(NodeId::new(99)))
        );
    }

    #[test]
    fn test_move_into_descendant_rejected() {
        let tree = tree();
        let a = NodeId::new(2);
        let a1 = NodeId::new(4);

        assert_eq!(
            plan_move(&tree, a, Some(a1), Placement::Last),
            Err(TreeError::Cycle { node: a, parent: a1 })
        );
        assert_eq!(
            plan_move(&tree, a, Some(a), Placement::Last),
            Err(TreeError::Cycle { node: a, parent: a })
        );
    }

    #[test]
    fn test_move_to_new_parent() {
        let mut tree = tree();
        let plan = plan_move(&tree, NodeId::new(4), Some(NodeId::new(1)), Placement::Last).unwrap();
        assert_eq!(plan.position, 3.0);
        assert!(plan.renumbered.is_empty());

        apply(&mut tree, &plan);
        assert_eq!(tree.names(Some(NodeId::new(1))), ["a", "b", "a1"]);
        assert!(tree.names(Some(NodeId::new(2))).is_empty());
    }

    #[test]
    fn test_move_to_root_level() {
        let mut tree = tree();
        let plan = plan_move(&tree, NodeId::new(3), None, Placement::First).unwrap();
        apply(&mut tree, &plan);
        assert_eq!(tree.names(None), ["b", "root"]);
    }

    #[test]
    fn test_reorder_within_parent() {
        let mut tree = tree();
        let plan = plan_move(
            &tree,
            NodeId::new(3),
            Some(NodeId::new(1)),
            Placement::Before(NodeId::new(2)),
        )
        .unwrap();
        apply(&mut tree, &plan);
        assert_eq!(tree.names(Some(NodeId::new(1))), ["b", "a"]);
    }

    #[test]
    fn test_tied_positions_are_renumbered() {
        let mut tree = TestTree::default();
        let x = tree.add(1, "x", None, 1.0);
        let y = tree.add(2, "y", None, 1.0);
        let z = tree.add(3, "z", None, 5.0);

        let plan = plan_move(&tree, z, None, Placement::After(x)).unwrap();
        assert_eq!(plan.renumbered, [(x, 1.0), (y, 2.0)]);
        assert_eq!(plan.position, 1.5);

        apply(&mut tree, &plan);
        assert_eq!(tree.names(None), ["x", "z", "y"]);
    }

    #[test]
    fn test_insert_positions() {
        let tree = tree();
        let plan = plan_insert(&tree, NodeId::new(10), Some(NodeId::new(1)), Placement::Last).unwrap();
        assert_eq!(plan.parent, Some(NodeId::new(1)));
        assert_eq!(plan.position, 3.0);

        let plan = plan_insert(&tree, NodeId::new(10), Some(NodeId::new(2)), Placement::First).unwrap();
        assert_eq!(plan.position, 0.0);

        assert_eq!(
            plan_insert(&tree, NodeId::new(10), Some(NodeId::new(99)), Placement::Last),
            Err(TreeError::NodeNotFound(NodeId::new(99)))
        );
    }

    #[test]
    fn test_move_missing_nodes() {
        let tree = tree();
        assert_eq!(
            plan_move(&tree, NodeId::new(99), None, Placement::Last),
            Err(TreeError::NodeNotFound(NodeId::new(99)))
        );
        assert_eq!(
            plan_move(&tree, NodeId::new(2), Some(NodeId::new(99)), Placement::Last),
            Err(TreeError::NodeNotFound(NodeId::new(99)))
        );
        assert_eq!(
            plan_move(&tree, NodeId::new(2), None, Placement::Before(NodeId::new(4))),
            Err(TreeError::NotASibling(NodeId::new(4)))
        );
    }
}

//! Sibling ordering.
//!
//! Positions are floats so a node can be slotted between two siblings
//! without renumbering the rest. Equal positions sort by insertion order.

use std::cmp::Ordering;

use crate::content::Node;
use crate::core::NodeId;

use super::TreeError;

/// Where to put a node among its new siblings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    First,
    Last,
    Before(NodeId),
    After(NodeId),
    /// Explicit position value.
    At(f64),
}

/// Deterministic sibling order: position, then insertion order, then id.
pub fn compare_siblings(a: &Node, b: &Node) -> Ordering {
    a.position
        .total_cmp(&b.position)
        .then(a.seq.cmp(&b.seq))
        .then(a.id.cmp(&b.id))
}

/// Sort siblings into display order.
#[inline]
pub fn sort_siblings(nodes: &mut [&Node]) {
    nodes.sort_by(|a, b| compare_siblings(a, b));
}

/// Outcome of computing a position.
pub(super) enum Slot {
    /// The position fits between the neighbors.
    Fits(f64),
    /// No float fits strictly between the neighbors; siblings must be renumbered.
    Exhausted,
}

/// Compute a position for `placement` among `siblings` (sorted, excluding the moved node).
pub(super) fn slot_for(siblings: &[&Node], placement: Placement) -> Result<Slot, TreeError> {
    let index_of = |id: NodeId| {
        siblings
            .iter()
            .position(|n| n.id == id)
            .ok_or(TreeError::NotASibling(id))
    };

    let slot = match placement {
        Placement::At(position) if !position.is_finite() => return Err(TreeError::InvalidPosition),
        Placement::At(position) => Slot::Fits(position),
        Placement::Last => Slot::Fits(siblings.last().map_or(1.0, |n| n.position + 1.0)),
        Placement::First => Slot::Fits(siblings.first().map_or(1.0, |n| n.position - 1.0)),
        Placement::Before(target) => {
            let idx = index_of(target)?;
            let upper = siblings[idx].position;
            match idx.checked_sub(1).map(|prev| siblings[prev].position) {
                Some(lower) => between(lower, upper),
                None => Slot::Fits(upper - 1.0),
            }
        }
        Placement::After(target) => {
            let idx = index_of(target)?;
            let lower = siblings[idx].position;
            match siblings.get(idx + 1).map(|n| n.position) {
                Some(upper) => between(lower, upper),
                None => Slot::Fits(lower + 1.0),
            }
        }
    };
    Ok(slot)
}

/// Midpoint strictly between `lower` and `upper`, if one exists.
fn between(lower: f64, upper: f64) -> Slot {
    let mid = lower + (upper - lower) / 2.0;
    if lower < mid && mid < upper {
        Slot::Fits(mid)
    } else {
        Slot::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeView;
    use crate::tree::testing::TestTree;

    #[test]
    fn test_sort_by_position_then_insertion() {
        let mut tree = TestTree::default();
        tree.add(1, "c", None, 2.0);
        tree.add(2, "a", None, 1.0);
        tree.add(3, "b", None, 2.0); // tie with `c`, inserted later

        assert_eq!(tree.names(None), ["a", "c", "b"]);
    }

    #[test]
    fn test_slot_first_last() {
        let mut tree = TestTree::default();
        tree.add(1, "a", None, 1.0);
        tree.add(2, "b", None, 5.0);
        let siblings = tree.sorted_children(None);

        assert!(matches!(slot_for(&siblings, Placement::Last), Ok(Slot::Fits(p)) if p == 6.0));
        assert!(matches!(slot_for(&siblings, Placement::First), Ok(Slot::Fits(p)) if p == 0.0));
        assert!(matches!(slot_for(&[], Placement::Last), Ok(Slot::Fits(p)) if p == 1.0));
    }

    #[test]
    fn test_slot_between_neighbors() {
        let mut tree = TestTree::default();
        let a = tree.add(1, "a", None, 1.0);
        let b = tree.add(2, "b", None, 2.0);
        let siblings = tree.sorted_children(None);

        assert!(matches!(slot_for(&siblings, Placement::Before(b)), Ok(Slot::Fits(p)) if p == 1.5));
        assert!(matches!(slot_for(&siblings, Placement::After(a)), Ok(Slot::Fits(p)) if p == 1.5));
        assert!(matches!(slot_for(&siblings, Placement::Before(a)), Ok(Slot::Fits(p)) if p == 0.0));
        assert!(matches!(slot_for(&siblings, Placement::After(b)), Ok(Slot::Fits(p)) if p == 3.0));
    }

    #[test]
    fn test_slot_exhausted_on_ties() {
        let mut tree = TestTree::default();
        tree.add(1, "a", None, 1.0);
        let b = tree.add(2, "b", None, 1.0);
        let siblings = tree.sorted_children(None);

        assert!(matches!(slot_for(&siblings, Placement::Before(b)), Ok(Slot::Exhausted)));
    }

    #[test]
    fn test_slot_errors() {
        let mut tree = TestTree::default();
        tree.add(1, "a", None, 1.0);
        let siblings = tree.sorted_children(None);

        assert!(matches!(
            slot_for(&siblings, Placement::At(f64::NAN)),
            Err(TreeError::InvalidPosition)
        ));
        assert!(matches!(
            slot_for(&siblings, Placement::After(NodeId::new(99))),
            Err(TreeError::NotASibling(_))
        ));
    }
}

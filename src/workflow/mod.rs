//! Node status workflow.
//!
//! A table-driven state machine over [`NodeStatus`]. Firing an event goes
//! through three checks, in order:
//!
//! | Check      | Failure                                   |
//! |------------|-------------------------------------------|
//! | table      | `InvalidTransition` (pair not in table)   |
//! | guards     | `Blocked` with every violated guard       |
//! | commit     | `WorkflowError::Conflict` (stale version) |
//!
//! Invalid and blocked transitions are ordinary outcomes and never mutate
//! the node. Only a lost race against a concurrent writer is an error.

mod guard;
mod transition;

use serde::Serialize;
use thiserror::Error;

use crate::content::Node;
use crate::core::{NodeId, NodeStatus};
use crate::store::{NodeStore, StoreError};

pub use guard::{AllowAll, Capability, CapabilityCheck, GuardFailure, GuardViolation, names};
pub use transition::Transition;

/// Why a transition cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {transition} a {from} node")]
    InvalidTransition {
        from: NodeStatus,
        transition: Transition,
    },

    #[error("{0}")]
    Blocked(GuardFailure),
}

/// Failures of [`request`] that are not workflow outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Another writer changed the node since it was read; re-read and retry.
    #[error("node {node} was modified concurrently (expected version {expected}, found {actual})")]
    Conflict {
        node: NodeId,
        expected: u64,
        actual: u64,
    },

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error(transparent)]
    Store(StoreError),
}

/// Result of [`request`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum TransitionOutcome {
    /// The transition was committed.
    Applied { node: Node, from: NodeStatus },
    /// One or more guards failed; nothing was written.
    Blocked(GuardFailure),
    /// The event is not allowed from the node's current status.
    Invalid {
        from: NodeStatus,
        transition: Transition,
    },
}

impl TransitionOutcome {
    #[inline]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Check whether `transition` may fire on `node`.
///
/// Runs every guard, including the caller's capability check, and reports
/// all failures at once.
pub fn can_transition(
    node: &Node,
    transition: Transition,
    caps: &dyn CapabilityCheck,
) -> Result<NodeStatus, TransitionError> {
    let target = transition
        .target(node.status)
        .ok_or(TransitionError::InvalidTransition {
            from: node.status,
            transition,
        })?;

    let violations = guard::check(node, transition, caps);
    if !violations.is_empty() {
        return Err(TransitionError::Blocked(GuardFailure {
            transition,
            violations,
        }));
    }
    Ok(target)
}

/// Apply `transition` to a copy of `node`.
///
/// Checks the table and the lock guard; capability checks are the caller's
/// concern here (see [`request`]). The input node is never modified.
pub fn apply(node: &Node, transition: Transition) -> Result<Node, TransitionError> {
    let target = can_transition(node, transition, &AllowAll)?;
    let mut next = node.clone();
    next.status = target;
    Ok(next)
}

/// Load, check and commit a transition against `store`.
///
/// The commit is conditional on the version read at load time, so two
/// concurrent requests on the same node cannot both succeed.
pub fn request(
    store: &dyn NodeStore,
    id: NodeId,
    transition: Transition,
    caps: &dyn CapabilityCheck,
) -> Result<TransitionOutcome, WorkflowError> {
    let node = store.load(id).ok_or(WorkflowError::NodeNotFound(id))?;
    let from = node.status;

    let target = match can_transition(&node, transition, caps) {
        Ok(target) => target,
        Err(TransitionError::InvalidTransition { from, transition }) => {
            crate::debug!("workflow"; "{} cannot {} from {}", id, transition, from);
            return Ok(TransitionOutcome::Invalid { from, transition });
        }
        Err(TransitionError::Blocked(failure)) => {
            crate::debug!("workflow"; "{} {}", id, failure);
            return Ok(TransitionOutcome::Blocked(failure));
        }
    };

    let expected = node.version;
    let mut next = node;
    next.status = target;

    match store.commit(next, expected) {
        Ok(node) => {
            crate::debug!("workflow"; "{} {}: {} -> {}", id, transition, from, node.status);
            Ok(TransitionOutcome::Applied { node, from })
        }
        Err(StoreError::Conflict { node, expected, actual }) => {
            crate::log!("conflict"; "{} {}: expected version {}, found {}", node, transition, expected, actual);
            Err(WorkflowError::Conflict {
                node,
                expected,
                actual,
            })
        }
        Err(StoreError::NotFound(node)) => Err(WorkflowError::NodeNotFound(node)),
        Err(other) => Err(WorkflowError::Store(other)),
    }
}

//! Transition guards.
//!
//! The workflow knows nothing about users. Callers pass a
//! [`CapabilityCheck`]; a denied capability is a blocking guard, reported
//! alongside every other guard that failed.

use serde::Serialize;
use std::fmt;

use crate::content::Node;

use super::Transition;

/// Permission a caller must hold to fire a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// May move a node through review and publication states.
    EditStatus,
    Publish,
    /// May delete and restore nodes.
    Delete,
}

impl Capability {
    pub const ALL: [Self; 3] = [Self::EditStatus, Self::Publish, Self::Delete];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EditStatus => "edit-status",
            Self::Publish => "publish",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown capability `{s}`"))
    }
}

/// Caller-supplied authorization callback.
pub trait CapabilityCheck {
    fn allows(&self, capability: Capability, node: &Node) -> bool;
}

impl<F> CapabilityCheck for F
where
    F: Fn(Capability, &Node) -> bool,
{
    #[inline]
    fn allows(&self, capability: Capability, node: &Node) -> bool {
        self(capability, node)
    }
}

/// Grants every capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl CapabilityCheck for AllowAll {
    #[inline]
    fn allows(&self, _: Capability, _: &Node) -> bool {
        true
    }
}

/// Guard names reported in violations.
pub mod names {
    pub const LOCKED: &str = "locked";
    pub const CAPABILITY: &str = "capability";
}

/// One failed guard: a stable name plus a human message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardViolation {
    pub guard: &'static str,
    pub message: String,
}

impl GuardViolation {
    pub(super) fn locked(node: &Node, transition: Transition) -> Self {
        Self {
            guard: names::LOCKED,
            message: format!("node `{}` is locked and cannot be {}d", node.name, transition),
        }
    }

    pub(super) fn capability(capability: Capability, transition: Transition) -> Self {
        Self {
            guard: names::CAPABILITY,
            message: format!("missing `{capability}` capability required to {transition}"),
        }
    }
}

impl fmt::Display for GuardViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.guard, self.message)
    }
}

/// Every guard that blocked a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardFailure {
    pub transition: Transition,
    pub violations: Vec<GuardViolation>,
}

impl GuardFailure {
    /// Whether a guard with `name` failed.
    pub fn has(&self, name: &str) -> bool {
        self.violations.iter().any(|v| v.guard == name)
    }
}

impl fmt::Display for GuardFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} blocked", self.transition)?;
        for (i, violation) in self.violations.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{violation}")?;
        }
        Ok(())
    }
}

/// Run every guard for `transition` on `node`, collecting all failures.
pub(super) fn check(
    node: &Node,
    transition: Transition,
    caps: &dyn CapabilityCheck,
) -> Vec<GuardViolation> {
    let mut violations = Vec::new();

    if transition.respects_lock() && node.locked {
        violations.push(GuardViolation::locked(node, transition));
    }

    let capability = transition.required_capability();
    if !caps.allows(capability, node) {
        violations.push(GuardViolation::capability(capability, transition));
    }

    violations
}

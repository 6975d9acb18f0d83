//! Workflow events and the transition table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::NodeStatus;

use super::Capability;

/// A workflow event requested against a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Review,
    Reject,
    Publish,
    Archive,
    Unarchive,
    Delete,
    Undelete,
}

impl Transition {
    pub const ALL: [Self; 7] = [
        Self::Review,
        Self::Reject,
        Self::Publish,
        Self::Archive,
        Self::Unarchive,
        Self::Delete,
        Self::Undelete,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::Reject => "reject",
            Self::Publish => "publish",
            Self::Archive => "archive",
            Self::Unarchive => "unarchive",
            Self::Delete => "delete",
            Self::Undelete => "undelete",
        }
    }

    /// Status reached by firing this event from `from`.
    ///
    /// `None` means the pair is not in the table. `Publish` on a published
    /// node is an allowed no-op.
    pub const fn target(self, from: NodeStatus) -> Option<NodeStatus> {
        use NodeStatus::*;

        match (self, from) {
            (Self::Review, Draft | Published) => Some(Pending),
            (Self::Reject, Pending | Published) => Some(Draft),
            (Self::Publish, Draft | Pending | Published) => Some(Published),
            (Self::Archive, Published) => Some(Archived),
            (Self::Unarchive, Archived) => Some(Draft),
            (Self::Delete, Draft | Pending | Published | Archived) => Some(Deleted),
            (Self::Undelete, Deleted) => Some(Draft),
            _ => None,
        }
    }

    /// Capability the caller must hold to fire this event.
    pub const fn required_capability(self) -> Capability {
        match self {
            Self::Delete | Self::Undelete => Capability::Delete,
            Self::Publish => Capability::Publish,
            _ => Capability::EditStatus,
        }
    }

    /// Whether a locked node blocks this event.
    #[inline]
    pub const fn respects_lock(self) -> bool {
        matches!(self, Self::Archive | Self::Delete)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown workflow event `{s}`"))
    }
}

//! Node publication status and view mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a node.
///
/// ```text
/// Draft ──review──> Pending ──publish──> Published ──archive──> Archived
///   ^                  │                     │                     │
///   └────reject────────┴──────reject─────────┘      unarchive──────┘
///
/// any non-deleted ──delete──> Deleted ──undelete──> Draft
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    #[default]
    Draft,
    Pending,
    Published,
    Archived,
    Deleted,
}

impl NodeStatus {
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::Pending,
        Self::Published,
        Self::Archived,
        Self::Deleted,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Published => "published",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        }
    }

    #[inline]
    pub const fn is_published(self) -> bool {
        matches!(self, Self::Published)
    }

    #[inline]
    pub const fn is_deleted(self) -> bool {
        matches!(self, Self::Deleted)
    }

    /// Whether a node with this status may be served in `mode`.
    ///
    /// Live visitors only see published nodes; previews see everything
    /// except deleted nodes.
    #[inline]
    pub const fn is_visible_in(self, mode: ViewMode) -> bool {
        match mode {
            ViewMode::Live => self.is_published(),
            ViewMode::Preview => !self.is_deleted(),
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown node status `{s}`"))
    }
}

/// Who is looking: an ordinary visitor or an editor previewing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Live,
    Preview,
}

impl ViewMode {
    #[inline]
    pub const fn from_preview(preview: bool) -> Self {
        if preview { Self::Preview } else { Self::Live }
    }

    #[inline]
    pub const fn is_preview(self) -> bool {
        matches!(self, Self::Preview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_draft() {
        assert_eq!(NodeStatus::default(), NodeStatus::Draft);
    }

    #[test]
    fn test_visibility() {
        for status in NodeStatus::ALL {
            assert_eq!(
                status.is_visible_in(ViewMode::Live),
                status == NodeStatus::Published,
                "live visibility for {status}"
            );
            assert_eq!(
                status.is_visible_in(ViewMode::Preview),
                status != NodeStatus::Deleted,
                "preview visibility for {status}"
            );
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("published".parse::<NodeStatus>(), Ok(NodeStatus::Published));
        assert_eq!("Archived".parse::<NodeStatus>(), Ok(NodeStatus::Archived));
        assert!("gone".parse::<NodeStatus>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&NodeStatus::Pending).unwrap(),
            "\"pending\""
        );

        #[derive(Deserialize)]
        struct Wrapper {
            status: NodeStatus,
        }
        let parsed: Wrapper = toml::from_str("status = \"deleted\"").unwrap();
        assert_eq!(parsed.status, NodeStatus::Deleted);
    }
}

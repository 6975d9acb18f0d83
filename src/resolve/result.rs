//! Resolution result types.

use serde::Serialize;

use crate::content::{Node, Translation};

/// How the serving layer must treat a resolved node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    /// Published: anyone may see it.
    Public,
    /// Only returned because of preview mode; requires editor authorization.
    PreviewOnly,
}

/// A successfully resolved request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub node: Node,
    /// Translation to render with, regardless of the requester's preference.
    pub translation: Translation,
    pub via_alias: bool,
    pub visibility: Visibility,
}

impl Resolution {
    pub fn new(node: Node, translation: Translation, via_alias: bool) -> Self {
        let visibility = if node.status.is_published() {
            Visibility::Public
        } else {
            Visibility::PreviewOnly
        };
        Self {
            node,
            translation,
            via_alias,
            visibility,
        }
    }

    /// Locale used for the rest of the request.
    #[inline]
    pub fn locale(&self) -> &str {
        &self.translation.locale
    }
}

/// Result of resolving a path.
///
/// `NotFound` is an ordinary value and deliberately carries no detail:
/// callers must not be able to tell which lookup was attempted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum ResolveResult {
    Found(Resolution),
    NotFound,
}

impl ResolveResult {
    #[inline]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn found(&self) -> Option<&Resolution> {
        match self {
            Self::Found(resolution) => Some(resolution),
            Self::NotFound => None,
        }
    }

    pub fn into_found(self) -> Option<Resolution> {
        match self {
            Self::Found(resolution) => Some(resolution),
            Self::NotFound => None,
        }
    }
}

impl From<Option<Resolution>> for ResolveResult {
    fn from(resolution: Option<Resolution>) -> Self {
        resolution.map_or(Self::NotFound, Self::Found)
    }
}

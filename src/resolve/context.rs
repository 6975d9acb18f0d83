//! Per-request resolution context.

use crate::core::ViewMode;

/// What the caller knows about the request before resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveContext {
    /// Locale the requester asked for (e.g. from `Accept-Language`).
    ///
    /// Informational only: the translation carried by the resolution is
    /// authoritative for the rest of the request.
    pub preferred_locale: Option<String>,
    pub mode: ViewMode,
}

impl ResolveContext {
    /// Ordinary visitor: published nodes only.
    pub fn live() -> Self {
        Self::default()
    }

    /// Editor preview: any non-deleted node.
    pub fn preview() -> Self {
        Self {
            mode: ViewMode::Preview,
            ..Self::default()
        }
    }

    pub fn with_preferred_locale(mut self, locale: impl Into<String>) -> Self {
        self.preferred_locale = Some(locale.into());
        self
    }
}

//! Translations (locales).

use serde::Serialize;

use crate::core::TranslationId;

/// A locale-specific rendering context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub id: TranslationId,
    /// Display name ("Français").
    pub name: String,
    /// Full locale code ("fr_FR", "en").
    pub locale: String,
    /// Short code used as URL segment ("fr").
    pub shortcut: String,
    /// Exactly one translation is the default at any time.
    pub is_default: bool,
}

impl Translation {
    /// Create a translation; the shortcut is derived from the locale.
    pub fn new(id: TranslationId, locale: impl Into<String>) -> Self {
        let locale = locale.into();
        Self {
            id,
            name: locale.clone(),
            shortcut: shortcut_for(&locale),
            locale,
            is_default: false,
        }
    }

    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = shortcut.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether `token` designates this translation (shortcut or full locale).
    pub fn matches(&self, token: &str) -> bool {
        self.shortcut == token || self.locale == token
    }
}

/// Derive a URL shortcut from a full locale: `"en_GB"` -> `"en"`.
pub fn shortcut_for(locale: &str) -> String {
    locale
        .split(['_', '-'])
        .next()
        .unwrap_or(locale)
        .to_ascii_lowercase()
}

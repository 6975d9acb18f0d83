//! Scoped settings cache.
//!
//! `SettingsBag` is owned by the composition root and handed out by
//! reference. Values are read once from the [`SettingsSource`] and cached
//! (misses included) until [`SettingsBag::invalidate`] is called.

use dashmap::DashMap;

use crate::store::SettingsSource;

/// Setting keys read by the crate.
pub mod keys {
    /// Always prefix generated paths with a locale segment.
    pub const FORCE_LOCALE: &str = "force_locale";
}

pub struct SettingsBag<'s> {
    source: &'s dyn SettingsSource,
    cache: DashMap<String, Option<String>>,
}

impl<'s> SettingsBag<'s> {
    pub fn new(source: &'s dyn SettingsSource) -> Self {
        Self {
            source,
            cache: DashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(cached) = self.cache.get(key) {
            return cached.value().clone();
        }
        let value = self.source.setting(key);
        self.cache.insert(key.to_string(), value.clone());
        value
    }

    /// Boolean setting: `true`, `1`, `yes` and `on` are true (case-insensitive).
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).map(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            )
        })
    }

    /// Drop every cached value; the next read goes to the source.
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

//! `[routing]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [routing]
//! force_locale = false             # Prefix generated paths with a locale, even the default one
//! home = "accueil"                 # Home node by name (default: the node flagged `home`)
//! max_segments = 64                # Deeper request paths are treated as not found
//! preview = false                  # Resolve in preview mode by default
//! base_url = "https://example.org/"  # Used to build absolute URLs
//! ```

use serde::{Deserialize, Serialize};

use crate::config::util::parse_http_url;
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::resolve::DEFAULT_MAX_SEGMENTS;

/// URL routing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Always emit the locale segment in generated paths.
    pub force_locale: bool,

    /// Name of the home node served for `/` and language roots.
    pub home: Option<String>,

    /// Maximum number of path segments accepted by the resolver.
    pub max_segments: usize,

    /// Default view mode for the inspection commands.
    pub preview: bool,

    /// Public base URL of the site.
    pub base_url: Option<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            force_locale: false,
            home: None,
            max_segments: DEFAULT_MAX_SEGMENTS,
            preview: false,
            base_url: None,
        }
    }
}

impl RoutingConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.max_segments == 0 {
            diag.error(
                FieldPath::new("routing.max_segments"),
                "must be at least 1",
            );
        }

        if let Some(home) = &self.home
            && !crate::utils::is_slug(home)
        {
            diag.error_with_hint(
                FieldPath::new("routing.home"),
                format!("`{home}` is not a valid node name"),
                format!("did you mean `{}`?", crate::utils::slugify(home)),
            );
        }

        if let Some(url) = &self.base_url
            && parse_http_url(url).is_none()
        {
            diag.error_with_hint(
                FieldPath::new("routing.base_url"),
                format!("`{url}` is not an absolute http(s) URL"),
                "e.g. base_url = \"https://example.org/\"",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_routing_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.routing, RoutingConfig::default());
        assert_eq!(config.routing.max_segments, 64);
        assert!(!config.routing.force_locale);
    }

    #[test]
    fn test_routing_partial_override() {
        let config = test_parse_config("[routing]\nforce_locale = true\nhome = \"accueil\"");
        assert!(config.routing.force_locale);
        assert_eq!(config.routing.home.as_deref(), Some("accueil"));
        assert_eq!(config.routing.max_segments, 64);
    }

    #[test]
    fn test_routing_validation_collects_all() {
        let config = test_parse_config(
            "[routing]\nmax_segments = 0\nhome = \"Accueil Page\"\nbase_url = \"example.org\"",
        );
        let mut diag = ConfigDiagnostics::new();
        config.routing.validate(&mut diag);

        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            ["routing.max_segments", "routing.home", "routing.base_url"]
        );
        assert_eq!(
            diag.errors()[1].hint.as_deref(),
            Some("did you mean `accueil-page`?")
        );
    }

    #[test]
    fn test_routing_valid_base_url() {
        let config = test_parse_config("[routing]\nbase_url = \"https://example.org/site/\"");
        let mut diag = ConfigDiagnostics::new();
        config.routing.validate(&mut diag);
        assert!(diag.is_empty());
    }
}

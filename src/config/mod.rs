//! Configuration management for `canopy.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── routing    # [routing]
//! │   └── types      # [[types]]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # CanopyConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section       | Purpose                                         |
//! |---------------|-------------------------------------------------|
//! | `content`     | Content fixture path, relative to the config    |
//! | `[routing]`   | Locale prefixes, home node, path limits         |
//! | `[[types]]`   | Node types and their field schemas              |

pub mod section;
pub mod types;
mod util;

pub use util::{find_config_file, parse_http_url};

pub use section::RoutingConfig;
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use url::Url;

use crate::schema::{NodeType, NodeTypeRegistry};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing canopy.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanopyConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory containing the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Content fixture, relative to the config file
    #[serde(default = "default_content")]
    pub content: PathBuf,

    /// URL routing settings
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Node-type declarations
    #[serde(default = "section::default_types")]
    pub types: Vec<NodeType>,
}

fn default_content() -> PathBuf {
    PathBuf::from("content.toml")
}

impl Default for CanopyConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            content: default_content(),
            routing: RoutingConfig::default(),
            types: section::default_types(),
        }
    }
}

impl CanopyConfig {
    /// Load and validate the config at `path`.
    ///
    /// Unknown fields are reported as warnings; validation errors are
    /// collected and returned together.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_path(path)?;

        config.config_path = path.to_path_buf();
        config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read `path`, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            let mut diag = ConfigDiagnostics::new();
            for field in ignored {
                diag.warn(FieldPath::from(field), "unknown field");
            }
            diag.print_warnings();
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Absolute path of the content fixture.
    pub fn content_path(&self) -> PathBuf {
        self.root.join(&self.content)
    }

    /// Parsed `routing.base_url`, if set and valid.
    pub fn base_url(&self) -> Option<Url> {
        self.routing.base_url.as_deref().and_then(parse_http_url)
    }

    /// Build the node-type registry from `[[types]]`.
    pub fn registry(&self) -> Result<NodeTypeRegistry, ConfigError> {
        NodeTypeRegistry::from_types(self.types.iter().cloned())
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the whole configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.routing.validate(&mut diag);
        section::validate_types(&self.types, &mut diag);

        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> CanopyConfig {
    let (parsed, ignored) = CanopyConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = CanopyConfig::from_str("[routing\nforce_locale = true");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_config_default() {
        let config = CanopyConfig::default();
        assert_eq!(config.content, PathBuf::from("content.toml"));
        assert_eq!(config.types.len(), 1);
        assert_eq!(config.types[0].name, "Page");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.types[0].name, "Page");
        assert_eq!(config.routing, RoutingConfig::default());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[routing]\nforce_locale = true\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = CanopyConfig::parse_with_ignored(content).unwrap();

        assert!(config.routing.force_locale);
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "content = \"site.toml\"\n[routing]\nbase_url = \"https://example.org/\"\n\
             [[types]]\nname = \"Page\"\n[[types]]\nname = \"Block\"\nreachable = false"
        )
        .unwrap();

        let config = CanopyConfig::load(file.path()).unwrap();
        assert_eq!(config.content_path(), file.path().parent().unwrap().join("site.toml"));
        assert_eq!(config.base_url().unwrap().as_str(), "https://example.org/");

        let registry = config.registry().unwrap();
        assert!(registry.is_reachable("Page"));
        assert!(!registry.is_reachable("Block"));
    }

    #[test]
    fn test_load_reports_all_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[routing]\nmax_segments = 0\nbase_url = \"nope\"\n[[types]]\nname = \"\""
        )
        .unwrap();

        let Err(ConfigError::Diagnostics(diag)) = CanopyConfig::load(file.path()) else {
            panic!("expected diagnostics");
        };
        assert_eq!(diag.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            CanopyConfig::load(Path::new("/nonexistent/canopy.toml")),
            Err(ConfigError::Io(..))
        ));
    }
}

//! TOML content fixtures.
//!
//! A fixture describes a whole installation: translations, the node tree,
//! aliases and settings. Loading goes through the same checks as
//! interactive edits, so a fixture cannot produce a store that violates
//! tree or schema invariants.
//!
//! ```toml
//! [[translations]]
//! locale = "fr_FR"
//! default = true
//!
//! [[nodes]]
//! name = "about-us"
//! status = "published"
//! parent = "home"            # by name, must be declared earlier
//! [[nodes.sources]]
//! translation = "fr"         # shortcut or full locale
//! title = "À propos"
//!
//! [[aliases]]
//! alias = "apropos"
//! node = "about-us"
//!
//! [settings]
//! force_locale = "false"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::{MemoryStore, NewNode, StoreError, TranslationDirectory};
use crate::content::{NodeSource, Translation};
use crate::core::{NodeStatus, TranslationId};
use crate::schema::{FieldMap, NodeTypeRegistry};
use crate::tree::Placement;

/// Fixture loading failures.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("content fixture parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("no translation is marked `default = true`")]
    NoDefault,

    #[error("more than one translation is marked `default = true`: {0}")]
    MultipleDefaults(String),

    #[error("node `{node}` refers to unknown translation `{token}`")]
    UnknownTranslation { node: String, token: String },

    #[error("node `{node}` refers to parent `{parent}`, which is not declared before it")]
    UnknownParent { node: String, parent: String },

    #[error("alias `{alias}` targets unknown node `{node}`")]
    UnknownAliasTarget { alias: String, node: String },

    #[error("node `{node}`: {source}")]
    Node {
        node: String,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    #[serde(default)]
    translations: Vec<TranslationEntry>,
    #[serde(default)]
    nodes: Vec<NodeEntry>,
    #[serde(default)]
    aliases: Vec<AliasEntry>,
    #[serde(default)]
    settings: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TranslationEntry {
    locale: String,
    shortcut: Option<String>,
    name: Option<String>,
    #[serde(default)]
    default: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeEntry {
    /// Machine name; derived from the first source title when absent.
    name: Option<String>,
    #[serde(rename = "type", default = "default_node_type")]
    node_type: String,
    parent: Option<String>,
    #[serde(default)]
    status: NodeStatus,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    home: bool,
    #[serde(default)]
    hiding_children: bool,
    position: Option<f64>,
    #[serde(default)]
    sources: Vec<SourceEntry>,
}

fn default_node_type() -> String {
    "Page".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SourceEntry {
    /// Shortcut or full locale.
    translation: String,
    title: String,
    #[serde(default)]
    fields: FieldMap,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AliasEntry {
    alias: String,
    node: String,
}

impl Fixture {
    pub fn parse(content: &str) -> Result<Self, FixtureError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content =
            fs::read_to_string(path).map_err(|e| FixtureError::Io(path.to_path_buf(), e))?;
        Self::parse(&content)
    }

    /// Build a store, validating every entry.
    pub fn into_store(self, registry: NodeTypeRegistry) -> Result<MemoryStore, FixtureError> {
        let store = self.build_translations(registry)?;

        for entry in self.nodes {
            insert_node(&store, entry)?;
        }

        for entry in self.aliases {
            let Some(node) = store.node_named(&entry.node) else {
                return Err(FixtureError::UnknownAliasTarget {
                    alias: entry.alias,
                    node: entry.node,
                });
            };
            store.add_alias(&entry.alias, node.id)?;
        }

        for (key, value) in self.settings {
            store.set_setting(key, value);
        }

        store.verify()?;
        crate::debug!("store"; "loaded {}", crate::utils::plural_count(store.len(), "node"));
        Ok(store)
    }

    fn build_translations(&self, registry: NodeTypeRegistry) -> Result<MemoryStore, FixtureError> {
        let defaults: Vec<_> = self.translations.iter().filter(|t| t.default).collect();
        let default = match defaults.as_slice() {
            [] => return Err(FixtureError::NoDefault),
            [one] => *one,
            many => {
                let locales: Vec<_> = many.iter().map(|t| t.locale.as_str()).collect();
                return Err(FixtureError::MultipleDefaults(locales.join(", ")));
            }
        };

        let mut next_id = 0;
        let mut translation = |entry: &TranslationEntry| {
            next_id += 1;
            let mut t = Translation::new(TranslationId::new(next_id), entry.locale.as_str());
            if let Some(shortcut) = &entry.shortcut {
                t = t.with_shortcut(shortcut.as_str());
            }
            if let Some(name) = &entry.name {
                t = t.with_name(name.as_str());
            }
            t
        };

        let store = MemoryStore::new(registry, translation(default));
        for entry in self.translations.iter().filter(|t| !t.default) {
            store.add_translation(translation(entry), false)?;
        }
        Ok(store)
    }
}

fn insert_node(store: &MemoryStore, entry: NodeEntry) -> Result<(), FixtureError> {
    let label = entry
        .name
        .clone()
        .or_else(|| entry.sources.first().map(|s| s.title.clone()))
        .unwrap_or_default();

    let mut sources = Vec::with_capacity(entry.sources.len());
    for source in entry.sources {
        let Some(translation) = store.find_by_locale_or_shortcut(&source.translation) else {
            return Err(FixtureError::UnknownTranslation {
                node: label,
                token: source.translation,
            });
        };
        sources.push(NodeSource {
            translation: translation.id,
            title: source.title,
            fields: source.fields,
        });
    }

    let parent = match &entry.parent {
        Some(parent) => match store.node_named(parent) {
            Some(node) => Some(node.id),
            None => {
                return Err(FixtureError::UnknownParent {
                    node: label,
                    parent: parent.clone(),
                });
            }
        },
        None => None,
    };

    let new = NewNode {
        name: entry.name,
        node_type: entry.node_type,
        parent,
        placement: entry.position.map_or(Placement::Last, Placement::At),
        home: entry.home,
        locked: entry.locked,
        hiding_children: entry.hiding_children,
        sources,
    };

    let node = store
        .insert_node(new)
        .map_err(|source| FixtureError::Node {
            node: label.clone(),
            source,
        })?;
    store.restore_status(node.id, entry.status)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ViewMode;
    use crate::schema::NodeType;
    use crate::store::{AliasIndex, NodeRepository, SettingsSource};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn registry() -> NodeTypeRegistry {
        NodeTypeRegistry::from_types([NodeType::new("Page")]).unwrap()
    }

    const SITE: &str = r#"
[[translations]]
locale = "fr_FR"
name = "Français"
default = true

[[translations]]
locale = "en_GB"

[[nodes]]
status = "published"
home = true
[[nodes.sources]]
translation = "fr"
title = "Accueil"

[[nodes]]
parent = "accueil"
status = "published"
position = 2.5
[[nodes.sources]]
translation = "fr_FR"
title = "À propos"
[[nodes.sources]]
translation = "en"
title = "About"

[[aliases]]
alias = "apropos"
node = "a-propos"

[settings]
force_locale = "true"
"#;

    #[test]
    fn test_load_fixture() {
        let store = Fixture::parse(SITE).unwrap().into_store(registry()).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.find_default().name, "Français");
        assert_eq!(store.translations().len(), 2);

        let about = store.node_named("a-propos").unwrap();
        assert_eq!(about.status, NodeStatus::Published);
        assert_eq!(about.position, 2.5);
        assert_eq!(about.sources.len(), 2);
        assert!(store.is_reachable(&about, ViewMode::Live));

        assert_eq!(store.find_by_alias("apropos").unwrap().id, about.id);
        assert_eq!(store.setting("force_locale").as_deref(), Some("true"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SITE.as_bytes()).unwrap();

        let fixture = Fixture::load(file.path()).unwrap();
        assert!(fixture.into_store(registry()).is_ok());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Fixture::load(Path::new("/nonexistent/content.toml")),
            Err(FixtureError::Io(..))
        ));
    }

    #[test]
    fn test_default_translation_required() {
        let fixture = Fixture::parse("[[translations]]\nlocale = \"fr\"\n").unwrap();
        assert!(matches!(
            fixture.into_store(registry()),
            Err(FixtureError::NoDefault)
        ));

        let fixture = Fixture::parse(
            "[[translations]]\nlocale = \"fr\"\ndefault = true\n\
             [[translations]]\nlocale = \"en\"\ndefault = true\n",
        )
        .unwrap();
        assert!(matches!(
            fixture.into_store(registry()),
            Err(FixtureError::MultipleDefaults(list)) if list == "fr, en"
        ));
    }

    #[test]
    fn test_parent_must_be_declared_first() {
        let fixture = Fixture::parse(
            r#"
[[translations]]
locale = "fr"
default = true

[[nodes]]
name = "child"
parent = "later"
[[nodes.sources]]
translation = "fr"
title = "Child"
"#,
        )
        .unwrap();
        assert!(matches!(
            fixture.into_store(registry()),
            Err(FixtureError::UnknownParent { .. })
        ));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(matches!(
            Fixture::parse("[[translations]]\nlocale = \"fr\"\ncolour = 1\n"),
            Err(FixtureError::Toml(_))
        ));
    }

    #[test]
    fn test_duplicate_name_reports_node() {
        let fixture = Fixture::parse(
            r#"
[[translations]]
locale = "fr"
default = true

[[nodes]]
[[nodes.sources]]
translation = "fr"
title = "Same"

[[nodes]]
[[nodes.sources]]
translation = "fr"
title = "same"
"#,
        )
        .unwrap();
        let err = fixture.into_store(registry()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}

//! Storage collaborators.
//!
//! The resolver and workflow never reach for global state: they read and
//! write through these traits, passed in by the composition root.
//!
//! | Trait                  | Used by                    |
//! |------------------------|----------------------------|
//! | `TranslationDirectory` | resolver, path generation  |
//! | `AliasIndex`           | resolver, path generation  |
//! | `NodeRepository`       | resolver, front controller |
//! | `NodeStore`            | workflow (write side)      |
//! | `SettingsSource`       | `SettingsBag`              |
//!
//! [`MemoryStore`] implements all of them.

mod fixture;
mod memory;

use std::sync::Arc;

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::content::{Node, Translation, UrlAlias};
use crate::core::{NodeId, TranslationId, ViewMode};
use crate::schema::FieldViolation;
use crate::tree::TreeError;

pub use fixture::{Fixture, FixtureError};
pub use memory::{MemoryStore, NewNode};

/// Read access to the configured translations.
pub trait TranslationDirectory: Send + Sync {
    /// Full locale codes of every translation.
    fn available_locales(&self) -> Arc<FxHashSet<String>>;

    /// URL shortcuts of every translation.
    fn available_shortcuts(&self) -> Arc<FxHashSet<String>>;

    /// Look up by shortcut first, then by full locale.
    fn find_by_locale_or_shortcut(&self, token: &str) -> Option<Translation>;

    fn find_by_id(&self, id: TranslationId) -> Option<Translation>;

    /// The default translation. Stores guarantee exactly one exists.
    fn find_default(&self) -> Translation;
}

/// Exact-match alias lookup.
pub trait AliasIndex: Send + Sync {
    /// Target of `alias`; `None` when absent, dangling, or the target is deleted.
    fn find_by_alias(&self, alias: &str) -> Option<Node>;

    /// Aliases pointing at `node`, oldest first.
    fn aliases_for(&self, node: NodeId) -> Vec<UrlAlias>;
}

/// Read access to the node tree.
pub trait NodeRepository: Send + Sync {
    fn find_by_id(&self, id: NodeId) -> Option<Node>;

    /// Reachable node named `name` that has content in `translation`.
    fn find_by_name_and_translation(
        &self,
        name: &str,
        translation: &Translation,
        mode: ViewMode,
    ) -> Option<Node>;

    /// Reachable home node with content in `translation`.
    fn find_home(&self, translation: &Translation, mode: ViewMode) -> Option<Node>;

    fn is_reachable(&self, node: &Node, mode: ViewMode) -> bool;

    /// Nearest ancestor of `node` reachable in `mode`.
    fn nearest_reachable(&self, node: &Node, mode: ViewMode) -> Option<Node>;

    /// Ancestors of `node`, nearest first.
    fn ancestors(&self, node: &Node) -> Vec<Node>;
}

/// Write side used by the workflow.
pub trait NodeStore: Send + Sync {
    fn load(&self, id: NodeId) -> Option<Node>;

    /// Replace the stored node if its version still equals `expected_version`.
    ///
    /// Returns the committed node with its version bumped.
    fn commit(&self, node: Node, expected_version: u64) -> Result<Node, StoreError>;
}

/// Raw key/value settings.
pub trait SettingsSource: Send + Sync {
    fn setting(&self, key: &str) -> Option<String>;
}

/// Store write failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("node {node} was modified concurrently (expected version {expected}, found {actual})")]
    Conflict {
        node: NodeId,
        expected: u64,
        actual: u64,
    },

    #[error("node {0} not found")]
    NotFound(NodeId),

    #[error("translation {0} not found")]
    TranslationNotFound(TranslationId),

    #[error("locale `{0}` is already used by another translation")]
    DuplicateLocale(String),

    #[error("shortcut `{0}` is already used by another translation")]
    DuplicateShortcut(String),

    #[error("translation id {0} is already registered")]
    DuplicateTranslationId(TranslationId),

    #[error("alias `{0}` already exists")]
    DuplicateAlias(String),

    #[error("alias must not be empty")]
    EmptyAlias,

    #[error("node `{0}` has no content source")]
    NoSource(String),

    #[error("node `{node}` has invalid fields: {}", join_violations(.violations))]
    InvalidFields {
        node: String,
        violations: Vec<FieldViolation>,
    },

    #[error(transparent)]
    Tree(#[from] TreeError),
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

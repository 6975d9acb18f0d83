//! In-memory store.
//!
//! All state sits behind one `RwLock`: readers see either the state before
//! a write or after it, never a node with a new parent and a stale
//! position. The available locale/shortcut sets are derived data, cached
//! in an `ArcSwapOption` and dropped whenever translations change.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{
    AliasIndex, NodeRepository, NodeStore, SettingsSource, StoreError, TranslationDirectory,
};
use crate::content::{Node, NodeSource, Translation, UrlAlias};
use crate::core::{AliasId, NodeId, NodeStatus, TranslationId, ViewMode};
use crate::schema::NodeTypeRegistry;
use crate::tree::{self, MovePlan, Placement, TreeError, TreeView};
use crate::utils::slugify;

// ============================================================================
// New node description
// ============================================================================

/// A node to be created. New nodes always start as drafts.
#[derive(Debug, Clone)]
pub struct NewNode {
    /// Explicit machine name; derived from the first source title when absent.
    pub name: Option<String>,
    pub node_type: String,
    pub parent: Option<NodeId>,
    pub placement: Placement,
    pub home: bool,
    pub locked: bool,
    pub hiding_children: bool,
    pub sources: Vec<NodeSource>,
}

impl NewNode {
    pub fn new(node_type: impl Into<String>, source: NodeSource) -> Self {
        Self {
            name: None,
            node_type: node_type.into(),
            parent: None,
            placement: Placement::Last,
            home: false,
            locked: false,
            hiding_children: false,
            sources: vec![source],
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn under(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn placed(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn home(mut self) -> Self {
        self.home = true;
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub fn hiding_children(mut self) -> Self {
        self.hiding_children = true;
        self
    }

    pub fn with_source(mut self, source: NodeSource) -> Self {
        self.sources.push(source);
        self
    }
}

// ============================================================================
// State
// ============================================================================

#[derive(Debug)]
struct State {
    nodes: FxHashMap<NodeId, Node>,
    names: FxHashMap<String, NodeId>,
    translations: FxHashMap<TranslationId, Translation>,
    by_locale: FxHashMap<String, TranslationId>,
    by_shortcut: FxHashMap<String, TranslationId>,
    /// Copy of the default translation; always present.
    default: Translation,
    aliases: FxHashMap<String, UrlAlias>,
    settings: FxHashMap<String, String>,
    next_node: u64,
    next_alias: u64,
    next_seq: u64,
}

impl State {
    fn insert_translation(&mut self, translation: Translation) {
        self.by_locale
            .insert(translation.locale.clone(), translation.id);
        self.by_shortcut
            .insert(translation.shortcut.clone(), translation.id);
        self.translations.insert(translation.id, translation);
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Write a plan's positions and parent. The moved node gets a fresh
    /// insertion sequence so it sorts after existing ties.
    fn apply_plan(&mut self, plan: &MovePlan) -> Result<Node, StoreError> {
        for &(id, position) in &plan.renumbered {
            if let Some(sibling) = self.nodes.get_mut(&id) {
                sibling.position = position;
                sibling.version += 1;
            }
        }

        let seq = self.bump_seq();
        let node = self
            .nodes
            .get_mut(&plan.node)
            .ok_or(StoreError::NotFound(plan.node))?;
        node.parent = plan.parent;
        node.position = plan.position;
        node.seq = seq;
        node.version += 1;
        Ok(node.clone())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, StoreError> {
        self.nodes.get_mut(&id).ok_or(StoreError::NotFound(id))
    }
}

impl TreeView for State {
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    fn node_named(&self, name: &str) -> Option<&Node> {
        self.names.get(name).and_then(|id| self.nodes.get(id))
    }

    fn children_of(&self, parent: Option<NodeId>) -> Vec<&Node> {
        self.nodes.values().filter(|n| n.parent == parent).collect()
    }
}

#[derive(Debug)]
struct LocaleSets {
    locales: Arc<FxHashSet<String>>,
    shortcuts: Arc<FxHashSet<String>>,
}

// ============================================================================
// MemoryStore
// ============================================================================

/// Reference implementation of every storage collaborator.
#[derive(Debug)]
pub struct MemoryStore {
    registry: NodeTypeRegistry,
    state: RwLock<State>,
    locale_sets: ArcSwapOption<LocaleSets>,
}

impl MemoryStore {
    /// Create an empty store around its default translation.
    pub fn new(registry: NodeTypeRegistry, default: Translation) -> Self {
        let default = Translation {
            is_default: true,
            ..default
        };

        let mut state = State {
            nodes: FxHashMap::default(),
            names: FxHashMap::default(),
            translations: FxHashMap::default(),
            by_locale: FxHashMap::default(),
            by_shortcut: FxHashMap::default(),
            default: default.clone(),
            aliases: FxHashMap::default(),
            settings: FxHashMap::default(),
            next_node: 0,
            next_alias: 0,
            next_seq: 0,
        };
        state.insert_translation(default);

        Self {
            registry,
            state: RwLock::new(state),
            locale_sets: ArcSwapOption::empty(),
        }
    }

    pub fn registry(&self) -> &NodeTypeRegistry {
        &self.registry
    }

    // ------------------------------------------------------------------------
    // Translations
    // ------------------------------------------------------------------------

    /// Register a translation; `make_default` moves the default flag to it.
    pub fn add_translation(
        &self,
        translation: Translation,
        make_default: bool,
    ) -> Result<Translation, StoreError> {
        let mut state = self.state.write();

        if state.translations.contains_key(&translation.id) {
            return Err(StoreError::DuplicateTranslationId(translation.id));
        }
        if state.by_locale.contains_key(&translation.locale) {
            return Err(StoreError::DuplicateLocale(translation.locale));
        }
        // A shortcut may equal another translation's full locale: lookups
        // try shortcuts first, so such a token is never ambiguous.
        if state.by_shortcut.contains_key(&translation.shortcut) {
            return Err(StoreError::DuplicateShortcut(translation.shortcut));
        }

        let translation = Translation {
            is_default: make_default,
            ..translation
        };
        if make_default {
            let previous = state.default.id;
            if let Some(old) = state.translations.get_mut(&previous) {
                old.is_default = false;
            }
            state.default = translation.clone();
        }
        state.insert_translation(translation.clone());
        // Cleared under the write lock: a reader can only rebuild the sets
        // once this translation is visible.
        self.locale_sets.store(None);
        drop(state);

        crate::debug!("store"; "translation {} ({})", translation.locale, translation.shortcut);
        Ok(translation)
    }

    /// All translations, default first.
    pub fn translations(&self) -> Vec<Translation> {
        let state = self.state.read();
        let mut all: Vec<_> = state.translations.values().cloned().collect();
        all.sort_by_key(|t| (!t.is_default, t.id));
        all
    }

    fn locale_sets(&self) -> Arc<LocaleSets> {
        if let Some(sets) = self.locale_sets.load_full() {
            return sets;
        }

        // Published while the read lock is held, so no translation can be
        // added between building the sets and caching them.
        let state = self.state.read();
        let sets = Arc::new(LocaleSets {
            locales: Arc::new(state.by_locale.keys().cloned().collect()),
            shortcuts: Arc::new(state.by_shortcut.keys().cloned().collect()),
        });
        self.locale_sets.store(Some(Arc::clone(&sets)));
        drop(state);
        sets
    }

    // ------------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------------

    /// Create a draft node.
    ///
    /// Rejects empty or duplicate names, unknown parents or translations,
    /// nodes without content, and fields that do not match the node type.
    pub fn insert_node(&self, new: NewNode) -> Result<Node, StoreError> {
        let mut state = self.state.write();

        let source = new.name.as_deref().or_else(|| new.sources.first().map(|s| s.title.as_str()));
        let Some(source) = source else {
            return Err(StoreError::NoSource(String::new()));
        };
        let name = slugify(source);
        if name.is_empty() {
            return Err(TreeError::EmptyName(source.to_string()).into());
        }
        if state.names.contains_key(&name) {
            return Err(TreeError::NameAlreadyExists(name).into());
        }
        if new.sources.is_empty() {
            return Err(StoreError::NoSource(name));
        }

        for source in &new.sources {
            if !state.translations.contains_key(&source.translation) {
                return Err(StoreError::TranslationNotFound(source.translation));
            }
            if let Err(violations) = self.registry.validate(&new.node_type, &source.fields) {
                return Err(StoreError::InvalidFields {
                    node: name,
                    violations,
                });
            }
        }

        let id = NodeId::new(state.next_node + 1);
        let plan = tree::plan_insert(&*state, id, new.parent, new.placement)?;
        state.next_node += 1;

        let mut node = Node::new(id, name.clone(), new.node_type);
        node.home = new.home;
        node.locked = new.locked;
        node.hiding_children = new.hiding_children;
        node.sources = new.sources;

        state.names.insert(name, id);
        state.nodes.insert(id, node);
        let node = state.apply_plan(&plan)?;
        crate::debug!("store"; "created {} `{}`", node.id, node.name);
        Ok(node)
    }

    /// Set a node's status directly, bypassing the workflow.
    ///
    /// Used when loading persisted content whose status was already decided.
    pub(crate) fn restore_status(&self, id: NodeId, status: NodeStatus) -> Result<(), StoreError> {
        self.state.write().node_mut(id)?.status = status;
        Ok(())
    }

    /// Rename a node from a human title.
    pub fn rename(&self, id: NodeId, title: &str) -> Result<Node, StoreError> {
        let mut state = self.state.write();
        let name = tree::plan_rename(&*state, id, title)?;

        let node = state.node_mut(id)?;
        if node.name == name {
            return Ok(node.clone());
        }
        let old = std::mem::replace(&mut node.name, name.clone());
        node.version += 1;
        let node = node.clone();

        state.names.remove(&old);
        state.names.insert(name, id);
        Ok(node)
    }

    /// Move a node to a new parent and/or position.
    pub fn move_node(
        &self,
        id: NodeId,
        parent: Option<NodeId>,
        placement: Placement,
    ) -> Result<Node, StoreError> {
        let mut state = self.state.write();
        let plan = tree::plan_move(&*state, id, parent, placement)?;
        state.apply_plan(&plan)
    }

    pub fn set_locked(&self, id: NodeId, locked: bool) -> Result<Node, StoreError> {
        let mut state = self.state.write();
        let node = state.node_mut(id)?;
        node.locked = locked;
        node.version += 1;
        Ok(node.clone())
    }

    pub fn set_hiding_children(&self, id: NodeId, hiding: bool) -> Result<Node, StoreError> {
        let mut state = self.state.write();
        let node = state.node_mut(id)?;
        node.hiding_children = hiding;
        node.version += 1;
        Ok(node.clone())
    }

    pub fn node_named(&self, name: &str) -> Option<Node> {
        self.state.read().node_named(name).cloned()
    }

    /// Children of `parent` in display order.
    pub fn children(&self, parent: Option<NodeId>) -> Vec<Node> {
        self.state
            .read()
            .sorted_children(parent)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.read().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check installation invariants: every parent exists and no parent
    /// chain loops.
    pub fn verify(&self) -> Result<(), StoreError> {
        let state = self.state.read();
        for node in state.nodes.values() {
            if let Some(parent) = node.parent
                && !state.nodes.contains_key(&parent)
            {
                return Err(TreeError::NodeNotFound(parent).into());
            }
        }
        tree::check_acyclic(&*state, state.nodes.values())?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Aliases & settings
    // ------------------------------------------------------------------------

    /// Point `alias` at `node`.
    pub fn add_alias(&self, alias: &str, node: NodeId) -> Result<UrlAlias, StoreError> {
        let mut state = self.state.write();
        if alias.is_empty() {
            return Err(StoreError::EmptyAlias);
        }
        if state.aliases.contains_key(alias) {
            return Err(StoreError::DuplicateAlias(alias.to_string()));
        }
        if !state.nodes.contains_key(&node) {
            return Err(StoreError::NotFound(node));
        }

        state.next_alias += 1;
        let entry = UrlAlias::new(AliasId::new(state.next_alias), alias, node);
        state.aliases.insert(alias.to_string(), entry.clone());
        Ok(entry)
    }

    /// Remove an alias; its target is untouched.
    pub fn remove_alias(&self, alias: &str) -> Option<UrlAlias> {
        self.state.write().aliases.remove(alias)
    }

    pub fn set_setting(&self, key: impl Into<String>, value: impl Into<String>) {
        self.state.write().settings.insert(key.into(), value.into());
    }
}

// ============================================================================
// Collaborator traits
// ============================================================================

impl TranslationDirectory for MemoryStore {
    fn available_locales(&self) -> Arc<FxHashSet<String>> {
        Arc::clone(&self.locale_sets().locales)
    }

    fn available_shortcuts(&self) -> Arc<FxHashSet<String>> {
        Arc::clone(&self.locale_sets().shortcuts)
    }

    fn find_by_locale_or_shortcut(&self, token: &str) -> Option<Translation> {
        let state = self.state.read();

        // Shortcut first: map it to its full locale, then look that up
        let locale = state
            .by_shortcut
            .get(token)
            .and_then(|id| state.translations.get(id))
            .map_or(token, |t| t.locale.as_str());

        state
            .by_locale
            .get(locale)
            .and_then(|id| state.translations.get(id))
            .cloned()
    }

    fn find_by_id(&self, id: TranslationId) -> Option<Translation> {
        self.state.read().translations.get(&id).cloned()
    }

    fn find_default(&self) -> Translation {
        self.state.read().default.clone()
    }
}

impl AliasIndex for MemoryStore {
    fn find_by_alias(&self, alias: &str) -> Option<Node> {
        let state = self.state.read();
        let entry = state.aliases.get(alias)?;
        state
            .nodes
            .get(&entry.node)
            .filter(|n| !n.status.is_deleted())
            .cloned()
    }

    fn aliases_for(&self, node: NodeId) -> Vec<UrlAlias> {
        let state = self.state.read();
        let mut aliases: Vec<_> = state
            .aliases
            .values()
            .filter(|a| a.node == node)
            .cloned()
            .collect();
        aliases.sort_by_key(|a| a.id);
        aliases
    }
}

impl NodeRepository for MemoryStore {
    fn find_by_id(&self, id: NodeId) -> Option<Node> {
        self.state.read().nodes.get(&id).cloned()
    }

    fn find_by_name_and_translation(
        &self,
        name: &str,
        translation: &Translation,
        mode: ViewMode,
    ) -> Option<Node> {
        let state = self.state.read();
        state
            .node_named(name)
            .filter(|n| n.has_translation(translation.id))
            .filter(|n| tree::is_reachable(&*state, n, &self.registry, mode))
            .cloned()
    }

    fn find_home(&self, translation: &Translation, mode: ViewMode) -> Option<Node> {
        let state = self.state.read();
        let mut homes: Vec<_> = state
            .nodes
            .values()
            .filter(|n| n.home && n.has_translation(translation.id))
            .filter(|n| tree::is_reachable(&*state, n, &self.registry, mode))
            .collect();
        tree::sort_siblings(&mut homes);
        homes.first().map(|n| (*n).clone())
    }

    fn is_reachable(&self, node: &Node, mode: ViewMode) -> bool {
        let state = self.state.read();
        state
            .nodes
            .get(&node.id)
            .is_some_and(|current| tree::is_reachable(&*state, current, &self.registry, mode))
    }

    fn nearest_reachable(&self, node: &Node, mode: ViewMode) -> Option<Node> {
        let state = self.state.read();
        let current = state.nodes.get(&node.id)?;
        tree::nearest_reachable(&*state, current, &self.registry, mode).cloned()
    }

    fn ancestors(&self, node: &Node) -> Vec<Node> {
        let state = self.state.read();
        match state.nodes.get(&node.id) {
            Some(current) => tree::ancestors(&*state, current).cloned().collect(),
            None => Vec::new(),
        }
    }
}

impl NodeStore for MemoryStore {
    fn load(&self, id: NodeId) -> Option<Node> {
        self.state.read().nodes.get(&id).cloned()
    }

    /// Commit status and flags. Name, parent and position belong to the
    /// tree operations and are kept from the stored node.
    fn commit(&self, node: Node, expected_version: u64) -> Result<Node, StoreError> {
        let mut state = self.state.write();
        let stored = state.node_mut(node.id)?;

        if stored.version != expected_version {
            return Err(StoreError::Conflict {
                node: node.id,
                expected: expected_version,
                actual: stored.version,
            });
        }

        stored.status = node.status;
        stored.locked = node.locked;
        stored.hiding_children = node.hiding_children;
        stored.home = node.home;
        stored.sources = node.sources;
        stored.version += 1;
        Ok(stored.clone())
    }
}

impl SettingsSource for MemoryStore {
    fn setting(&self, key: &str) -> Option<String> {
        self.state.read().settings.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, FieldKind, FieldValue, NodeType};
    use crate::workflow::{self, AllowAll, Transition};

    fn registry() -> NodeTypeRegistry {
        NodeTypeRegistry::from_types([
            NodeType::new("Page"),
            NodeType::new("Article")
                .with_field(FieldSpec::new("summary", FieldKind::Text).required()),
        ])
        .unwrap()
    }

    fn fr() -> TranslationId {
        TranslationId::new(1)
    }

    fn store() -> MemoryStore {
        MemoryStore::new(registry(), Translation::new(fr(), "fr_FR"))
    }

    fn page(store: &MemoryStore, title: &str) -> Node {
        store
            .insert_node(NewNode::new("Page", NodeSource::new(fr(), title)))
            .unwrap()
    }

    #[test]
    fn test_new_nodes_are_drafts_named_from_title() {
        let store = store();
        let node = page(&store, "À propos de nous");
        assert_eq!(node.status, NodeStatus::Draft);
        assert_eq!(node.name, "a-propos-de-nous");
        assert_eq!(node.version, 1);
    }

    #[test]
    fn test_insert_rejects_duplicates_and_unknowns() {
        let store = store();
        page(&store, "About");

        assert_eq!(
            store.insert_node(NewNode::new("Page", NodeSource::new(fr(), "ABOUT"))),
            Err(StoreError::Tree(TreeError::NameAlreadyExists("about".into())))
        );
        assert_eq!(
            store.insert_node(NewNode::new("Page", NodeSource::new(TranslationId::new(9), "x"))),
            Err(StoreError::TranslationNotFound(TranslationId::new(9)))
        );
        assert_eq!(
            store.insert_node(NewNode::new("Page", NodeSource::new(fr(), "y")).under(NodeId::new(42))),
            Err(StoreError::Tree(TreeError::NodeNotFound(NodeId::new(42))))
        );
        assert!(matches!(
            store.insert_node(NewNode::new("Article", NodeSource::new(fr(), "z"))),
            Err(StoreError::InvalidFields { .. })
        ));
        // Rejected inserts leave nothing behind
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_validates_fields() {
        let store = store();
        let mut source = NodeSource::new(fr(), "News");
        source
            .fields
            .insert("summary".into(), FieldValue::from("short"));
        let node = store.insert_node(NewNode::new("Article", source)).unwrap();
        assert_eq!(node.node_type, "Article");
    }

    #[test]
    fn test_single_default_translation() {
        let store = store();
        let en = store
            .add_translation(Translation::new(TranslationId::new(2), "en_GB"), false)
            .unwrap();
        assert!(!en.is_default);
        assert_eq!(store.find_default().locale, "fr_FR");

        store
            .add_translation(Translation::new(TranslationId::new(3), "de_DE"), true)
            .unwrap();
        let defaults: Vec<_> = store
            .translations()
            .into_iter()
            .filter(|t| t.is_default)
            .map(|t| t.locale)
            .collect();
        assert_eq!(defaults, ["de_DE"]);
        assert_eq!(store.find_default().locale, "de_DE");
    }

    #[test]
    fn test_duplicate_translations_rejected() {
        let store = store();
        assert_eq!(
            store.add_translation(Translation::new(TranslationId::new(2), "fr_FR"), false),
            Err(StoreError::DuplicateLocale("fr_FR".into()))
        );
        assert_eq!(
            store.add_translation(Translation::new(TranslationId::new(2), "fr_CA"), false),
            Err(StoreError::DuplicateShortcut("fr".into()))
        );
        assert_eq!(
            store.add_translation(Translation::new(fr(), "it_IT"), false),
            Err(StoreError::DuplicateTranslationId(fr()))
        );
        // Nothing was registered by the failed attempts
        assert_eq!(store.translations().len(), 1);
        assert!(!store.available_shortcuts().contains("it"));
    }

    #[test]
    fn test_shortcut_wins_over_full_locale() {
        // Registration order must not matter
        for gb_first in [true, false] {
            let store = store();
            let gb = Translation::new(TranslationId::new(2), "en_GB").with_shortcut("en");
            let en = Translation::new(TranslationId::new(3), "en").with_shortcut("english");
            let (first, second) = if gb_first { (gb, en) } else { (en, gb) };
            store.add_translation(first, false).unwrap();
            store.add_translation(second, false).unwrap();

            assert_eq!(store.find_by_locale_or_shortcut("en").unwrap().locale, "en_GB");
            assert_eq!(store.find_by_locale_or_shortcut("english").unwrap().locale, "en");
            assert_eq!(store.find_by_locale_or_shortcut("en_GB").unwrap().locale, "en_GB");
        }
    }

    #[test]
    fn test_cached_locale_sets_invalidated_by_new_translation() {
        let store = store();
        // Warm the cache from several readers first
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert!(!store.available_shortcuts().contains("de")));
            }
        });

        store
            .add_translation(Translation::new(TranslationId::new(2), "de_DE"), false)
            .unwrap();
        assert!(store.available_shortcuts().contains("de"));
        assert!(store.available_locales().contains("de_DE"));
    }

    #[test]
    fn test_locale_sets_follow_translations() {
        let store = store();
        assert!(store.available_shortcuts().contains("fr"));
        assert!(!store.available_shortcuts().contains("en"));

        store
            .add_translation(Translation::new(TranslationId::new(2), "en_GB"), false)
            .unwrap();
        assert!(store.available_shortcuts().contains("en"));
        assert!(store.available_locales().contains("en_GB"));
    }

    #[test]
    fn test_find_by_shortcut_then_locale() {
        let store = store();
        assert_eq!(store.find_by_locale_or_shortcut("fr").unwrap().locale, "fr_FR");
        assert_eq!(store.find_by_locale_or_shortcut("fr_FR").unwrap().locale, "fr_FR");
        assert!(store.find_by_locale_or_shortcut("FR").is_none());
        assert!(store.find_by_locale_or_shortcut("en").is_none());
    }

    #[test]
    fn test_alias_lookup() {
        let store = store();
        let node = page(&store, "About");
        store.add_alias("apropos", node.id).unwrap();

        assert_eq!(store.find_by_alias("apropos").unwrap().id, node.id);
        assert!(store.find_by_alias("Apropos").is_none());
        assert!(store.find_by_alias("apro").is_none());
        assert_eq!(
            store.add_alias("apropos", node.id),
            Err(StoreError::DuplicateAlias("apropos".into()))
        );

        store.restore_status(node.id, NodeStatus::Deleted).unwrap();
        assert!(store.find_by_alias("apropos").is_none());

        assert!(store.remove_alias("apropos").is_some());
        assert!(store.aliases_for(node.id).is_empty());
    }

    #[test]
    fn test_rename_updates_index() {
        let store = store();
        let node = page(&store, "About");
        let renamed = store.rename(node.id, "About Us").unwrap();

        assert_eq!(renamed.name, "about-us");
        assert!(store.node_named("about").is_none());
        assert_eq!(store.node_named("about-us").unwrap().id, node.id);
    }

    #[test]
    fn test_move_is_atomic_and_ordered() {
        let store = store();
        let parent = page(&store, "Parent");
        let a = page(&store, "A");
        let b = page(&store, "B");

        store.move_node(a.id, Some(parent.id), Placement::Last).unwrap();
        store.move_node(b.id, Some(parent.id), Placement::First).unwrap();

        let names: Vec<_> = store
            .children(Some(parent.id))
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(names, ["b", "a"]);

        assert_eq!(
            store.move_node(parent.id, Some(a.id), Placement::Last),
            Err(StoreError::Tree(TreeError::Cycle {
                node: parent.id,
                parent: a.id
            }))
        );
        assert!(store.verify().is_ok());
    }

    #[test]
    fn test_reachability_uses_current_ancestors() {
        let store = store();
        let parent = page(&store, "Parent");
        let child = store
            .insert_node(NewNode::new("Page", NodeSource::new(fr(), "Child")).under(parent.id))
            .unwrap();
        store.restore_status(parent.id, NodeStatus::Published).unwrap();
        store.restore_status(child.id, NodeStatus::Published).unwrap();
        assert!(store.is_reachable(&child, ViewMode::Live));

        store.set_hiding_children(parent.id, true).unwrap();
        assert!(!store.is_reachable(&child, ViewMode::Live));
        assert_eq!(
            store.nearest_reachable(&child, ViewMode::Live).unwrap().id,
            parent.id
        );
    }

    #[test]
    fn test_commit_detects_conflicts() {
        let store = store();
        let node = page(&store, "About");

        let stale = store.load(node.id).unwrap();
        store.set_locked(node.id, true).unwrap();

        let mut next = stale.clone();
        next.status = NodeStatus::Published;
        assert!(matches!(
            store.commit(next, stale.version),
            Err(StoreError::Conflict { .. })
        ));
        assert_eq!(store.load(node.id).unwrap().status, NodeStatus::Draft);
    }

    #[test]
    fn test_commit_keeps_structure() {
        let store = store();
        let node = page(&store, "About");

        let mut next = store.load(node.id).unwrap();
        next.name = "hijacked".into();
        next.status = NodeStatus::Pending;
        let committed = store.commit(next, node.version).unwrap();

        assert_eq!(committed.name, "about");
        assert_eq!(committed.status, NodeStatus::Pending);
        assert_eq!(committed.version, node.version + 1);
    }

    #[test]
    fn test_workflow_request_against_store() {
        let store = store();
        let node = page(&store, "About");

        let outcome = workflow::request(&store, node.id, Transition::Publish, &AllowAll).unwrap();
        assert!(outcome.is_applied());
        assert!(store.is_reachable(&node, ViewMode::Live));
    }

    #[test]
    fn test_settings() {
        let store = store();
        assert_eq!(store.setting("force_locale"), None);
        store.set_setting("force_locale", "true");
        assert_eq!(store.setting("force_locale").as_deref(), Some("true"));
    }
}

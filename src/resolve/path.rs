//! Canonical path generation, the reverse of resolution.

use url::Url;

use crate::content::{Node, Translation};
use crate::core::ViewMode;
use crate::store::{AliasIndex, NodeRepository, TranslationDirectory};

/// Builds the canonical path under which a node resolves.
///
/// ```text
/// home node, default translation      -> /
/// home node, other translation        -> /en
/// node with an alias (original lang)  -> /[breadcrumbs/]alias
/// any other node                      -> /[en/][breadcrumbs/]name
/// ```
///
/// Breadcrumbs are the names of reachable, non-home ancestors. They are
/// decorative: resolution only looks at the last segment. When the first
/// segment would be taken for a locale, the translation's shortcut is
/// emitted even for the default translation.
pub struct UrlGenerator<'s> {
    translations: &'s dyn TranslationDirectory,
    aliases: &'s dyn AliasIndex,
    nodes: &'s dyn NodeRepository,
    force_locale: bool,
    mode: ViewMode,
}

impl<'s> UrlGenerator<'s> {
    pub fn new(
        translations: &'s dyn TranslationDirectory,
        aliases: &'s dyn AliasIndex,
        nodes: &'s dyn NodeRepository,
    ) -> Self {
        Self {
            translations,
            aliases,
            nodes,
            force_locale: false,
            mode: ViewMode::Live,
        }
    }

    /// Always emit the locale segment, even for the default translation.
    pub fn with_force_locale(mut self, force: bool) -> Self {
        self.force_locale = force;
        self
    }

    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    /// Canonical path of `node` in `translation`.
    ///
    /// An unreachable node is replaced by its nearest reachable ancestor;
    /// `None` when there is none.
    pub fn path_for(&self, node: &Node, translation: &Translation) -> Option<String> {
        let target = if self.nodes.is_reachable(node, self.mode) {
            node.clone()
        } else {
            self.nodes.nearest_reachable(node, self.mode)?
        };

        let prefix = self.locale_prefix(translation);
        if target.home {
            return Some(match prefix {
                Some(shortcut) => format!("/{shortcut}"),
                None => "/".to_string(),
            });
        }

        let mut segments: Vec<String> = self
            .nodes
            .ancestors(&target)
            .into_iter()
            .filter(|a| !a.home && self.nodes.is_reachable(a, self.mode))
            .map(|a| a.name)
            .collect();
        segments.reverse();
        segments.push(self.last_segment(&target, translation));

        // A leading segment that reads as a locale would be consumed as one
        let prefix = prefix.or_else(|| {
            segments
                .first()
                .is_some_and(|first| self.is_locale_token(first))
                .then_some(translation.shortcut.as_str())
        });
        match prefix {
            Some(shortcut) => Some(format!("/{shortcut}/{}", segments.join("/"))),
            None => Some(format!("/{}", segments.join("/"))),
        }
    }

    fn is_locale_token(&self, token: &str) -> bool {
        self.translations.available_shortcuts().contains(token)
            || self.translations.available_locales().contains(token)
    }

    /// `path_for` joined onto `base`.
    pub fn absolute_url(&self, base: &Url, node: &Node, translation: &Translation) -> Option<Url> {
        let path = self.path_for(node, translation)?;

        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }
        base.join(path.trim_start_matches('/')).ok()
    }

    fn locale_prefix<'t>(&self, translation: &'t Translation) -> Option<&'t str> {
        (self.force_locale || !translation.is_default).then_some(translation.shortcut.as_str())
    }

    /// The node's first alias when it resolves to `translation`, else its name.
    ///
    /// Aliases always resolve to the node's original translation, so they
    /// are only usable for that one.
    fn last_segment(&self, node: &Node, translation: &Translation) -> String {
        if node.original_translation() == Some(translation.id)
            && let Some(alias) = self.aliases.aliases_for(node.id).into_iter().next()
        {
            return alias.alias;
        }
        node.name.clone()
    }

    /// Path of `node` in its original translation.
    pub fn canonical_path(&self, node: &Node) -> Option<String> {
        let translation = match node.original_translation() {
            Some(id) => self.translations.find_by_id(id)?,
            None => self.translations.find_default(),
        };
        self.path_for(node, &translation)
    }
}

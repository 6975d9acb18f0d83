//! Path -> node resolution.
//!
//! Precedence, in order:
//!
//! 1. Tokenize (drop empty segments); no tokens -> `NotFound`
//! 2. Alias lookup on the last token, unless the only token is a locale
//! 3. Locale from the first token (consumed), else the default translation
//! 4. Reachable node named after the last remaining token in that translation
//!
//! Only the last token identifies content. Intermediate segments are
//! decorative breadcrumbs and are not checked against the tree.

use crate::content::Translation;
use crate::core::{Segments, tokenize};
use crate::store::{AliasIndex, NodeRepository, TranslationDirectory};
use crate::utils::strip_tags;

use super::{Resolution, ResolveContext, ResolveResult};

/// Paths deeper than this are treated as malformed.
pub const DEFAULT_MAX_SEGMENTS: usize = 64;

/// Stateless resolver over borrowed collaborators.
///
/// Safe to share across threads; every call is a handful of point lookups
/// (one alias lookup, or a locale lookup plus a name lookup).
#[derive(Clone, Copy)]
pub struct Resolver<'s> {
    translations: &'s dyn TranslationDirectory,
    aliases: &'s dyn AliasIndex,
    nodes: &'s dyn NodeRepository,
    max_segments: usize,
}

impl<'s> Resolver<'s> {
    pub fn new(
        translations: &'s dyn TranslationDirectory,
        aliases: &'s dyn AliasIndex,
        nodes: &'s dyn NodeRepository,
    ) -> Self {
        Self {
            translations,
            aliases,
            nodes,
            max_segments: DEFAULT_MAX_SEGMENTS,
        }
    }

    pub fn with_max_segments(mut self, max_segments: usize) -> Self {
        self.max_segments = max_segments;
        self
    }

    /// Resolve a decoded request path.
    pub fn resolve(&self, path: &str, ctx: &ResolveContext) -> ResolveResult {
        if path.contains('\0') {
            crate::debug!("resolve"; "malformed path (NUL byte)");
            return ResolveResult::NotFound;
        }

        let tokens = tokenize(path);
        if tokens.is_empty() {
            return ResolveResult::NotFound;
        }
        if tokens.len() > self.max_segments {
            crate::debug!("resolve"; "malformed path ({} segments)", tokens.len());
            return ResolveResult::NotFound;
        }

        if let Some(resolution) = self.by_alias(&tokens, ctx) {
            return ResolveResult::Found(resolution);
        }
        self.by_name(&tokens, ctx).into()
    }

    /// Whether `token` is a known locale shortcut or full locale.
    ///
    /// Shortcuts are checked first, so a token that is both never
    /// becomes ambiguous.
    pub fn is_locale_token(&self, token: &str) -> bool {
        self.translations.available_shortcuts().contains(token)
            || self.translations.available_locales().contains(token)
    }

    /// Translation designated by a leading locale token, if any.
    pub fn locale_of(&self, token: &str) -> Option<Translation> {
        if self.is_locale_token(token) {
            self.translations.find_by_locale_or_shortcut(token)
        } else {
            None
        }
    }

    fn by_alias(&self, tokens: &Segments<'_>, ctx: &ResolveContext) -> Option<Resolution> {
        if let [only] = tokens.as_slice()
            && self.is_locale_token(only)
        {
            return None;
        }

        let last = tokens.last()?;
        let candidate = strip_tags(last);
        if candidate.is_empty() {
            return None;
        }

        let node = self.aliases.find_by_alias(&candidate)?;
        if !self.nodes.is_reachable(&node, ctx.mode) {
            crate::debug!("resolve"; "alias target {} not reachable", node.id);
            return None;
        }

        let translation = node
            .original_translation()
            .and_then(|id| self.translations.find_by_id(id))?;

        crate::debug!("resolve"; "alias `{}` -> {} ({})", candidate, node.id, translation.shortcut);
        Some(Resolution::new(node, translation, true))
    }

    fn by_name(&self, tokens: &Segments<'_>, ctx: &ResolveContext) -> Option<Resolution> {
        let (translation, rest) = match tokens.split_first() {
            Some((first, rest)) if self.is_locale_token(first) => {
                (self.translations.find_by_locale_or_shortcut(first)?, rest)
            }
            _ => (self.translations.find_default(), tokens.as_slice()),
        };

        // Locale-only path: a language root, left to the caller
        let last = rest.last()?;
        let name = strip_tags(last);
        if name.is_empty() {
            return None;
        }

        let node = self
            .nodes
            .find_by_name_and_translation(&name, &translation, ctx.mode)?;

        crate::debug!("resolve"; "name `{}` -> {} ({})", name, node.id, translation.shortcut);
        Some(Resolution::new(node, translation, false))
    }
}

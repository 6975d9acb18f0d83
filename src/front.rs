//! Front controller helpers.
//!
//! The resolver never special-cases the site root or a bare locale
//! segment. This layer sits between the HTTP request and the resolver:
//! it decodes the raw request target once, maps root and language-root
//! paths to the home node, and hands everything else to [`Resolver`].

use crate::content::Translation;
use crate::core::RequestPath;
use crate::resolve::{Resolution, ResolveContext, ResolveResult, Resolver};
use crate::store::{AliasIndex, NodeRepository, TranslationDirectory};

pub struct FrontController<'s> {
    resolver: Resolver<'s>,
    translations: &'s dyn TranslationDirectory,
    nodes: &'s dyn NodeRepository,
    /// Home node by name; the node flagged `home` is used when unset.
    home: Option<String>,
}

impl<'s> FrontController<'s> {
    pub fn new(
        translations: &'s dyn TranslationDirectory,
        aliases: &'s dyn AliasIndex,
        nodes: &'s dyn NodeRepository,
    ) -> Self {
        Self {
            resolver: Resolver::new(translations, aliases, nodes),
            translations,
            nodes,
            home: None,
        }
    }

    pub fn with_max_segments(mut self, max_segments: usize) -> Self {
        self.resolver = self.resolver.with_max_segments(max_segments);
        self
    }

    pub fn with_home(mut self, name: Option<String>) -> Self {
        self.home = name;
        self
    }

    #[inline]
    pub fn resolver(&self) -> &Resolver<'s> {
        &self.resolver
    }

    /// Route a raw request target (`/en/about%20us?x=1#top`).
    pub fn route(&self, raw_uri: &str, ctx: &ResolveContext) -> ResolveResult {
        self.route_path(&RequestPath::from_request_uri(raw_uri), ctx)
    }

    /// Route an already decoded path.
    pub fn route_path(&self, path: &RequestPath, ctx: &ResolveContext) -> ResolveResult {
        let segments = path.segments();
        match segments.as_slice() {
            [] => self.home(self.translations.find_default(), ctx),
            [only] => match self.resolver.locale_of(only) {
                Some(translation) => self.home(translation, ctx),
                None => self.resolver.resolve(path.as_str(), ctx),
            },
            _ => self.resolver.resolve(path.as_str(), ctx),
        }
    }

    fn home(&self, translation: Translation, ctx: &ResolveContext) -> ResolveResult {
        let node = match &self.home {
            Some(name) => self
                .nodes
                .find_by_name_and_translation(name, &translation, ctx.mode),
            None => self.nodes.find_home(&translation, ctx.mode),
        };
        crate::debug!("resolve"; "home ({}): {}", translation.shortcut, node.is_some());
        node.map(|node| Resolution::new(node, translation, false))
            .into()
    }
}

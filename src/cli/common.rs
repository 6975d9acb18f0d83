//! Common utilities shared across CLI commands.

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;

use crate::config::{CanopyConfig, find_config_file};
use crate::content::{Node, Translation};
use crate::core::ViewMode;
use crate::front::FrontController;
use crate::resolve::UrlGenerator;
use crate::settings::{SettingsBag, keys};
use crate::store::{Fixture, MemoryStore, TranslationDirectory};

use super::Cli;

/// Loaded configuration plus the content store built from its fixture.
pub struct Site {
    pub config: CanopyConfig,
    pub store: MemoryStore,
}

impl Site {
    /// Locate the config, then load and validate the content fixture.
    pub fn load(cli: &Cli) -> Result<Self> {
        let Some(path) = find_config_file(&cli.config) else {
            bail!(
                "config file `{}` not found in the current directory or any parent",
                cli.config.display()
            );
        };
        let config = CanopyConfig::load(&path)?;
        crate::debug!("config"; "loaded {}", path.display());

        let registry = config.registry()?;
        let content = config.content_path();
        let store = Fixture::load(&content)
            .and_then(|fixture| fixture.into_store(registry))
            .with_context(|| format!("failed to load content from `{}`", content.display()))?;

        Ok(Self { config, store })
    }

    /// Front controller configured from `[routing]`.
    pub fn front(&self) -> FrontController<'_> {
        FrontController::new(&self.store, &self.store, &self.store)
            .with_max_segments(self.config.routing.max_segments)
            .with_home(self.config.routing.home.clone())
    }

    /// Path generator; `force` adds to the config and stored settings.
    ///
    /// `settings` is the bag owned by the caller for the whole command, so
    /// repeated calls share its cache.
    pub fn generator<'a>(
        &'a self,
        settings: &SettingsBag<'_>,
        mode: ViewMode,
        force: bool,
    ) -> UrlGenerator<'a> {
        let forced = force
            || self.config.routing.force_locale
            || settings.get_bool(keys::FORCE_LOCALE).unwrap_or(false);

        UrlGenerator::new(&self.store, &self.store, &self.store)
            .with_force_locale(forced)
            .with_mode(mode)
    }

    /// View mode for a command: the flag or `routing.preview`.
    pub fn mode(&self, preview: bool) -> ViewMode {
        ViewMode::from_preview(preview || self.config.routing.preview)
    }

    pub fn node(&self, name: &str) -> Result<Node> {
        self.store
            .node_named(name)
            .ok_or_else(|| anyhow!("no node named `{name}`"))
    }

    pub fn translation(&self, token: &str) -> Result<Translation> {
        self.store
            .find_by_locale_or_shortcut(token)
            .ok_or_else(|| anyhow!("unknown locale `{token}`"))
    }
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::scenario;

    fn site() -> Site {
        Site {
            config: CanopyConfig::default(),
            store: scenario(),
        }
    }

    #[test]
    fn test_generator_reads_force_locale_setting() {
        let site = site();
        let fr = site.store.find_default();
        let about = site.node("about-us").unwrap();

        let settings = SettingsBag::new(&site.store);
        let generator = site.generator(&settings, ViewMode::Live, false);
        assert_eq!(generator.path_for(&about, &fr).as_deref(), Some("/apropos"));

        site.store.set_setting(keys::FORCE_LOCALE, "yes");
        let settings = SettingsBag::new(&site.store);
        let generator = site.generator(&settings, ViewMode::Live, false);
        assert_eq!(generator.path_for(&about, &fr).as_deref(), Some("/fr/apropos"));
    }

    #[test]
    fn test_generators_share_one_settings_cache() {
        let site = site();
        let settings = SettingsBag::new(&site.store);

        let _ = site.generator(&settings, ViewMode::Live, false);
        let _ = site.generator(&settings, ViewMode::Preview, false);
        assert_eq!(settings.len(), 1);

        // Later writes are only seen after an explicit invalidation
        site.store.set_setting(keys::FORCE_LOCALE, "on");
        assert_eq!(settings.get_bool(keys::FORCE_LOCALE), None);
        settings.invalidate();
        assert_eq!(settings.get_bool(keys::FORCE_LOCALE), Some(true));
    }
}

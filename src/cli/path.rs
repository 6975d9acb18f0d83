//! `canopy path` command.

use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::args::ViewArgs;
use super::common::{Site, print_json};
use crate::content::Translation;
use crate::settings::SettingsBag;
use crate::store::TranslationDirectory;

#[derive(Debug, Serialize)]
struct GeneratedPath {
    locale: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

/// Print the path of `name` in one translation, or in each of its sources.
pub fn run_path(
    site: &Site,
    settings: &SettingsBag<'_>,
    name: &str,
    locale: Option<&str>,
    force_locale: bool,
    view: &ViewArgs,
) -> Result<()> {
    let node = site.node(name)?;
    let generator = site.generator(settings, site.mode(view.preview), force_locale);
    let base = site.config.base_url();

    let translations: Vec<Translation> = match locale {
        Some(token) => vec![site.translation(token)?],
        None => node
            .sources
            .iter()
            .filter_map(|source| site.store.find_by_id(source.translation))
            .collect(),
    };

    let paths: Vec<GeneratedPath> = translations
        .iter()
        .filter_map(|translation| {
            let path = generator.path_for(&node, translation)?;
            let url = base
                .as_ref()
                .and_then(|base| generator.absolute_url(base, &node, translation))
                .map(String::from);
            Some(GeneratedPath {
                locale: translation.locale.clone(),
                path,
                url,
            })
        })
        .collect();

    if paths.is_empty() {
        bail!("`{name}` has no reachable path");
    }

    if view.json {
        return print_json(&paths);
    }

    for generated in &paths {
        match &generated.url {
            Some(url) => println!("{} {} {}", generated.locale.cyan(), generated.path, url.dimmed()),
            None => println!("{} {}", generated.locale.cyan(), generated.path),
        }
    }
    Ok(())
}

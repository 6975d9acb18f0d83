//! `canopy resolve` command.

use anyhow::Result;
use owo_colors::OwoColorize;

use super::args::ViewArgs;
use super::common::{Site, print_json};
use crate::resolve::{ResolveContext, ResolveResult, Visibility};

/// Resolve `path` and print the outcome.
pub fn run_resolve(site: &Site, path: &str, view: &ViewArgs, locale: Option<&str>) -> Result<()> {
    let mode = site.mode(view.preview);
    let ctx = ResolveContext {
        preferred_locale: locale.map(str::to_owned),
        mode,
    };

    let result = site.front().route(path, &ctx);
    crate::debug!("resolve"; "{} in {:?} mode", path, mode);

    if view.json {
        return print_json(&result);
    }

    match result {
        ResolveResult::Found(found) => {
            let title = found.node.title(found.translation.id);
            println!(
                "{} {} ({}) [{}]",
                found.node.name.bold(),
                title,
                found.locale().cyan(),
                found.node.status
            );
            if found.via_alias {
                println!("  {}", "matched by alias".dimmed());
            }
            if found.visibility == Visibility::PreviewOnly {
                println!("  {}", "preview only".yellow());
            }
        }
        ResolveResult::NotFound => println!("{}", "not found".red()),
    }
    Ok(())
}

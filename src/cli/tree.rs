//! `canopy tree` command.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::args::ViewArgs;
use super::common::{Site, print_json};
use crate::content::Node;
use crate::core::{NodeId, NodeStatus, ViewMode};
use crate::resolve::UrlGenerator;
use crate::settings::SettingsBag;
use crate::store::{AliasIndex, NodeRepository};
use crate::utils::plural_count;

/// One node in the printed tree.
#[derive(Debug, Serialize)]
struct TreeEntry {
    name: String,
    #[serde(rename = "type")]
    node_type: String,
    status: NodeStatus,
    reachable: bool,
    path: Option<String>,
    aliases: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<TreeEntry>,
}

/// Print every node, siblings in position order.
pub fn run_tree(site: &Site, settings: &SettingsBag<'_>, view: &ViewArgs) -> Result<()> {
    let mode = site.mode(view.preview);
    let generator = site.generator(settings, mode, false);
    let roots = collect(site, &generator, None, mode);

    if view.json {
        return print_json(&roots);
    }

    for entry in &roots {
        print_entry(entry, 0);
    }
    crate::log!("tree"; "{}", plural_count(site.store.len(), "node"));
    Ok(())
}

fn collect(
    site: &Site,
    generator: &UrlGenerator<'_>,
    parent: Option<NodeId>,
    mode: ViewMode,
) -> Vec<TreeEntry> {
    site.store
        .children(parent)
        .into_iter()
        .map(|node| TreeEntry {
            reachable: site.store.is_reachable(&node, mode),
            path: reachable_path(site, &node, mode, generator),
            aliases: site
                .store
                .aliases_for(node.id)
                .into_iter()
                .map(|a| a.alias)
                .collect(),
            children: collect(site, generator, Some(node.id), mode),
            name: node.name,
            node_type: node.node_type,
            status: node.status,
        })
        .collect()
}

/// Canonical path, only for nodes that resolve to themselves.
fn reachable_path(
    site: &Site,
    node: &Node,
    mode: ViewMode,
    generator: &UrlGenerator<'_>,
) -> Option<String> {
    site.store
        .is_reachable(node, mode)
        .then(|| generator.canonical_path(node))
        .flatten()
}

fn print_entry(entry: &TreeEntry, depth: usize) {
    let indent = "  ".repeat(depth);
    let name = if entry.reachable {
        entry.name.bold().to_string()
    } else {
        entry.name.dimmed().to_string()
    };
    let mut line = format!("{indent}{name} {} [{}]", entry.node_type.dimmed(), entry.status);
    if let Some(path) = &entry.path {
        line.push_str(&format!(" {}", path.cyan()));
    }
    if !entry.aliases.is_empty() {
        line.push_str(&format!(" {}", format!("aka {}", entry.aliases.join(", ")).dimmed()));
    }
    println!("{line}");

    for child in &entry.children {
        print_entry(child, depth + 1);
    }
}

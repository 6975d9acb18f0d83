//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::workflow::{Capability, Transition};

/// Canopy content tree and URL resolution inspector
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: canopy.toml)
    #[arg(short = 'C', long, global = true, default_value = "canopy.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve a request path to a node
    #[command(visible_alias = "r")]
    Resolve {
        /// Request path, raw or percent-encoded (e.g. `/en/about-us`)
        path: String,

        #[command(flatten)]
        view: ViewArgs,

        /// Preferred locale of the visitor (informational only)
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Print the node tree with statuses
    #[command(visible_alias = "t")]
    Tree {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Generate the path of a node in a translation
    #[command(visible_alias = "p")]
    Path {
        /// Node name
        name: String,

        /// Locale or shortcut (default: every translation of the node)
        #[arg(short, long)]
        locale: Option<String>,

        /// Always prefix the locale segment
        #[arg(short, long)]
        force_locale: bool,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Try a workflow transition on a node
    ///
    /// The fixture is never written back; the command reports what the
    /// transition would do.
    Transition {
        /// Node name
        name: String,

        /// Transition event (review, reject, publish, archive, unarchive, delete, undelete)
        event: Transition,

        /// Capabilities the acting user lacks
        #[arg(short, long, value_name = "CAPABILITY")]
        deny: Vec<Capability>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Print the URL-safe name derived from a title
    Slugify {
        /// Title text
        text: String,
    },
}

/// Shared view arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ViewArgs {
    /// Show unpublished content, as an editor would
    #[arg(short, long)]
    pub preview: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

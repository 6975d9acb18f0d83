//! Canopy - inspect a content tree, resolve paths and try workflow transitions.

use anyhow::Result;
use canopy::cli::{self, Cli, Commands, common::Site};
use canopy::settings::SettingsBag;
use canopy::utils::slugify;
use clap::{ColorChoice, Parser};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    canopy::logger::set_verbose(cli.verbose);

    // Needs neither config nor content
    if let Commands::Slugify { text } = &cli.command {
        println!("{}", slugify(text));
        return Ok(());
    }

    let site = Site::load(&cli)?;
    let settings = SettingsBag::new(&site.store);

    match &cli.command {
        Commands::Resolve { path, view, locale } => {
            cli::resolve::run_resolve(&site, path, view, locale.as_deref())
        }
        Commands::Tree { view } => cli::tree::run_tree(&site, &settings, view),
        Commands::Path {
            name,
            locale,
            force_locale,
            view,
        } => cli::path::run_path(&site, &settings, name, locale.as_deref(), *force_locale, view),
        Commands::Transition {
            name,
            event,
            deny,
            json,
        } => cli::transition::run_transition(&site, name, *event, deny, *json),
        Commands::Slugify { .. } => Ok(()),
    }
}

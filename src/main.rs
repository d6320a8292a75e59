//! figpack - build orchestrator for Figma plugins.

mod bundle;
mod cli;
mod config;
mod core;
mod embed;
mod logger;
mod utils;
mod watch;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, init::InitMode, init::InitOptions};
use config::PluginConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    match &cli.command {
        Some(Commands::Init { name, no_ui, dry }) => {
            let cwd = std::env::current_dir().context("Failed to get current working directory")?;
            let (root, mode) = match name {
                Some(name) => (cwd.join(name), InitMode::NewDir),
                None => (cwd, InitMode::CurrentDir),
            };
            let options = InitOptions {
                no_ui: *no_ui,
                dry_run: *dry,
            };
            cli::init::new_project(&root, mode, options)
        }
        Some(Commands::Build { .. }) | None => {
            let config = PluginConfig::load(&cli)?;
            cli::build::run_build(&config, cli.is_watch())
        }
    }
}

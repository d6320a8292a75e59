//! Plugin building.
//!
//! Phases:
//! - **Resolve** - Probe entries once, fix the target set
//! - **Bundle** - One-shot parallel build, or a long-lived watch session

use crate::{
    bundle::{BuildReport, Bundler, EmbedOutcome, EsbuildBundler, TargetSet, build_once},
    config::PluginConfig,
    core, debug, log,
    watch::WatchSession,
};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Build the plugin once, or keep rebuilding when `watch` is set.
pub fn run_build(config: &PluginConfig, watch: bool) -> Result<()> {
    let targets = TargetSet::resolve(config).context("cannot resolve build targets")?;
    if !targets.has_ui() {
        debug!(
            "build";
            "no {} found, building main only",
            config.root_relative(&config.build.ui.entry).display()
        );
    }

    let bundler: Arc<dyn Bundler> = Arc::new(EsbuildBundler::from_config(config));

    if watch {
        let session = WatchSession::start(config, &targets, bundler)?;
        core::set_watching();
        session.wait();
        return Ok(());
    }

    let report = build_once(&targets, bundler.as_ref())?;
    log_report(config, &report);
    Ok(())
}

fn log_report(config: &PluginConfig, report: &BuildReport) {
    log!("build"; "main → {}", config.root_relative(&report.main).display());
    if let Some((html, outcome)) = &report.ui {
        let html = config.root_relative(html);
        match outcome {
            EmbedOutcome::Injected => log!("build"; "ui → {}", html.display()),
            EmbedOutcome::PassedThrough => {
                log!("build"; "ui → {} (shell copied without script)", html.display());
            }
        }
    }
    log!("build"; "done in {}ms", report.elapsed.as_millis());
}

//! Bundling transform.
//!
//! The transform is delegated to an external bundler (esbuild by default)
//! behind the [`Bundler`] trait. The orchestrator and the watch controller
//! only know the trait, so tests drive them with an in-process bundler.

use super::{BuildError, TargetDescriptor};
use crate::config::PluginConfig;
use crate::utils::exec::{Cmd, FilterRule};
use crate::utils::path::relative_to;
use crate::{debug, log};
use std::path::{Path, PathBuf};

/// Produces one self-contained script per target.
///
/// Implementations must not write the output when bundling fails, so a
/// failed build leaves the previous artifact untouched.
pub trait Bundler: Send + Sync {
    fn bundle(&self, target: &TargetDescriptor) -> Result<(), BuildError>;
}

/// esbuild prints a size table and a timing line at `info` level.
static ESBUILD_FILTER: FilterRule = FilterRule::new(&["⚡ Done", "Done in"]);

/// External esbuild-compatible bundler invoked through its CLI.
#[derive(Debug, Clone)]
pub struct EsbuildBundler {
    /// Program followed by its leading arguments (`npx esbuild`).
    command: Vec<String>,
    root: PathBuf,
    log_level: String,
    minify: bool,
    sourcemap: bool,
    extra_args: Vec<String>,
}

impl EsbuildBundler {
    pub fn from_config(config: &PluginConfig) -> Self {
        let root = config.get_root().to_path_buf();
        let mut command = config.bundler.command.clone();

        // Prefer the resolved location (e.g. node_modules/.bin/esbuild).
        if let Some(program) = config.bundler.resolve_program(&root)
            && let Some(first) = command.first_mut()
        {
            *first = program.display().to_string();
        }

        Self {
            command,
            root,
            log_level: config.bundler.log_level.clone(),
            minify: config.build.minify,
            sourcemap: config.build.sourcemap,
            extra_args: config.bundler.args.clone(),
        }
    }

    /// Arguments for one target, appended after the configured command.
    pub fn args_for(&self, target: &TargetDescriptor) -> Vec<String> {
        let rel = |path: &Path| relative_to(path, &self.root).display().to_string();

        let mut args: Vec<String> = vec![
            rel(&target.entry),
            "--bundle".into(),
            format!("--outfile={}", rel(&target.output)),
            format!("--target={}", target.target),
            format!("--format={}", target.format),
            format!("--log-level={}", self.log_level),
        ];
        if self.minify {
            args.push("--minify".into());
        }
        if self.sourcemap {
            args.push("--sourcemap=inline".into());
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

impl Bundler for EsbuildBundler {
    fn bundle(&self, target: &TargetDescriptor) -> Result<(), BuildError> {
        let args = self.args_for(target);
        debug!("bundle"; "{} {}", self.command.join(" "), args.join(" "));

        let cmd = Cmd::from_slice(&self.command).args(&args).cwd(&self.root);
        let program = cmd.program_name();
        let output = cmd.output().map_err(|source| BuildError::BundlerSpawn {
            program: program.clone(),
            source,
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let lines = ESBUILD_FILTER.keep(&stderr);

        if !output.status.success() {
            let detail = if lines.is_empty() {
                format!("`{program}` exited with {}", output.status)
            } else {
                lines.join("\n")
            };
            return Err(BuildError::Bundle {
                target: target.kind,
                detail,
            });
        }

        if lines.iter().any(|line| line.contains("[WARNING]")) {
            log!("bundle"; "{}", lines.join("\n"));
        } else if !lines.is_empty() {
            debug!("bundle"; "{}", lines.join("\n"));
        }
        Ok(())
    }
}

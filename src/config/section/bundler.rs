//! `[bundler]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [bundler]
//! command = ["esbuild"]            # or ["npx", "esbuild"]
//! args = ["--define:DEBUG=false"]  # appended to every invocation
//! log_level = "info"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Package runners that fetch the real tool at run time.
const PACKAGE_RUNNERS: &[&str] = &["npx", "bunx", "pnpx", "yarn", "dlx"];

/// External bundler invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BundlerConfig {
    /// Program and leading arguments.
    pub command: Vec<String>,
    /// Extra arguments appended after the generated flags.
    pub args: Vec<String>,
    /// Bundler log level (`--log-level=`).
    pub log_level: String,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            command: vec!["esbuild".into()],
            args: Vec::new(),
            log_level: "info".into(),
        }
    }
}

pub struct BundlerFields {
    pub command: FieldPath,
    pub log_level: FieldPath,
}

impl BundlerConfig {
    pub const FIELDS: BundlerFields = BundlerFields {
        command: FieldPath::new("bundler.command"),
        log_level: FieldPath::new("bundler.log_level"),
    };

    /// Whether `command[0]` is a package runner (`npx esbuild`, ...).
    pub fn is_package_runner(&self) -> bool {
        self.command
            .first()
            .is_some_and(|cmd| PACKAGE_RUNNERS.contains(&cmd.as_str()))
    }

    /// Locate the bundler executable.
    ///
    /// Lookup order:
    /// 1. a path-like program (`./tools/esbuild`) relative to root
    /// 2. the project's `node_modules/.bin`
    /// 3. `PATH`
    pub fn resolve_program(&self, root: &Path) -> Option<PathBuf> {
        let program = self.command.first()?;
        let as_path = Path::new(program);

        if as_path.components().count() > 1 {
            let candidate = root.join(as_path);
            return candidate.is_file().then_some(candidate);
        }

        let local = root.join("node_modules/.bin").join(program);
        if local.is_file() {
            return Some(local);
        }
        #[cfg(windows)]
        {
            let local_cmd = local.with_extension("cmd");
            if local_cmd.is_file() {
                return Some(local_cmd);
            }
        }

        which::which(program).ok()
    }

    /// Validate bundler configuration.
    ///
    /// # Checks
    /// - `command` must not be empty
    /// - `command[0]` must resolve (package runners only get a hint)
    pub fn validate(&self, root: &Path, diag: &mut ConfigDiagnostics) {
        let Some(cmd) = self.command.first() else {
            diag.empty(Self::FIELDS.command);
            return;
        };

        if self.log_level.trim().is_empty() {
            diag.empty(Self::FIELDS.log_level);
        }

        if self.resolve_program(root).is_some() {
            return;
        }

        if self.is_package_runner() {
            if let Some(package) = self.command.get(1) {
                diag.runner_notice(Self::FIELDS.command, cmd, package);
            }
        } else {
            diag.missing_program(Self::FIELDS.command, cmd);
        }
    }
}

//! Project configuration management for `figpack.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build/     # [build], [build.main], [build.ui]
//! │   ├── bundler    # [bundler]
//! │   └── watch      # [watch]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # PluginConfig (this file)
//! ```
//!
//! The config file is optional. Without one, the project root is the current
//! directory and every default applies, which matches the fixed layout of a
//! scaffolded plugin (`src/main.ts`, `src/ui.ts`, `ui.html`, `dist/`).

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    BuildSectionConfig, BundlerConfig, MainTargetConfig, ModuleFormat, PlaceholderPolicy,
    UiTargetConfig, WatchConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli},
    debug, log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config filename
pub const CONFIG_FILE: &str = "figpack.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing figpack.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Absolute path to the config file, which may not exist (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Entry points, outputs and embedding
    #[serde(default)]
    pub build: BuildSectionConfig,

    /// External bundler invocation
    #[serde(default)]
    pub bundler: BundlerConfig,

    /// Watch mode settings
    #[serde(default)]
    pub watch: WatchConfig,
}

impl PluginConfig {
    /// Load configuration for a build.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or the cwd when there is none.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cwd, &cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = path;
                config
            }
            None if cli.config != Path::new(CONFIG_FILE) => {
                return Err(ConfigError::NotFound(cli.config.clone()).into());
            }
            None => {
                debug!("config"; "no {} found, using defaults", cli.config.display());
                Self {
                    config_path: cwd.join(&cli.config),
                    ..Self::default()
                }
            }
        };

        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.finalize(&root, cli.build_args());
        config.validate()?;

        Ok(config)
    }

    /// Default configuration rooted at `root`, without validation.
    #[cfg(test)]
    pub fn with_root(root: &Path) -> Self {
        let mut config = Self {
            config_path: root.join(CONFIG_FILE),
            ..Self::default()
        };
        config.finalize(root, None);
        config
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Path relative to the project root, for display.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        crate::utils::path::relative_to(path.as_ref(), &self.root)
    }

    // ========================================================================
    // finalization
    // ========================================================================

    /// Normalize paths against `root` and apply CLI overrides.
    fn finalize(&mut self, root: &Path, args: Option<&BuildArgs>) {
        let root = crate::utils::path::normalize_path(root);

        self.build.normalize(&root);
        self.watch.normalize(&root);
        self.root = root;

        if let Some(args) = args {
            self.apply_build_args(args);
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.build.sourcemap, args.sourcemap.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.build.validate(&mut diag);
        self.bundler.validate(&self.root, &mut diag);
        self.watch.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> PluginConfig {
    let (parsed, ignored) = PluginConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

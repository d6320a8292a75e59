//! Plugin initialization module.
//!
//! Creates a new plugin project with default configuration.
//!
//! # Module Structure
//!
//! - [`validate`]: Scaffold conflict checks
//! - [`structure`]: Directory structure and source files
//! - [`config`]: figpack.toml, manifest.json and ignore files

mod config;
mod structure;
mod validate;

use crate::{config::PluginConfig, log};
use anyhow::Result;
use std::path::Path;

pub use validate::InitMode;

/// Options of `figpack init`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions {
    /// Skip the iframe UI
    pub no_ui: bool,
    /// Only print the config template
    pub dry_run: bool,
}

/// Create a new plugin project at `root`
///
/// # Steps
/// 1. Refuse to overwrite existing plugin files
/// 2. Create directory structure and sources
/// 3. Write configuration, manifest and ignore files
///
/// If `dry_run` is true, only prints the config template to stdout
pub fn new_project(root: &Path, mode: InitMode, options: InitOptions) -> Result<()> {
    if options.dry_run {
        print!("{}", config::generate_config_template());
        return Ok(());
    }

    let with_ui = !options.no_ui;
    validate::validate_target(root, mode, with_ui)?;

    let name = plugin_name(root);

    structure::create_structure(root)?;
    structure::write_sources(root, &name, with_ui)?;

    config::write_config(root)?;
    config::write_manifest(root, &name, with_ui)?;
    let defaults = PluginConfig::default();
    let output_dir = defaults
        .build
        .main
        .output
        .parent()
        .unwrap_or_else(|| Path::new("dist"));
    config::write_ignore_files(root, output_dir)?;

    log!("init"; "plugin `{}` created in {}", name, root.display());
    if mode == InitMode::NewDir {
        log!("init"; "next: cd {} && npm install --save-dev esbuild @figma/plugin-typings", root.display());
    } else {
        log!("init"; "next: npm install --save-dev esbuild @figma/plugin-typings");
    }
    Ok(())
}

/// Plugin name from the project directory.
fn plugin_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Figma Plugin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::testing::FakeBundler;
    use crate::bundle::{TargetSet, build_once};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_project_builds() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("shapes");

        new_project(&root, InitMode::NewDir, InitOptions::default()).unwrap();

        let files = [
            "src/main.ts",
            "src/ui.ts",
            "ui.html",
            "manifest.json",
            "figpack.toml",
            ".gitignore",
        ];
        for file in files {
            assert!(root.join(file).is_file(), "missing {file}");
        }

        // The scaffold is a valid project for the default config.
        let config = PluginConfig::with_root(&root);
        let mut diag = crate::config::ConfigDiagnostics::new();
        config.build.validate(&mut diag);
        assert!(diag.is_empty());
        let targets = TargetSet::resolve(&config).unwrap();
        assert!(targets.has_ui());
        build_once(&targets, &FakeBundler::default()).unwrap();
        assert!(fs::read_to_string(&config.build.ui.html).unwrap().contains("<script>"));
    }

    #[test]
    fn test_new_project_headless() {
        let temp = TempDir::new().unwrap();
        let options = InitOptions {
            no_ui: true,
            ..InitOptions::default()
        };

        new_project(temp.path(), InitMode::CurrentDir, options).unwrap();

        let config = PluginConfig::with_root(temp.path());
        assert!(!TargetSet::resolve(&config).unwrap().has_ui());
    }

    #[test]
    fn test_new_project_refuses_existing_plugin() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("manifest.json"), "{}").unwrap();

        assert!(new_project(temp.path(), InitMode::CurrentDir, InitOptions::default()).is_err());
        assert!(!temp.path().join("figpack.toml").exists());
        assert_eq!(fs::read_to_string(temp.path().join("manifest.json")).unwrap(), "{}");
    }

    #[test]
    fn test_new_project_beside_unrelated_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "# shapes").unwrap();

        new_project(temp.path(), InitMode::CurrentDir, InitOptions::default()).unwrap();
        assert!(temp.path().join("figpack.toml").is_file());
        assert_eq!(fs::read_to_string(temp.path().join("README.md")).unwrap(), "# shapes");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("dry");
        let options = InitOptions {
            dry_run: true,
            ..InitOptions::default()
        };

        new_project(&root, InitMode::NewDir, options).unwrap();
        assert!(!root.exists());
    }
}

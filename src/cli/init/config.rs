//! Configuration file generation.
//!
//! Creates figpack.toml, the Figma manifest and ignore files for new plugins.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::Path};

use crate::config::{CONFIG_FILE, PluginConfig};
use crate::embed::scaffold::{CONFIG_TOML, ConfigVars};

/// Figma plugin manifest filename
pub(super) const MANIFEST_FILE: &str = "manifest.json";

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore"];

/// Figma API version written to new manifests
const FIGMA_API: &str = "1.0.0";

/// Generate figpack.toml content with comments
pub fn generate_config_template() -> String {
    CONFIG_TOML.render(&ConfigVars {
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Write default figpack.toml configuration
pub fn write_config(root: &Path) -> Result<()> {
    let path = root.join(CONFIG_FILE);
    fs::write(&path, generate_config_template())
        .with_context(|| format!("Failed to write config file '{}'", path.display()))
}

/// `manifest.json` as read by Figma.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<'a> {
    name: &'a str,
    id: String,
    api: &'a str,
    main: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ui: Option<String>,
    editor_type: &'a [&'a str],
}

/// Write manifest.json pointing at the default build outputs.
pub fn write_manifest(root: &Path, name: &str, with_ui: bool) -> Result<()> {
    let defaults = PluginConfig::default();
    let manifest = Manifest {
        name,
        id: plugin_id(name),
        api: FIGMA_API,
        main: defaults.build.main.output.display().to_string(),
        ui: with_ui.then(|| defaults.build.ui.html.display().to_string()),
        editor_type: &["figma"],
    };

    let mut content = serde_json::to_string_pretty(&manifest)?;
    content.push('\n');

    let path = root.join(MANIFEST_FILE);
    fs::write(&path, content).with_context(|| format!("Failed to write '{}'", path.display()))
}

/// Development id derived from the plugin name. Figma assigns the real one
/// on publish.
fn plugin_id(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "figma-plugin".to_string()
    } else {
        slug.to_string()
    }
}

/// Write .gitignore with standard patterns
///
/// Patterns include:
/// - Output directory (`/dist/`)
/// - Installed packages (`/node_modules/`)
/// - OS-specific files (`.DS_Store`)
pub fn write_ignore_files(root: &Path, output_dir: &Path) -> Result<()> {
    let output_pattern = format!("/{}/", output_dir.display());
    let patterns = [
        output_pattern.as_str(),
        "/node_modules/",
        ".DS_Store",
    ];

    let mut content = patterns.join("\n");
    content.push('\n');

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        // Only create if doesn't exist (don't overwrite user's ignore files)
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}

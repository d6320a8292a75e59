//! Plugin source files.
//!
//! Writes the entry scripts and the HTML shell from the embedded templates.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::config::UiTargetConfig;
use crate::embed::scaffold::{MAIN_HEADLESS_TS, MAIN_TS, PluginVars, ShellVars, UI_HTML, UI_TS};

pub(super) const MAIN_SOURCE: &str = "src/main.ts";
pub(super) const UI_SOURCE: &str = "src/ui.ts";
pub(super) const SHELL_FILE: &str = "ui.html";

/// Create the project root and its `src` directory.
pub fn create_structure(root: &Path) -> Result<()> {
    let src = root.join("src");
    fs::create_dir_all(&src)
        .with_context(|| format!("Failed to create directory '{}'", src.display()))
}

/// Write `src/main.ts` and, unless headless, `src/ui.ts` and `ui.html`.
pub fn write_sources(root: &Path, name: &str, with_ui: bool) -> Result<()> {
    let vars = PluginVars { name };

    if with_ui {
        write(root, MAIN_SOURCE, &MAIN_TS.render(&vars))?;
        write(root, UI_SOURCE, &UI_TS.render(&vars))?;

        let placeholder = UiTargetConfig::default().placeholder;
        let shell = UI_HTML.render(&ShellVars {
            name,
            placeholder: &placeholder,
        });
        write(root, SHELL_FILE, &shell)?;
    } else {
        write(root, MAIN_SOURCE, &MAIN_HEADLESS_TS.render(&vars))?;
    }

    Ok(())
}

fn write(root: &Path, rel: &str, content: &str) -> Result<()> {
    let path = root.join(rel);
    fs::write(&path, content).with_context(|| format!("Failed to write '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_structure() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("my-plugin");

        create_structure(&root).unwrap();
        assert!(root.join("src").is_dir());
    }

    #[test]
    fn test_write_sources_with_ui() {
        let temp = TempDir::new().unwrap();
        create_structure(temp.path()).unwrap();
        write_sources(temp.path(), "Shapes", true).unwrap();

        let main = fs::read_to_string(temp.path().join("src/main.ts")).unwrap();
        assert!(main.contains("figma.showUI"));
        assert!(temp.path().join("src/ui.ts").is_file());

        let shell = fs::read_to_string(temp.path().join("ui.html")).unwrap();
        assert!(shell.contains("<!-- INJECT_JS -->"));
    }

    #[test]
    fn test_write_sources_headless() {
        let temp = TempDir::new().unwrap();
        create_structure(temp.path()).unwrap();
        write_sources(temp.path(), "Shapes", false).unwrap();

        let main = fs::read_to_string(temp.path().join("src/main.ts")).unwrap();
        assert!(!main.contains("showUI"));
        assert!(!temp.path().join("src/ui.ts").exists());
        assert!(!temp.path().join("ui.html").exists());
    }
}

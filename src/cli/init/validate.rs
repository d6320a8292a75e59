//! Scaffold conflict checks.
//!
//! `init` may run inside a directory that already holds unrelated files (a
//! README, a `.git`), but never over a file it would write itself.

use anyhow::{Result, bail};
use std::path::Path;

use super::config::MANIFEST_FILE;
use super::structure::{MAIN_SOURCE, SHELL_FILE, UI_SOURCE};
use crate::config::CONFIG_FILE;

/// Where `init` puts the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    /// `figpack init`: scaffold into the current directory
    CurrentDir,
    /// `figpack init <name>`: create `<name>`, which must not exist
    NewDir,
}

/// Files `init` writes unconditionally. `.gitignore` is left out: an
/// existing one is kept as is.
fn scaffold_files(with_ui: bool) -> Vec<&'static str> {
    let mut files = vec![CONFIG_FILE, MANIFEST_FILE, MAIN_SOURCE];
    if with_ui {
        files.extend([UI_SOURCE, SHELL_FILE]);
    }
    files
}

/// Refuse to scaffold where it would clobber an existing plugin.
pub fn validate_target(root: &Path, mode: InitMode, with_ui: bool) -> Result<()> {
    if mode == InitMode::NewDir && root.exists() {
        bail!(
            "'{}' already exists.\n\
             Run `figpack init` inside it, or pick another name.",
            root.display()
        );
    }

    let conflicts: Vec<&str> = scaffold_files(with_ui)
        .into_iter()
        .filter(|file| root.join(file).exists())
        .collect();

    if !conflicts.is_empty() {
        bail!(
            "'{}' already holds plugin files: {}.\n\
             Remove them or use `figpack init <name>` for a fresh directory.",
            root.display(),
            conflicts.join(", ")
        );
    }
    Ok(())
}

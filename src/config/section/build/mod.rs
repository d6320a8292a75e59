//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! target = "es2020"        # Bundler target tag
//! format = "iife"          # Output module format (iife, esm, cjs)
//! minify = false
//! sourcemap = false
//!
//! [build.main]
//! entry = "src/main.ts"
//! output = "dist/code.js"
//!
//! [build.ui]
//! entry = "src/ui.ts"      # Optional: built only if the file exists
//! output = "dist/ui.js"
//! shell = "ui.html"
//! html = "dist/ui.html"
//! placeholder = "<!-- INJECT_JS -->"
//! on_missing_placeholder = "error"
//! ```

mod ui;

pub use ui::{PlaceholderPolicy, UiTargetConfig};

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Build settings shared by both targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Bundler target tag (e.g. `es2020`).
    pub target: String,

    /// Output module format.
    pub format: ModuleFormat,

    /// Minify both bundles.
    pub minify: bool,

    /// Emit inline sourcemaps.
    pub sourcemap: bool,

    /// Sandbox-side target.
    pub main: MainTargetConfig,

    /// Iframe-side target and HTML embedding.
    pub ui: UiTargetConfig,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            target: "es2020".into(),
            format: ModuleFormat::default(),
            minify: false,
            sourcemap: false,
            main: MainTargetConfig::default(),
            ui: UiTargetConfig::default(),
        }
    }
}

pub struct BuildFields {
    pub target: FieldPath,
    pub main_entry: FieldPath,
    pub main_output: FieldPath,
}

impl BuildSectionConfig {
    pub const FIELDS: BuildFields = BuildFields {
        target: FieldPath::new("build.target"),
        main_entry: FieldPath::new("build.main.entry"),
        main_output: FieldPath::new("build.main.output"),
    };

    /// Resolve every relative path against the project root.
    pub fn normalize(&mut self, root: &Path) {
        self.main.entry = root.join(&self.main.entry);
        self.main.output = root.join(&self.main.output);
        self.ui.normalize(root);
    }

    /// Validate build configuration.
    ///
    /// # Checks
    /// - `target` and the main entry are non-empty
    /// - no output overwrites an entry, the shell or another output
    /// - the UI placeholder is non-empty
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.target.trim().is_empty() {
            diag.empty(Self::FIELDS.target);
        }

        if self.main.entry.as_os_str().is_empty() {
            diag.empty(Self::FIELDS.main_entry);
        }

        self.validate_paths(diag);
        self.ui.validate(diag);
    }

    /// Every file figpack writes must be distinct from every file it reads
    /// and from the other outputs.
    fn validate_paths(&self, diag: &mut ConfigDiagnostics) {
        let ui = UiTargetConfig::FIELDS;
        let reads: [(FieldPath, &Path); 3] = [
            (Self::FIELDS.main_entry, self.main.entry.as_path()),
            (ui.entry, self.ui.entry.as_path()),
            (ui.shell, self.ui.shell.as_path()),
        ];
        let writes: [(FieldPath, &Path); 3] = [
            (Self::FIELDS.main_output, self.main.output.as_path()),
            (ui.output, self.ui.output.as_path()),
            (ui.html, self.ui.html.as_path()),
        ];

        for (i, &(field, path)) in writes.iter().enumerate() {
            let clash = writes[..i]
                .iter()
                .chain(&reads)
                .find(|&&(_, other)| other == path);
            if let Some(&(other, _)) = clash {
                diag.clash(field, other);
            }
        }
    }
}

/// Sandbox-side target paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MainTargetConfig {
    /// Required entry point.
    pub entry: PathBuf,
    /// Bundle output.
    pub output: PathBuf,
}

impl Default for MainTargetConfig {
    fn default() -> Self {
        Self {
            entry: "src/main.ts".into(),
            output: "dist/code.js".into(),
        }
    }
}

/// Output module format passed to the bundler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// Immediately-invoked function expression (what the Figma sandbox expects).
    #[default]
    Iife,
    Esm,
    Cjs,
}

impl ModuleFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Iife => "iife",
            Self::Esm => "esm",
            Self::Cjs => "cjs",
        }
    }
}

impl fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

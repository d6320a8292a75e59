//! `[build.ui]`: iframe-side target and HTML shell embedding.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Iframe-side target. Built only when `entry` exists at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiTargetConfig {
    /// Optional entry point.
    pub entry: PathBuf,
    /// Bundle output.
    pub output: PathBuf,
    /// HTML shell holding the placeholder.
    pub shell: PathBuf,
    /// Embedded HTML output.
    pub html: PathBuf,
    /// Literal token replaced by the inline script.
    pub placeholder: String,
    /// What to do when the shell has no placeholder.
    pub on_missing_placeholder: PlaceholderPolicy,
}

impl Default for UiTargetConfig {
    fn default() -> Self {
        Self {
            entry: "src/ui.ts".into(),
            output: "dist/ui.js".into(),
            shell: "ui.html".into(),
            html: "dist/ui.html".into(),
            placeholder: "<!-- INJECT_JS -->".into(),
            on_missing_placeholder: PlaceholderPolicy::default(),
        }
    }
}

pub struct UiFields {
    pub entry: FieldPath,
    pub output: FieldPath,
    pub shell: FieldPath,
    pub html: FieldPath,
    pub placeholder: FieldPath,
}

impl UiTargetConfig {
    pub const FIELDS: UiFields = UiFields {
        entry: FieldPath::new("build.ui.entry"),
        output: FieldPath::new("build.ui.output"),
        shell: FieldPath::new("build.ui.shell"),
        html: FieldPath::new("build.ui.html"),
        placeholder: FieldPath::new("build.ui.placeholder"),
    };

    pub(super) fn normalize(&mut self, root: &Path) {
        self.entry = root.join(&self.entry);
        self.output = root.join(&self.output);
        self.shell = root.join(&self.shell);
        self.html = root.join(&self.html);
    }

    pub(super) fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.placeholder.is_empty() {
            diag.empty(Self::FIELDS.placeholder);
        }
    }
}

/// Behavior when the HTML shell lacks the placeholder token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderPolicy {
    /// Fail the embedding step (no HTML is written).
    #[default]
    Error,
    /// Copy the shell through unchanged and warn.
    Passthrough,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_ui_defaults() {
        let config = test_parse_config("");
        let ui = &config.build.ui;
        assert_eq!(ui.entry, PathBuf::from("src/ui.ts"));
        assert_eq!(ui.shell, PathBuf::from("ui.html"));
        assert_eq!(ui.placeholder, "<!-- INJECT_JS -->");
        assert_eq!(ui.on_missing_placeholder, PlaceholderPolicy::Error);
    }

    #[test]
    fn test_passthrough_policy() {
        let config = test_parse_config("[build.ui]\non_missing_placeholder = \"passthrough\"");
        assert_eq!(
            config.build.ui.on_missing_placeholder,
            PlaceholderPolicy::Passthrough
        );
    }

    #[test]
    fn test_validate_empty_placeholder() {
        let ui = UiTargetConfig {
            placeholder: String::new(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        ui.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, UiTargetConfig::FIELDS.placeholder);
    }
}

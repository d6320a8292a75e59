//! Dotted `figpack.toml` key paths.

use owo_colors::OwoColorize;
use std::fmt;

/// Key path of a config field, e.g. `build.ui.html`.
///
/// Sections declare theirs in a `FIELDS` table and diagnostics are keyed
/// by them, so reports can be grouped per `[section]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static str);

impl FieldPath {
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Top-level table the key lives in (`build` for `build.ui.html`).
    pub fn section(&self) -> &'static str {
        self.0.split_once('.').map_or(self.0, |(section, _)| section)
    }

    /// Key relative to its section (`ui.html` for `build.ui.html`).
    pub fn key(&self) -> &'static str {
        self.0.split_once('.').map_or(self.0, |(_, key)| key)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

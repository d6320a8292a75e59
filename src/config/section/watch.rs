//! `[watch]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [watch]
//! debounce_ms = 300            # Quiet period before a rebuild
//! extra_paths = ["shared"]     # More directories that feed the bundles
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Watch mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Quiet period after the last file event before rebuilding.
    pub debounce_ms: u64,
    /// Directories watched in addition to the entry and shell directories.
    pub extra_paths: Vec<PathBuf>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            extra_paths: Vec::new(),
        }
    }
}

pub struct WatchFields {
    pub debounce_ms: FieldPath,
}

impl WatchConfig {
    pub const FIELDS: WatchFields = WatchFields {
        debounce_ms: FieldPath::new("watch.debounce_ms"),
    };

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn normalize(&mut self, root: &Path) {
        self.extra_paths = self.extra_paths.iter().map(|p| root.join(p)).collect();
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.debounce_ms == 0 {
            diag.error(Self::FIELDS.debounce_ms, "must be greater than 0");
        }
    }
}

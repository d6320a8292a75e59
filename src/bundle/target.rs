//! Build target resolution.
//!
//! Resolution runs once at startup and produces an immutable [`TargetSet`].
//! The optional UI entry is probed exactly here. Nothing downstream looks at
//! the filesystem to decide which targets exist.

use super::{BuildError, EmbedSpec};
use crate::config::{ModuleFormat, PluginConfig};
use std::fmt;
use std::path::PathBuf;

/// Which side of the plugin a bundle runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// Sandbox-side script (`figma.*` API, no DOM).
    Main,
    /// Iframe-side script (DOM, `parent.postMessage`).
    Ui,
}

impl TargetKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Ui => "ui",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One bundling operation: entry in, single script out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    pub kind: TargetKind,
    pub entry: PathBuf,
    pub output: PathBuf,
    /// Bundler target tag (e.g. `es2020`).
    pub target: String,
    pub format: ModuleFormat,
}

/// The UI bundle plus the HTML it gets embedded into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiTarget {
    pub bundle: TargetDescriptor,
    pub embed: EmbedSpec,
}

/// Targets of one invocation: main always, UI when its entry exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSet {
    pub main: TargetDescriptor,
    pub ui: Option<UiTarget>,
    /// UI outputs to purge because the UI entry is absent.
    pub stale: Vec<PathBuf>,
}

impl TargetSet {
    /// Resolve targets from configuration.
    ///
    /// Fails fast with [`BuildError::MissingEntry`] when the main entry is
    /// missing, before any output is touched.
    pub fn resolve(config: &PluginConfig) -> Result<Self, BuildError> {
        let build = &config.build;

        if !build.main.entry.is_file() {
            return Err(BuildError::MissingEntry {
                path: build.main.entry.clone(),
            });
        }

        let main = TargetDescriptor {
            kind: TargetKind::Main,
            entry: build.main.entry.clone(),
            output: build.main.output.clone(),
            target: build.target.clone(),
            format: build.format,
        };

        let (ui, stale) = if build.ui.entry.is_file() {
            let ui = UiTarget {
                bundle: TargetDescriptor {
                    kind: TargetKind::Ui,
                    entry: build.ui.entry.clone(),
                    output: build.ui.output.clone(),
                    target: build.target.clone(),
                    format: build.format,
                },
                embed: EmbedSpec::from_config(&build.ui),
            };
            (Some(ui), Vec::new())
        } else {
            (None, vec![build.ui.output.clone(), build.ui.html.clone()])
        };

        Ok(Self { main, ui, stale })
    }

    /// All bundle descriptors, main first.
    pub fn descriptors(&self) -> impl Iterator<Item = &TargetDescriptor> {
        std::iter::once(&self.main).chain(self.ui.as_ref().map(|ui| &ui.bundle))
    }

    pub fn has_ui(&self) -> bool {
        self.ui.is_some()
    }

    /// Remove UI outputs left by an earlier run with a UI entry.
    pub fn purge_stale(&self) -> Result<(), BuildError> {
        for path in &self.stale {
            match std::fs::remove_file(path) {
                Ok(()) => crate::debug!("build"; "removed stale {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(BuildError::io(path)(e)),
            }
        }
        Ok(())
    }
}

//! Test fixtures: an in-process bundler and a scaffolded plugin project.

use super::{BuildError, Bundler, TargetDescriptor};
use crate::config::PluginConfig;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const MAIN_SRC: &str = "figma.showUI(__html__);\n";
pub const UI_SRC: &str = "document.body.dataset.ready = '1';\n";
pub const SHELL: &str = "<html>\n<body>\n<!-- INJECT_JS -->\n</body>\n</html>\n";

/// Deterministic bundler: wraps the entry in an IIFE.
///
/// An `import` line counts as an unresolved module and fails the build
/// without touching the output.
#[derive(Default)]
pub struct FakeBundler {
    /// Pause between the two halves of the output write.
    pub write_delay: Duration,
    calls: AtomicUsize,
}

impl FakeBundler {
    pub fn slow(write_delay: Duration) -> Self {
        Self {
            write_delay,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn render(source: &str) -> String {
        format!("(() => {{\n{source}}})();\n")
    }
}

impl Bundler for FakeBundler {
    fn bundle(&self, target: &TargetDescriptor) -> Result<(), BuildError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let source = fs::read_to_string(&target.entry).map_err(BuildError::io(&target.entry))?;
        if let Some(line) = source.lines().find(|l| l.trim_start().starts_with("import ")) {
            return Err(BuildError::Bundle {
                target: target.kind,
                detail: format!("✘ [ERROR] Could not resolve: {line}"),
            });
        }

        let output = Self::render(&source);
        if let Some(parent) = target.output.parent() {
            fs::create_dir_all(parent).map_err(BuildError::io(parent))?;
        }

        let (head, tail) = output.split_at(output.len() / 2);
        let mut file = fs::File::create(&target.output).map_err(BuildError::io(&target.output))?;
        file.write_all(head.as_bytes())
            .map_err(BuildError::io(&target.output))?;
        file.flush().map_err(BuildError::io(&target.output))?;
        if !self.write_delay.is_zero() {
            std::thread::sleep(self.write_delay);
        }
        file.write_all(tail.as_bytes())
            .map_err(BuildError::io(&target.output))?;
        Ok(())
    }
}

/// Write a plugin project under `root` and return its default config.
pub fn scaffold(root: &Path, with_ui: bool) -> PluginConfig {
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/main.ts"), MAIN_SRC).unwrap();
    if with_ui {
        fs::write(root.join("src/ui.ts"), UI_SRC).unwrap();
        fs::write(root.join("ui.html"), SHELL).unwrap();
    }
    PluginConfig::with_root(root)
}

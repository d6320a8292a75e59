use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use super::types::{Changes, RebuildPlan};
use crate::bundle::TargetSet;
use crate::config::PluginConfig;

/// Directories that never hold plugin sources.
const IGNORED_DIRS: &[&str] = &["node_modules", ".git"];

/// Decides which targets a batch of debounced changes rebuilds.
///
/// The bundler owns the dependency graph, so any relevant change rebuilds
/// every target. The shell only feeds the UI target.
pub(super) struct ChangeRouter {
    /// Shell of the UI target, when there is one.
    shell: Option<PathBuf>,
    has_ui: bool,
    /// Files figpack writes itself.
    outputs: Vec<PathBuf>,
    /// Output directories that hold no inputs.
    output_dirs: Vec<PathBuf>,
}

impl ChangeRouter {
    pub(super) fn new(targets: &TargetSet, config: &PluginConfig) -> Self {
        let root = config.get_root();
        let shell = targets.ui.as_ref().map(|ui| ui.embed.shell.clone());

        let mut outputs: Vec<PathBuf> = targets.descriptors().map(|t| t.output.clone()).collect();
        if let Some(ui) = &targets.ui {
            outputs.push(ui.embed.html.clone());
        }

        let inputs: Vec<&Path> = targets
            .descriptors()
            .map(|t| t.entry.as_path())
            .chain(shell.as_deref())
            .chain(config.watch.extra_paths.iter().map(PathBuf::as_path))
            .collect();

        let mut output_dirs: Vec<PathBuf> = Vec::new();
        for dir in outputs.iter().filter_map(|p| p.parent()) {
            let holds_inputs = inputs.iter().any(|input| input.starts_with(dir));
            if dir != root && !holds_inputs && !output_dirs.iter().any(|d| d == dir) {
                output_dirs.push(dir.to_path_buf());
            }
        }

        Self {
            shell,
            has_ui: targets.has_ui(),
            outputs,
            output_dirs,
        }
    }

    pub(super) fn route(&self, changes: &Changes) -> RebuildPlan {
        let mut plan = RebuildPlan::default();

        for (path, kind) in changes {
            let step = self.route_path(path);
            if !step.is_empty() {
                crate::debug!("watch"; "{}: {}", kind.label(), path.display());
            }
            plan.merge(step);
        }

        plan.ui &= self.has_ui;
        plan
    }

    fn route_path(&self, path: &Path) -> RebuildPlan {
        if self.is_ignored(path) {
            return RebuildPlan::default();
        }
        if self.shell.as_deref() == Some(path) {
            return RebuildPlan {
                main: false,
                ui: true,
            };
        }
        RebuildPlan::ALL
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.outputs.iter().any(|output| is_output_or_derived(path, output))
            || self.output_dirs.iter().any(|dir| path.starts_with(dir))
            || path.components().any(|c| match c {
                Component::Normal(name) => IGNORED_DIRS.iter().any(|d| name == *d),
                _ => false,
            })
    }
}

/// `path` is `output` itself or a sibling derived from it (`code.js.map`).
fn is_output_or_derived(path: &Path, output: &Path) -> bool {
    if path == output {
        return true;
    }
    let (Some(name), Some(base)) = (path.file_name(), output.file_name()) else {
        return false;
    };
    path.parent() == output.parent() && is_derived_name(name, base)
}

fn is_derived_name(name: &OsStr, base: &OsStr) -> bool {
    let (name, base) = (name.to_string_lossy(), base.to_string_lossy());
    name.strip_prefix(&*base).is_some_and(|rest| rest.starts_with('.'))
}

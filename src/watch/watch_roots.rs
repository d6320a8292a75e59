use std::path::PathBuf;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;

use crate::bundle::TargetSet;
use crate::config::PluginConfig;

/// Watch-root consistency manager.
///
/// Responsibility:
/// - Attach existing roots at startup
/// - Re-attach roots that were removed and recreated
pub(super) struct WatchRoots {
    desired: Vec<(PathBuf, RecursiveMode)>,
    attached: FxHashSet<PathBuf>,
}

impl WatchRoots {
    pub(super) fn new(desired: Vec<(PathBuf, RecursiveMode)>) -> Self {
        Self {
            desired,
            attached: FxHashSet::default(),
        }
    }

    /// Source directories recursively, the shell's directory shallowly.
    ///
    /// The shell usually sits at the project root next to `node_modules`,
    /// which must not be watched recursively.
    pub(super) fn for_targets(targets: &TargetSet, config: &PluginConfig) -> Self {
        let mut desired: Vec<(PathBuf, RecursiveMode)> = Vec::new();
        let mut push = |path: PathBuf, mode: RecursiveMode| {
            match desired.iter_mut().find(|(p, _)| *p == path) {
                Some((_, existing)) if mode == RecursiveMode::Recursive => *existing = mode,
                Some(_) => {}
                None => desired.push((path, mode)),
            }
        };

        for target in targets.descriptors() {
            if let Some(dir) = target.entry.parent() {
                push(dir.to_path_buf(), RecursiveMode::Recursive);
            }
        }
        if let Some(ui) = &targets.ui
            && let Some(dir) = ui.embed.shell.parent()
        {
            push(dir.to_path_buf(), RecursiveMode::NonRecursive);
        }
        for extra in &config.watch.extra_paths {
            push(extra.clone(), RecursiveMode::Recursive);
        }

        Self::new(desired)
    }

    pub(super) fn attach_existing(
        &mut self,
        watcher: &mut RecommendedWatcher,
    ) -> notify::Result<()> {
        for (path, mode) in &self.desired {
            if !path.exists() {
                continue;
            }
            watcher.watch(path, *mode)?;
            self.attached.insert(path.clone());
            crate::debug!("watch"; "watching {}", path.display());
        }

        Ok(())
    }

    pub(super) fn maintain(&mut self, watcher: &mut RecommendedWatcher) {
        // Drop stale handles for roots that no longer exist.
        self.attached.retain(|path| path.exists());

        for (path, mode) in &self.desired {
            if self.attached.contains(path) || !path.exists() {
                continue;
            }

            if watcher.watch(path, *mode).is_ok() {
                self.attached.insert(path.clone());
                crate::debug!("watch"; "re-attached watch: {}", path.display());
            }
        }
    }

    #[cfg(test)]
    pub(super) fn desired(&self) -> &[(PathBuf, RecursiveMode)] {
        &self.desired
    }
}

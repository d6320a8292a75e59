//! Watch mode.
//!
//! Keeps both bundle transforms alive and re-embeds after every UI rebuild.
//!
//! ```text
//! notify ──► fs loop (Debouncer → ChangeRouter) ──► Trigger ──► main worker
//!                                                        └──► ui worker ──UiBuilt──► embedder
//! ```
//!
//! The watcher is attached before the initial build, so edits made while
//! the first bundles run are not lost.

mod debouncer;
mod embedder;
mod router;
mod types;
mod watch_roots;
mod worker;


use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use crossbeam::channel::{self, Receiver, RecvTimeoutError};
use notify::RecommendedWatcher;

use crate::bundle::{Bundler, TargetKind, TargetSet};
use crate::config::PluginConfig;
use debouncer::Debouncer;
use embedder::Embedder;
use router::ChangeRouter;
use types::RebuildPlan;
use watch_roots::WatchRoots;
use worker::{TargetWorker, Triggers};

/// Counters shared by the workers and the embedder.
#[derive(Debug, Default)]
pub struct SessionStats {
    main_builds: AtomicU64,
    ui_builds: AtomicU64,
    embeds: AtomicU64,
    failures: AtomicU64,
}

impl SessionStats {
    /// Count a successful bundle and return its generation (1-based).
    fn record_build(&self, kind: TargetKind) -> u64 {
        let counter = match kind {
            TargetKind::Main => &self.main_builds,
            TargetKind::Ui => &self.ui_builds,
        };
        counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn record_embed(&self) {
        self.embeds.fetch_add(1, Ordering::SeqCst);
    }

    fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
impl SessionStats {
    pub fn main_builds(&self) -> u64 {
        self.main_builds.load(Ordering::SeqCst)
    }

    pub fn ui_builds(&self) -> u64 {
        self.ui_builds.load(Ordering::SeqCst)
    }

    pub fn embeds(&self) -> u64 {
        self.embeds.load(Ordering::SeqCst)
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::SeqCst)
    }
}

/// Workers and embedder of one session, without any filesystem watching.
struct Pipeline {
    triggers: Triggers,
    handles: Vec<JoinHandle<()>>,
}

impl Pipeline {
    fn spawn(
        targets: &TargetSet,
        bundler: &Arc<dyn Bundler>,
        stats: &Arc<SessionStats>,
        root: &Path,
    ) -> Result<Self> {
        let mut handles = Vec::new();

        let (main_worker, main) = TargetWorker::new(
            targets.main.clone(),
            Arc::clone(bundler),
            None,
            Arc::clone(stats),
            root.to_path_buf(),
        );
        handles.push(main_worker.spawn().context("failed to spawn main worker")?);

        let ui = match &targets.ui {
            Some(ui) => {
                let (built_tx, built_rx) = channel::unbounded();
                let embedder = Embedder::new(
                    ui.embed.clone(),
                    built_rx,
                    Arc::clone(stats),
                    root.to_path_buf(),
                );
                handles.push(embedder.spawn().context("failed to spawn embedder")?);

                let (ui_worker, trigger) = TargetWorker::new(
                    ui.bundle.clone(),
                    Arc::clone(bundler),
                    Some(built_tx),
                    Arc::clone(stats),
                    root.to_path_buf(),
                );
                handles.push(ui_worker.spawn().context("failed to spawn ui worker")?);
                Some(trigger)
            }
            None => None,
        };

        Ok(Self {
            triggers: Triggers { main, ui },
            handles,
        })
    }
}

/// A running watch session.
///
/// Starting a session never blocks. [`WatchSession::wait`] parks the caller
/// until the session ends, which in practice is Ctrl+C.
pub struct WatchSession {
    handles: Vec<JoinHandle<()>>,
    stats: Arc<SessionStats>,
}

impl WatchSession {
    pub fn start(
        config: &PluginConfig,
        targets: &TargetSet,
        bundler: Arc<dyn Bundler>,
    ) -> Result<Self> {
        let root = config.get_root();
        targets.purge_stale()?;

        let stats = Arc::new(SessionStats::default());
        let Pipeline {
            triggers,
            mut handles,
        } = Pipeline::spawn(targets, &bundler, &stats, root)?;

        // Watcher first: events buffer while the initial build runs.
        let (notify_tx, notify_rx) = channel::unbounded();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })
        .context("failed to create file watcher")?;

        let mut roots = WatchRoots::for_targets(targets, config);
        roots
            .attach_existing(&mut watcher)
            .context("failed to watch source directories")?;

        triggers.fire(RebuildPlan::ALL);

        let fs_loop = FsLoop {
            notify_rx,
            watcher,
            roots,
            debouncer: Debouncer::new(config.watch.debounce()),
            router: ChangeRouter::new(targets, config),
            triggers,
        };
        handles.push(
            thread::Builder::new()
                .name("figpack-watch".into())
                .spawn(move || fs_loop.run())
                .context("failed to spawn watcher thread")?,
        );

        crate::log!("watch"; "watching for changes, press Ctrl+C to stop");
        Ok(Self { handles, stats })
    }

    #[cfg(test)]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Park until every session thread has exited.
    pub fn wait(self) {
        for handle in self.handles {
            if handle.join().is_err() {
                crate::log!("error"; "a watch thread panicked");
            }
        }
    }
}

/// Filesystem event loop: debounce, route, trigger.
struct FsLoop {
    notify_rx: Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    roots: WatchRoots,
    debouncer: Debouncer,
    router: ChangeRouter,
    triggers: Triggers,
}

impl FsLoop {
    fn run(mut self) {
        loop {
            match self.notify_rx.recv_timeout(self.debouncer.sleep_duration()) {
                Ok(Ok(event)) => self.debouncer.add_event(&event),
                Ok(Err(e)) => crate::log!("watch"; "notify error: {}", e),
                Err(RecvTimeoutError::Timeout) => self.flush(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn flush(&mut self) {
        // Ensure watcher roots remain attached.
        self.roots.maintain(&mut self.watcher);

        let Some(changes) = self.debouncer.take_if_ready() else {
            return;
        };
        let plan = self.router.route(&changes);
        if !plan.is_empty() {
            self.triggers.fire(plan);
        }
    }
}

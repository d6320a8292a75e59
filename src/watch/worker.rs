//! Long-lived per-target rebuild workers.
//!
//! Each target owns a thread blocked on its trigger channel. The channel
//! holds at most one pending trigger, so triggers that arrive during a
//! rebuild coalesce into a single follow-up rebuild.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, Sender, TrySendError};

use super::SessionStats;
use super::types::RebuildPlan;
use crate::bundle::{Bundler, TargetDescriptor, TargetKind};
use crate::logger::{status_error, status_success};
use crate::utils::path::relative_to;

/// A finished UI bundle, handed to the embedder.
///
/// The worker blocks until `done` is signalled, so the bundle on disk stays
/// stable while the embedder reads it.
pub(super) struct UiBuilt {
    pub(super) generation: u64,
    pub(super) elapsed: Duration,
    pub(super) done: Sender<()>,
}

/// Rebuild request handle for one worker.
#[derive(Clone)]
pub(super) struct Trigger {
    kind: TargetKind,
    tx: Sender<()>,
}

impl Trigger {
    fn new(kind: TargetKind) -> (Self, Receiver<()>) {
        let (tx, rx) = channel::bounded(1);
        (Self { kind, tx }, rx)
    }

    pub(super) fn fire(&self) {
        match self.tx.try_send(()) {
            Ok(()) => {}
            Err(TrySendError::Full(())) => {
                crate::debug!("watch"; "{} rebuild already pending", self.kind);
            }
            Err(TrySendError::Disconnected(())) => {
                crate::debug!("watch"; "{} worker stopped", self.kind);
            }
        }
    }
}

/// Triggers of every resolved target.
#[derive(Clone)]
pub(super) struct Triggers {
    pub(super) main: Trigger,
    pub(super) ui: Option<Trigger>,
}

impl Triggers {
    pub(super) fn fire(&self, plan: RebuildPlan) {
        if plan.main {
            self.main.fire();
        }
        if plan.ui
            && let Some(ui) = &self.ui
        {
            ui.fire();
        }
    }
}

pub(super) struct TargetWorker {
    target: TargetDescriptor,
    bundler: Arc<dyn Bundler>,
    triggers: Receiver<()>,
    /// Subscription of the embedder (UI target only).
    built: Option<Sender<UiBuilt>>,
    stats: Arc<SessionStats>,
    root: PathBuf,
}

impl TargetWorker {
    pub(super) fn new(
        target: TargetDescriptor,
        bundler: Arc<dyn Bundler>,
        built: Option<Sender<UiBuilt>>,
        stats: Arc<SessionStats>,
        root: PathBuf,
    ) -> (Self, Trigger) {
        let (trigger, triggers) = Trigger::new(target.kind);
        let worker = Self {
            target,
            bundler,
            triggers,
            built,
            stats,
            root,
        };
        (worker, trigger)
    }

    pub(super) fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name(format!("figpack-{}", self.target.kind))
            .spawn(move || self.run())
    }

    fn run(self) {
        while self.triggers.recv().is_ok() {
            if !self.rebuild() {
                break;
            }
        }
        crate::debug!("watch"; "{} worker exited", self.target.kind);
    }

    /// Rebuild once. Returns `false` when the embedder has gone away.
    fn rebuild(&self) -> bool {
        let kind = self.target.kind;
        let start = Instant::now();

        if let Err(e) = self.bundler.bundle(&self.target) {
            self.stats.record_failure();
            status_error(&e.summary(), &e.detail());
            return true;
        }

        let generation = self.stats.record_build(kind);
        let elapsed = start.elapsed();

        let Some(built) = &self.built else {
            let output = relative_to(&self.target.output, &self.root);
            status_success(&format!(
                "{kind} built → {} ({}ms)",
                output.display(),
                elapsed.as_millis()
            ));
            return true;
        };

        let (done, wait) = channel::bounded(1);
        let notice = UiBuilt {
            generation,
            elapsed,
            done,
        };
        built.send(notice).is_ok() && wait.recv().is_ok()
    }
}

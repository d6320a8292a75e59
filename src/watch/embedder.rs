use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::Receiver;

use super::SessionStats;
use super::worker::UiBuilt;
use crate::bundle::{EmbedOutcome, EmbedSpec};
use crate::logger::{status_error, status_success, status_warning};
use crate::utils::path::relative_to;

/// Sole consumer of UI rebuild notifications.
///
/// Every notification produces exactly one embedding step.
pub(super) struct Embedder {
    spec: EmbedSpec,
    built: Receiver<UiBuilt>,
    stats: Arc<SessionStats>,
    root: PathBuf,
}

impl Embedder {
    pub(super) fn new(
        spec: EmbedSpec,
        built: Receiver<UiBuilt>,
        stats: Arc<SessionStats>,
        root: PathBuf,
    ) -> Self {
        Self {
            spec,
            built,
            stats,
            root,
        }
    }

    pub(super) fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("figpack-embed".into())
            .spawn(move || self.run())
    }

    fn run(self) {
        for notice in &self.built {
            self.embed(&notice);
            // Releases the UI worker for its next rebuild.
            let _ = notice.done.send(());
        }
        crate::debug!("watch"; "embedder exited");
    }

    fn embed(&self, notice: &UiBuilt) {
        crate::debug!("watch"; "embedding ui build #{}", notice.generation);

        match self.spec.embed() {
            Ok(outcome) => {
                self.stats.record_embed();
                let html = relative_to(&self.spec.html, &self.root);
                let message = format!(
                    "ui built → {} ({}ms)",
                    html.display(),
                    notice.elapsed.as_millis()
                );
                match outcome {
                    EmbedOutcome::Injected => status_success(&message),
                    EmbedOutcome::PassedThrough => {
                        status_warning(&format!("{message}, shell copied without script"));
                    }
                }
            }
            Err(e) => {
                self.stats.record_failure();
                status_error(&e.summary(), &e.detail());
            }
        }
    }
}

//! Build orchestration for the two plugin targets.
//!
//! ```text
//! TargetSet::resolve ──► main ─────────────► dist/code.js
//!                    └─► ui ──► dist/ui.js ──► embed ──► dist/ui.html
//! ```
//!
//! The main and UI bundles have no ordering dependency and run in parallel.
//! Embedding runs strictly after the UI bundle is written.

mod bundler;
mod error;
mod inject;
mod target;

#[cfg(test)]
pub mod testing;

pub use bundler::{Bundler, EsbuildBundler};
pub use error::BuildError;
pub use inject::{EmbedOutcome, EmbedSpec};
pub use target::{TargetDescriptor, TargetKind, TargetSet, UiTarget};

use std::path::PathBuf;
use std::time::{Duration, Instant};

/// What a one-shot build produced.
#[derive(Debug)]
pub struct BuildReport {
    pub main: PathBuf,
    /// Embedded HTML and how it was produced, when the UI target exists.
    pub ui: Option<(PathBuf, EmbedOutcome)>,
    pub elapsed: Duration,
}

/// Bundle every target once, then embed the UI bundle.
///
/// Returns the first failure. Main's error wins when both targets fail.
pub fn build_once(targets: &TargetSet, bundler: &dyn Bundler) -> Result<BuildReport, BuildError> {
    let start = Instant::now();
    targets.purge_stale()?;

    let (main, ui) = rayon::join(
        || bundler.bundle(&targets.main),
        || targets.ui.as_ref().map(|ui| build_ui(ui, bundler)).transpose(),
    );
    main?;
    let ui = ui?;

    Ok(BuildReport {
        main: targets.main.output.clone(),
        ui,
        elapsed: start.elapsed(),
    })
}

/// Bundle the UI target and embed it. Embedding is skipped on failure.
fn build_ui(ui: &UiTarget, bundler: &dyn Bundler) -> Result<(PathBuf, EmbedOutcome), BuildError> {
    bundler.bundle(&ui.bundle)?;
    let outcome = ui.embed.embed()?;
    Ok((ui.embed.html.clone(), outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlaceholderPolicy;
    use std::fs;
    use tempfile::TempDir;
    use testing::{FakeBundler, MAIN_SRC, UI_SRC, scaffold};

    #[test]
    fn test_build_main_and_ui() {
        let temp = TempDir::new().unwrap();
        let config = scaffold(temp.path(), true);
        let targets = TargetSet::resolve(&config).unwrap();
        let bundler = FakeBundler::default();

        let report = build_once(&targets, &bundler).unwrap();
        assert_eq!(bundler.calls(), 2);
        assert_eq!(report.main, config.build.main.output);
        assert_eq!(
            report.ui,
            Some((config.build.ui.html.clone(), EmbedOutcome::Injected))
        );

        assert_eq!(
            fs::read_to_string(&config.build.main.output).unwrap(),
            FakeBundler::render(MAIN_SRC)
        );
        let html = fs::read_to_string(&config.build.ui.html).unwrap();
        let script = format!("<script>{}</script>", FakeBundler::render(UI_SRC));
        assert_eq!(
            html,
            format!("<html>\n<body>\n{script}\n</body>\n</html>\n")
        );
    }

    #[test]
    fn test_build_without_ui_target() {
        let temp = TempDir::new().unwrap();
        let config = scaffold(temp.path(), false);
        let targets = TargetSet::resolve(&config).unwrap();
        let bundler = FakeBundler::default();

        let report = build_once(&targets, &bundler).unwrap();
        assert_eq!(bundler.calls(), 1);
        assert!(report.ui.is_none());
        assert!(config.build.main.output.exists());
        assert!(!config.build.ui.output.exists());
        assert!(!config.build.ui.html.exists());
    }

    #[test]
    fn test_stale_ui_outputs_removed() {
        let temp = TempDir::new().unwrap();
        let config = scaffold(temp.path(), true);
        build_once(&TargetSet::resolve(&config).unwrap(), &FakeBundler::default()).unwrap();
        assert!(config.build.ui.html.exists());

        fs::remove_file(&config.build.ui.entry).unwrap();
        build_once(&TargetSet::resolve(&config).unwrap(), &FakeBundler::default()).unwrap();
        assert!(!config.build.ui.output.exists());
        assert!(!config.build.ui.html.exists());
    }

    #[test]
    fn test_build_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let config = scaffold(temp.path(), true);
        let targets = TargetSet::resolve(&config).unwrap();
        let outputs = [
            &config.build.main.output,
            &config.build.ui.output,
            &config.build.ui.html,
        ];

        build_once(&targets, &FakeBundler::default()).unwrap();
        let first: Vec<Vec<u8>> = outputs.iter().map(|p| fs::read(p).unwrap()).collect();
        build_once(&targets, &FakeBundler::default()).unwrap();
        let second: Vec<Vec<u8>> = outputs.iter().map(|p| fs::read(p).unwrap()).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_ui_failure_keeps_previous_outputs() {
        let temp = TempDir::new().unwrap();
        let config = scaffold(temp.path(), true);
        let targets = TargetSet::resolve(&config).unwrap();
        build_once(&targets, &FakeBundler::default()).unwrap();
        let old_bundle = fs::read(&config.build.ui.output).unwrap();
        let old_html = fs::read(&config.build.ui.html).unwrap();

        fs::write(&config.build.ui.entry, "import './missing';\n").unwrap();
        let err = build_once(&targets, &FakeBundler::default()).unwrap_err();

        assert!(matches!(
            err,
            BuildError::Bundle {
                target: TargetKind::Ui,
                ..
            }
        ));
        assert_eq!(fs::read(&config.build.ui.output).unwrap(), old_bundle);
        assert_eq!(fs::read(&config.build.ui.html).unwrap(), old_html);
    }

    #[test]
    fn test_main_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let config = scaffold(temp.path(), false);
        fs::write(&config.build.main.entry, "import { x } from 'nowhere';\n").unwrap();

        let err = build_once(&TargetSet::resolve(&config).unwrap(), &FakeBundler::default())
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::Bundle {
                target: TargetKind::Main,
                ..
            }
        ));
        assert!(!config.build.main.output.exists());
    }

    #[test]
    fn test_missing_placeholder_fails_build() {
        let temp = TempDir::new().unwrap();
        let config = scaffold(temp.path(), true);
        fs::write(&config.build.ui.shell, "<html></html>").unwrap();

        let err = build_once(&TargetSet::resolve(&config).unwrap(), &FakeBundler::default())
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingPlaceholder { .. }));
        assert!(!config.build.ui.html.exists());
    }

    #[test]
    fn test_missing_placeholder_passthrough() {
        let temp = TempDir::new().unwrap();
        let mut config = scaffold(temp.path(), true);
        config.build.ui.on_missing_placeholder = PlaceholderPolicy::Passthrough;
        fs::write(&config.build.ui.shell, "<html></html>").unwrap();

        let report =
            build_once(&TargetSet::resolve(&config).unwrap(), &FakeBundler::default()).unwrap();
        assert_eq!(report.ui.map(|(_, o)| o), Some(EmbedOutcome::PassedThrough));
        assert_eq!(
            fs::read_to_string(&config.build.ui.html).unwrap(),
            "<html></html>"
        );
    }
}

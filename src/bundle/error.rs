//! Build error types.

use super::TargetKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving, bundling or embedding.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("required entry point `{}` not found", path.display())]
    MissingEntry { path: PathBuf },

    #[error("failed to bundle {target} target\n{detail}")]
    Bundle { target: TargetKind, detail: String },

    #[error("failed to start bundler `{program}`")]
    BundlerSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("placeholder `{placeholder}` not found in shell `{}`", shell.display())]
    MissingPlaceholder { shell: PathBuf, placeholder: String },

    #[error("IO error on `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    /// One-line summary for the watch status block.
    pub fn summary(&self) -> String {
        match self {
            Self::Bundle { target, .. } => format!("{target} bundle failed"),
            other => other.to_string(),
        }
    }

    /// Multi-line detail for the watch status block.
    pub fn detail(&self) -> String {
        match self {
            Self::Bundle { detail, .. } => detail.clone(),
            Self::BundlerSpawn { source, .. } | Self::Io { source, .. } => source.to_string(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_error_display() {
        let err = BuildError::Bundle {
            target: TargetKind::Ui,
            detail: "✘ [ERROR] Could not resolve \"./missing\"".into(),
        };
        let display = err.to_string();
        assert!(display.starts_with("failed to bundle ui target"));
        assert!(display.contains("Could not resolve"));
        assert_eq!(err.summary(), "ui bundle failed");
    }

    #[test]
    fn test_io_helper_keeps_path() {
        let err = BuildError::io("dist/ui.js")(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.to_string().contains("dist/ui.js"));
        assert_eq!(err.detail(), "gone");
    }
}

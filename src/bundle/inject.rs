//! Inline the UI bundle into the HTML shell.
//!
//! A single literal substitution: the first occurrence of the placeholder is
//! replaced by `<script>` + bundle + `</script>`. The bundle is inserted
//! verbatim. Nothing is escaped and no `$` patterns are expanded.

use super::BuildError;
use crate::config::{PlaceholderPolicy, UiTargetConfig};
use std::fs;
use std::path::PathBuf;

const SCRIPT_OPEN: &str = "<script>";
const SCRIPT_CLOSE: &str = "</script>";

/// Everything the embedding step reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedSpec {
    /// HTML shell holding the placeholder (read only).
    pub shell: PathBuf,
    /// UI bundle output.
    pub bundle: PathBuf,
    /// Embedded HTML output.
    pub html: PathBuf,
    pub placeholder: String,
    pub policy: PlaceholderPolicy,
}

/// How the embedded HTML was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedOutcome {
    Injected,
    /// Shell had no placeholder and was copied through.
    PassedThrough,
}

impl EmbedSpec {
    pub fn from_config(ui: &UiTargetConfig) -> Self {
        Self {
            shell: ui.shell.clone(),
            bundle: ui.output.clone(),
            html: ui.html.clone(),
            placeholder: ui.placeholder.clone(),
            policy: ui.on_missing_placeholder,
        }
    }

    /// Read shell and bundle, write the embedded HTML.
    ///
    /// Must only run after the UI bundle is fully written.
    pub fn embed(&self) -> Result<EmbedOutcome, BuildError> {
        let bundle = fs::read_to_string(&self.bundle).map_err(BuildError::io(&self.bundle))?;
        let shell = fs::read_to_string(&self.shell).map_err(BuildError::io(&self.shell))?;

        let (html, outcome) = match inject_script(&shell, &self.placeholder, &bundle) {
            Some(html) => (html, EmbedOutcome::Injected),
            None => match self.policy {
                PlaceholderPolicy::Error => {
                    return Err(BuildError::MissingPlaceholder {
                        shell: self.shell.clone(),
                        placeholder: self.placeholder.clone(),
                    });
                }
                PlaceholderPolicy::Passthrough => {
                    crate::log!("warning"; "placeholder `{}` not found in {}, copying shell unchanged",
                        self.placeholder, self.shell.display());
                    (shell, EmbedOutcome::PassedThrough)
                }
            },
        };

        if let Some(parent) = self.html.parent() {
            fs::create_dir_all(parent).map_err(BuildError::io(parent))?;
        }
        fs::write(&self.html, html).map_err(BuildError::io(&self.html))?;

        Ok(outcome)
    }
}

/// Replace the first `placeholder` in `shell` with an inline script block.
///
/// Returns `None` when the placeholder does not occur.
pub fn inject_script(shell: &str, placeholder: &str, bundle: &str) -> Option<String> {
    let at = shell.find(placeholder)?;
    let rest = &shell[at + placeholder.len()..];

    let mut html = String::with_capacity(
        shell.len() - placeholder.len() + SCRIPT_OPEN.len() + bundle.len() + SCRIPT_CLOSE.len(),
    );
    html.push_str(&shell[..at]);
    html.push_str(SCRIPT_OPEN);
    html.push_str(bundle);
    html.push_str(SCRIPT_CLOSE);
    html.push_str(rest);
    Some(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TOKEN: &str = "<!-- INJECT_JS -->";

    #[test]
    fn test_inject_replaces_placeholder() {
        let shell = "<body>\n<button id=\"create\">Create</button>\n<!-- INJECT_JS -->\n</body>";
        let html = inject_script(shell, TOKEN, "run();").unwrap();
        assert_eq!(
            html,
            "<body>\n<button id=\"create\">Create</button>\n<script>run();</script>\n</body>"
        );
    }

    #[test]
    fn test_inject_only_first_occurrence() {
        let shell = "a<!-- INJECT_JS -->b<!-- INJECT_JS -->c";
        let html = inject_script(shell, TOKEN, "x").unwrap();
        assert_eq!(html, "a<script>x</script>b<!-- INJECT_JS -->c");
    }

    #[test]
    fn test_inject_bundle_verbatim() {
        // Content that a regex-style replacement or an HTML escaper would alter.
        let bundle = "var s = \"</script>\"; var d = \"$& $' $` $1 $$\";\n\u{1F600}";
        let html = inject_script(TOKEN, TOKEN, bundle).unwrap();
        assert_eq!(html, format!("<script>{bundle}</script>"));
    }

    #[test]
    fn test_inject_missing_placeholder() {
        assert!(inject_script("<body></body>", TOKEN, "x").is_none());
    }

    #[test]
    fn test_inject_empty_bundle() {
        let html = inject_script("<p><!-- INJECT_JS --></p>", TOKEN, "").unwrap();
        assert_eq!(html, "<p><script></script></p>");
    }

    fn spec(temp: &TempDir, policy: PlaceholderPolicy) -> EmbedSpec {
        EmbedSpec {
            shell: temp.path().join("ui.html"),
            bundle: temp.path().join("dist/ui.js"),
            html: temp.path().join("dist/ui.html"),
            placeholder: TOKEN.into(),
            policy,
        }
    }

    fn write_inputs(spec: &EmbedSpec, shell: &str, bundle: &str) {
        fs::create_dir_all(spec.bundle.parent().unwrap()).unwrap();
        fs::write(&spec.shell, shell).unwrap();
        fs::write(&spec.bundle, bundle).unwrap();
    }

    #[test]
    fn test_embed_writes_html() {
        let temp = TempDir::new().unwrap();
        let spec = spec(&temp, PlaceholderPolicy::Error);
        write_inputs(&spec, "<html><!-- INJECT_JS --></html>", "go()");

        assert_eq!(spec.embed().unwrap(), EmbedOutcome::Injected);
        assert_eq!(
            fs::read_to_string(&spec.html).unwrap(),
            "<html><script>go()</script></html>"
        );
        // The shell is never modified.
        assert_eq!(
            fs::read_to_string(&spec.shell).unwrap(),
            "<html><!-- INJECT_JS --></html>"
        );
    }

    #[test]
    fn test_embed_missing_placeholder_errors() {
        let temp = TempDir::new().unwrap();
        let spec = spec(&temp, PlaceholderPolicy::Error);
        write_inputs(&spec, "<html></html>", "go()");

        let err = spec.embed().unwrap_err();
        assert!(matches!(err, BuildError::MissingPlaceholder { .. }));
        assert!(!spec.html.exists());
    }

    #[test]
    fn test_embed_missing_placeholder_passthrough() {
        let temp = TempDir::new().unwrap();
        let spec = spec(&temp, PlaceholderPolicy::Passthrough);
        write_inputs(&spec, "<html></html>", "go()");

        assert_eq!(spec.embed().unwrap(), EmbedOutcome::PassedThrough);
        assert_eq!(fs::read_to_string(&spec.html).unwrap(), "<html></html>");
    }

    #[test]
    fn test_embed_missing_shell_is_io_error() {
        let temp = TempDir::new().unwrap();
        let spec = spec(&temp, PlaceholderPolicy::Error);
        fs::create_dir_all(spec.bundle.parent().unwrap()).unwrap();
        fs::write(&spec.bundle, "go()").unwrap();

        match spec.embed().unwrap_err() {
            BuildError::Io { path, .. } => assert_eq!(path, spec.shell),
            other => panic!("unexpected error: {other}"),
        }
    }
}

//! Config loading errors and validation diagnostics.
//!
//! Validation never stops at the first problem: every section reports into
//! one [`ConfigDiagnostics`], which renders grouped by `[section]`.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid figpack.toml")]
    Toml(#[from] toml::de::Error),

    #[error("config file `{0}` not found")]
    NotFound(PathBuf),

    // No #[from]: the rendered list is the whole message.
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// One problem with one config key.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<String>,
}

/// Validation problems collected across all sections.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(field, message.into(), None);
    }

    /// A required value is blank.
    pub fn empty(&mut self, field: FieldPath) {
        self.push(field, "must not be empty".into(), None);
    }

    /// A file figpack writes (`output`) resolves to the same path as `other`,
    /// which is either an input or another output.
    pub fn clash(&mut self, output: FieldPath, other: FieldPath) {
        self.push(
            output,
            format!("would overwrite {other}"),
            Some(format!("give {output} a path of its own")),
        );
    }

    /// The bundler executable is neither local nor on `PATH`.
    pub fn missing_program(&mut self, field: FieldPath, program: &str) {
        self.push(
            field,
            format!("`{program}` not found"),
            Some(format!("run `npm install --save-dev {program}` or update {field}")),
        );
    }

    /// A package runner (`npx`, `bunx`, ...) resolves the package itself, so
    /// its absence is only worth a notice.
    pub fn runner_notice(&self, field: FieldPath, runner: &str, package: &str) {
        crate::log!(
            "hint";
            "[{}] `{}` runs via `{}`, make sure it is installed",
            field.as_str(),
            package,
            runner
        );
    }

    fn push(&mut self, field: FieldPath, message: String, hint: Option<String>) {
        self.errors.push(ConfigDiagnostic {
            field,
            message,
            hint,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[cfg(test)]
    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Sections in the order their first problem was reported.
    fn sections(&self) -> Vec<&'static str> {
        let mut sections: Vec<&'static str> = Vec::new();
        for err in &self.errors {
            let section = err.field.section();
            if !sections.contains(&section) {
                sections.push(section);
            }
        }
        sections
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "figpack.toml has problems:".red().bold())?;

        for section in self.sections() {
            write!(f, "\n\n{}", format_args!("[{section}]").bold())?;
            for err in self.errors.iter().filter(|e| e.field.section() == section) {
                write!(f, "\n  {} {} {}", err.field.key().cyan(), "→".red(), err.message)?;
                if let Some(hint) = &err.hint {
                    write!(f, "\n    {} {}", "hint:".yellow(), hint)?;
                }
            }
        }

        if self.errors.len() > 1 {
            let count = self.errors.len().to_string();
            write!(f, "\n\n{} {}", count.red().bold(), "problems".dimmed())?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

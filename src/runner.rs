//! Translation runner
//!
//! Reads a Selenium IDE file, runs it through the engine and assembles the
//! output document: the CasperJS script (header, fragments, footer)
//! followed by the diagnostics block. When any row produced an error, or in
//! lint mode, only the diagnostics block is written.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde_json::json;

use crate::engine::{Engine, RunResult};
use crate::error::{ErrorKind, TranslateError};
use crate::templates::{TemplateStore, FOOTER_TEMPLATE, HEADER_TEMPLATE, MESSAGING_TEMPLATE};

/// Header timestamp, in the shape of a JavaScript `Date` string.
const DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Configuration for a translation run
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Selenium IDE HTML file to translate
    pub input: PathBuf,
    /// Template directory replacing the embedded templates
    pub templates: Option<PathBuf>,
    /// Only report diagnostics, never the script
    pub lint: bool,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }

    pub fn templates(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates = Some(dir.into());
        self
    }

    pub fn lint(mut self, lint: bool) -> Self {
        self.lint = lint;
        self
    }
}

/// Result of translating one file
#[derive(Debug, Clone)]
pub struct Translation {
    /// Source file name as given
    pub file_name: String,
    /// Folded per-row outcomes
    pub result: RunResult,
    /// Whether the script was written (no errors, not lint mode)
    pub emitted: bool,
    /// The complete output document
    pub output: String,
}

impl Translation {
    pub fn warning_count(&self) -> usize {
        self.result.warning_count()
    }

    pub fn error_count(&self) -> usize {
        self.result.error_count()
    }

    /// Format a summary line
    pub fn summary(&self) -> String {
        format!(
            "{}: {} assertion(s), {} warning(s), {} error(s)",
            self.file_name,
            self.result.assertions,
            self.warning_count(),
            self.error_count(),
        )
    }
}

/// Test name shown in the header: the file's base name up to the first `.`.
pub fn test_name(file_name: &str) -> &str {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    base.split('.').next().unwrap_or(base)
}

/// The translator
pub struct Translator {
    engine: Engine,
    lint: bool,
}

impl Translator {
    /// Create a translator over `engine`
    pub fn new(engine: Engine) -> Self {
        Self { engine, lint: false }
    }

    /// Build the engine described by `config`.
    pub fn from_config(config: &RunConfig) -> Result<Self, TranslateError> {
        let store = match &config.templates {
            Some(dir) => TemplateStore::from_dir(dir)?,
            None => TemplateStore::embedded()?,
        };
        Ok(Self::new(Engine::with_templates(store)).lint(config.lint))
    }

    pub fn lint(mut self, lint: bool) -> Self {
        self.lint = lint;
        self
    }

    /// Get the engine (for listing commands)
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Get mutable reference to the engine (for registering custom commands)
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Read and translate `path`, stamping the header with `now`.
    pub fn translate_file(&self, path: &Path, now: DateTime<Local>) -> Result<Translation, TranslateError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            TranslateError::new(ErrorKind::Io, format!("{}: {}", path.display(), e))
        })?;
        self.translate_text(&path.to_string_lossy(), &text, now)
    }

    /// Translate Selenium HTML `text` that came from `file_name`.
    pub fn translate_text(
        &self,
        file_name: &str,
        text: &str,
        now: DateTime<Local>,
    ) -> Result<Translation, TranslateError> {
        let result = self.engine.translate(text)?;
        let emitted = !result.has_errors() && !self.lint;
        tracing::info!(
            file = file_name,
            assertions = result.assertions,
            warnings = result.warning_count(),
            errors = result.error_count(),
            emitted,
            "translation finished"
        );

        let mut output = String::new();
        if emitted {
            output.push_str(&self.header(file_name, &result, now)?);
            output.push_str(&result.body());
            output.push_str(&self.engine.templates.render(FOOTER_TEMPLATE, &json!({}))?);
        }
        output.push_str(&self.messaging(&result)?);

        Ok(Translation {
            file_name: file_name.to_string(),
            result,
            emitted,
            output,
        })
    }

    fn header(&self, file_name: &str, result: &RunResult, now: DateTime<Local>) -> Result<String, TranslateError> {
        let ctx = json!({
            "file_name": file_name,
            "test_name": test_name(file_name),
            "date": now.format(DATE_FORMAT).to_string(),
            "test_count": result.assertions,
        });
        self.engine.templates.render(HEADER_TEMPLATE, &ctx)
    }

    fn messaging(&self, result: &RunResult) -> Result<String, TranslateError> {
        let ctx = json!({
            "warning_count": result.warning_count(),
            "error_count": result.error_count(),
            "lint": self.lint,
        });
        self.engine.templates.render(MESSAGING_TEMPLATE, &ctx)
    }
}

/// Translate the file named by `config`, stamped with the current time.
pub fn run(config: &RunConfig) -> Result<Translation, TranslateError> {
    Translator::from_config(config)?.translate_file(&config.input, Local::now())
}

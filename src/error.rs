//! Translation errors
//!
//! These are infrastructure failures (I/O, missing or broken templates).
//! Problems found in the Selenium table itself are diagnostics, not errors;
//! see [`crate::engine::Outcome`].

use std::fmt;

/// The kind of translation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading the input file or template directory failed
    Io,
    /// A template required for rendering is not in the store
    MissingTemplate,
    /// A template failed to compile or render
    Template,
    /// Other error
    Other,
}

/// A translation error with optional template/command context
#[derive(Debug)]
pub struct TranslateError {
    pub kind: ErrorKind,
    pub message: String,
    pub template: Option<String>,
    pub command: Option<String>,
}

impl TranslateError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            template: None,
            command: None,
        }
    }

    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template = Some(name.into());
        self
    }

    pub fn with_command(mut self, cmd: impl Into<String>) -> Self {
        self.command = Some(cmd.into());
        self
    }

    pub fn missing_template(name: &str) -> Self {
        Self::new(ErrorKind::MissingTemplate, format!("template not found: {}", name))
            .with_template(name)
    }

    pub fn is_missing_template(&self) -> bool {
        self.kind == ErrorKind::MissingTemplate
    }
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref cmd) = self.command {
            write!(f, "{}: ", cmd)?;
        }
        if let Some(ref name) = self.template {
            if self.kind != ErrorKind::MissingTemplate {
                write!(f, "template {}: ", name)?;
            }
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TranslateError {}

impl From<std::io::Error> for TranslateError {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, e.to_string())
    }
}

impl From<minijinja::Error> for TranslateError {
    fn from(e: minijinja::Error) -> Self {
        let err = Self::new(ErrorKind::Template, e.to_string());
        match e.name() {
            Some(name) => err.with_template(name),
            None => err,
        }
    }
}

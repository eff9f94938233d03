//! Error types for gridsweep.

use std::{fmt, path::PathBuf};
use thiserror::Error;

use crate::textformat::TextFormatError;

/// The wrapper for the error kind, with an optional hint.
#[derive(Debug)]
pub struct SweepError {
    kind: SweepErrorKind,
    hint: Option<String>,
}

/// All types of errors that can occur in gridsweep.
#[derive(Error, Debug)]
pub enum SweepErrorKind {
    #[error("Collector executable not found. Please provide it explicitly with --collector-path")]
    CollectorNotFound,

    #[error("Collector executable not found at provided path: {path}")]
    CollectorNotFoundAtPath { path: PathBuf },

    #[error("Collector process failed with exit code {code}.")]
    CollectorProcessFailed { code: i32 },

    #[error("Configuration file does not exist: {path}")]
    ConfigFileNotFound { path: PathBuf },

    #[error("Configuration error: {0}")]
    ConfigError(#[from] figment::Error),

    #[error("Invalid step {step} for {axis} axis (must be positive)")]
    InvalidAxisStep { axis: &'static str, step: f64 },

    #[error("Parameter grid is empty, nothing to run")]
    EmptyGrid,

    #[error("Progress bar template error: {0}")]
    ProgressBarError(#[from] indicatif::style::TemplateError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Text record error: {0}")]
    TextFormatError(#[from] TextFormatError),
}

impl SweepError {
    /// Attaches a hint to the error
    pub fn with_hint(mut self, hint: Option<impl Into<String>>) -> Self {
        if let Some(hint) = hint {
            self.hint = Some(hint.into());
        }
        self
    }
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(hint_text) = &self.hint {
            write!(f, " ({hint_text})")?;
        }

        Ok(())
    }
}

/// Proper error type
impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Convert Error into SweepErrorKind
impl<E> From<E> for SweepError
where
    SweepErrorKind: From<E>,
{
    fn from(error: E) -> Self {
        SweepError {
            kind: SweepErrorKind::from(error),
            hint: None,
        }
    }
}

/// A convenient result type for gridsweep
pub type Result<T> = std::result::Result<T, SweepError>;

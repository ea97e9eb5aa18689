//! Core error types

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PromptError>;

/// Errors raised while resolving, binding or formatting prompts
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PromptError {
    /// Caller-fixable misconfiguration (unknown flavor, unsupported media, ...)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The selected adapter does not implement the requested translation
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Wrong accessor used for the actual state of a value
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// Template syntax errors, missing variables and unresolved partials
    #[error("Template error: {0}")]
    TemplateError(String),

    /// Malformed caller-supplied data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Coarse classification of a [`PromptError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    State,
    Validation,
    Parsing,
    Io,
}

impl PromptError {
    /// Coarse category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError(_) | Self::UnsupportedOperation(_) | Self::TemplateError(_) => {
                ErrorCategory::Configuration
            }
            Self::IllegalState(_) => ErrorCategory::State,
            Self::InvalidInput(_) => ErrorCategory::Validation,
            Self::JsonError(_) => ErrorCategory::Parsing,
            Self::IoError(_) => ErrorCategory::Io,
        }
    }

    /// Only filesystem failures may succeed on a second attempt; everything
    /// else needs a change to the template or the call site.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::IoError(_))
    }

    /// Message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            Self::ConfigurationError(m)
            | Self::UnsupportedOperation(m)
            | Self::IllegalState(m)
            | Self::TemplateError(m)
            | Self::InvalidInput(m)
            | Self::JsonError(m)
            | Self::IoError(m) => m,
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }

    pub(crate) fn template(message: impl Into<String>) -> Self {
        Self::TemplateError(message.into())
    }
}

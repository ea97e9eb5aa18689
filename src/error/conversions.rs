//! Type Conversions for PromptError
//!
//! This module contains From trait implementations for converting
//! common error types into PromptError.

use super::types::PromptError;

impl From<serde_json::Error> for PromptError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<base64::DecodeError> for PromptError {
    fn from(err: base64::DecodeError) -> Self {
        Self::InvalidInput(format!("Invalid base64 data: {err}"))
    }
}

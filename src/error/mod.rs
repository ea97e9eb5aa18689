//! Error Handling Module
//!
//! This module provides the error type shared by every part of the crate:
//! - Core error type (`PromptError`) and its coarse `ErrorCategory`
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use promptwire::error::{ErrorCategory, PromptError};
//!
//! let error = PromptError::ConfigurationError("Unknown flavor".to_string());
//! assert_eq!(error.category(), ErrorCategory::Configuration);
//! assert!(!error.is_retryable());
//! ```

mod conversions;
pub mod types;

pub use types::*;

//! Canonical chat message model

pub mod content;
pub mod message;

pub use content::{ContentPart, GeminiInlineData, GeminiPart, MediaType};
pub use message::{ChatMessage, MessageContent};

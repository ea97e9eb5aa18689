//! Gemini message formats
//!
//! Two adapters share the same content rules:
//! - [`GeminiApiAdapter`] emits plain JSON maps for the Gemini API
//! - [`GeminiNativeAdapter`] (feature `gemini-native`) emits typed content
//!   objects for Vertex AI

pub mod api;
#[cfg(feature = "gemini-native")]
pub mod native;

pub use api::GeminiApiAdapter;
#[cfg(feature = "gemini-native")]
pub use native::GeminiNativeAdapter;

use crate::error::{PromptError, Result};
use crate::types::chat::message::mixed_gemini_content;
use crate::types::{ChatMessage, ContentPart};

/// Gemini only knows `user` and `model` turns
pub(crate) fn gemini_role(role: Option<&str>) -> Result<&'static str> {
    match role {
        Some("user") => Ok("user"),
        Some("assistant") | Some("model") => Ok("model"),
        other => Err(PromptError::ConfigurationError(format!(
            "Unknown role in prompt template for Gemini: {}",
            other.unwrap_or("<none>")
        ))),
    }
}

/// Gemini part before it is rendered as a map or a typed object
pub(crate) enum GeminiPartRef<'a> {
    Text(&'a str),
    InlineData { mime_type: &'a str, data: &'a [u8] },
}

/// Parts of a message in Gemini terms.
///
/// Gemini-native messages reuse their existing parts; canonical messages
/// are derived from text or structured content. Media URLs are rejected in
/// both cases.
pub(crate) fn message_parts(message: &ChatMessage) -> Result<Vec<GeminiPartRef<'_>>> {
    let parts = match message.content() {
        crate::types::MessageContent::Text(text) => return Ok(vec![GeminiPartRef::Text(text)]),
        crate::types::MessageContent::Empty => return Ok(Vec::new()),
        _ => message.parts()?,
    };
    parts
        .iter()
        .map(|part| match part {
            ContentPart::Text { text } => Ok(GeminiPartRef::Text(text)),
            ContentPart::Base64 {
                content_type, data, ..
            } => Ok(GeminiPartRef::InlineData {
                mime_type: content_type,
                data,
            }),
            ContentPart::Url { .. } if message.is_gemini_native() => Err(mixed_gemini_content()),
            ContentPart::Url { .. } => Err(PromptError::ConfigurationError(
                "Message contains a media URL, but media URLs are not supported by Gemini"
                    .to_string(),
            )),
        })
        .collect()
}

//! Adapter trait implemented by every provider wire format
//!
//! Converts canonical messages and schemas into the request shape a single
//! provider expects. Adapters are pure: no I/O and no internal state.

use serde_json::Value;

use crate::error::{PromptError, Result};
use crate::types::{ChatMessage, ToolSchema};

pub(crate) const TOOL_SCHEMA_UNSUPPORTED: &str =
    "Tool schema format not supported for this model and provider.";
pub(crate) const OUTPUT_SCHEMA_UNSUPPORTED: &str =
    "Structured outputs are not supported for this model and provider.";

/// What an adapter does with `system` messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemHandling {
    /// Dropped from the message list; callers read it via system content extraction
    Separate,
    /// Kept in place with the other messages
    Inline,
}

/// Translate canonical prompts into one provider's wire format
pub trait LlmAdapter: Send + Sync {
    /// Wire content produced for a message list
    type Output;

    /// Provider identifier (e.g., "openai", "anthropic", "bedrock")
    fn provider(&self) -> &'static str;

    fn system_handling(&self) -> SystemHandling;

    /// Encode canonical messages
    fn to_llm_syntax(&self, messages: &[ChatMessage]) -> Result<Self::Output>;

    /// Encode tool schemas
    fn to_tool_schema_format(&self, _tools: &[ToolSchema]) -> Result<Value> {
        Err(PromptError::UnsupportedOperation(
            TOOL_SCHEMA_UNSUPPORTED.to_string(),
        ))
    }

    /// Encode a structured-output schema
    fn to_output_schema_format(&self, _schema: &Value) -> Result<Value> {
        Err(PromptError::ConfigurationError(
            OUTPUT_SCHEMA_UNSUPPORTED.to_string(),
        ))
    }
}

/// Messages the adapter should encode, honoring its system handling
pub(crate) fn visible_messages(
    messages: &[ChatMessage],
    handling: SystemHandling,
) -> impl Iterator<Item = &ChatMessage> {
    messages
        .iter()
        .filter(move |m| handling == SystemHandling::Inline || !m.has_role("system"))
}

pub(crate) fn gemini_native_unsupported(provider: &str) -> PromptError {
    PromptError::UnsupportedOperation(format!(
        "Gemini-native messages cannot be formatted for provider '{provider}'"
    ))
}

/// MIME subtype of an inline part, required to name its wire format
pub(crate) fn required_subtype<'a>(slot_name: &str, content_type: &'a str) -> Result<&'a str> {
    crate::utils::mime_subtype(content_type).ok_or_else(|| {
        PromptError::InvalidInput(format!(
            "Invalid content type '{content_type}' for media slot '{slot_name}'"
        ))
    })
}

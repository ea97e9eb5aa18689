//! Gemini API format as plain JSON maps, no typed SDK objects required

use serde_json::{Value, json};

use super::{GeminiPartRef, gemini_role, message_parts};
use crate::error::Result;
use crate::standards::adapter::{LlmAdapter, SystemHandling, visible_messages};
use crate::types::{ChatMessage, ToolSchema};
use crate::utils::base64_encode;

#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiApiAdapter;

impl LlmAdapter for GeminiApiAdapter {
    type Output = Vec<Value>;

    fn provider(&self) -> &'static str {
        "gemini"
    }

    fn system_handling(&self) -> SystemHandling {
        SystemHandling::Separate
    }

    fn to_llm_syntax(&self, messages: &[ChatMessage]) -> Result<Vec<Value>> {
        visible_messages(messages, self.system_handling())
            .map(|message| {
                if let Ok(value) = message.pass_through_value() {
                    return Ok(value.clone());
                }
                let role = gemini_role(message.role())?;
                let parts: Vec<Value> = message_parts(message)?
                    .into_iter()
                    .map(|part| match part {
                        GeminiPartRef::Text(text) => json!({ "text": text }),
                        GeminiPartRef::InlineData { mime_type, data } => json!({
                            "inline_data": { "mime_type": mime_type, "data": base64_encode(data) }
                        }),
                    })
                    .collect();
                Ok(json!({ "role": role, "parts": parts }))
            })
            .collect()
    }

    /// All tools are grouped into a single Tool object
    fn to_tool_schema_format(&self, tools: &[ToolSchema]) -> Result<Value> {
        let declarations: Vec<Value> = tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.parameters,
                })
            })
            .collect();
        Ok(json!([{ "functionDeclarations": declarations }]))
    }
}

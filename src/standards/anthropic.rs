//! Anthropic messages format

use serde_json::{Value, json};

use super::adapter::{LlmAdapter, SystemHandling, gemini_native_unsupported, visible_messages};
use crate::error::{PromptError, Result};
use crate::types::{ChatMessage, ContentPart, MediaType, MessageContent, ToolSchema};
use crate::utils::base64_encode;

#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicAdapter;

impl LlmAdapter for AnthropicAdapter {
    type Output = Vec<Value>;

    fn provider(&self) -> &'static str {
        "anthropic"
    }

    fn system_handling(&self) -> SystemHandling {
        SystemHandling::Separate
    }

    fn to_llm_syntax(&self, messages: &[ChatMessage]) -> Result<Vec<Value>> {
        visible_messages(messages, self.system_handling())
            .map(|message| {
                if message.is_gemini_native() {
                    return Err(gemini_native_unsupported(self.provider()));
                }
                match message.content() {
                    MessageContent::Structured(parts) => {
                        let content = parts.iter().map(convert_part).collect::<Result<Vec<_>>>()?;
                        Ok(json!({ "role": message.role(), "content": content }))
                    }
                    _ => Ok(message.to_json()),
                }
            })
            .collect()
    }

    /// Schemas without a name are skipped
    fn to_tool_schema_format(&self, tools: &[ToolSchema]) -> Result<Value> {
        Ok(Value::Array(
            tools
                .iter()
                .filter(|tool| tool.is_complete())
                .map(|tool| {
                    json!({
                        "name": tool.name,
                        "description": tool.description,
                        "input_schema": tool.parameters,
                    })
                })
                .collect(),
        ))
    }
}

fn block_type(media_type: MediaType) -> Result<&'static str> {
    match media_type {
        MediaType::Image => Ok("image"),
        MediaType::File => Ok("document"),
        MediaType::Audio | MediaType::Video => Err(PromptError::ConfigurationError(
            "Anthropic does not support audio or video content".to_string(),
        )),
    }
}

fn convert_part(part: &ContentPart) -> Result<Value> {
    match part {
        ContentPart::Text { text } => Ok(json!({ "type": "text", "text": text })),
        ContentPart::Url {
            media_type, url, ..
        } => Ok(json!({
            "type": block_type(*media_type)?,
            "source": { "type": "url", "url": url }
        })),
        ContentPart::Base64 {
            media_type,
            content_type,
            data,
            ..
        } => Ok(json!({
            "type": block_type(*media_type)?,
            "source": {
                "type": "base64",
                "media_type": content_type,
                "data": base64_encode(data),
            }
        })),
    }
}

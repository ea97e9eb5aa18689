//! Amazon Bedrock Converse message format

use serde_json::{Value, json};

use super::adapter::{LlmAdapter, SystemHandling, gemini_native_unsupported, visible_messages};
use crate::error::{PromptError, Result};
use crate::types::{ChatMessage, ContentPart, MediaType, MessageContent, ToolSchema};
use crate::utils::{base64_encode, mime_subtype};

const DEFAULT_IMAGE_FORMAT: &str = "jpeg";
const DEFAULT_DOCUMENT_NAME: &str = "document";

#[derive(Debug, Clone, Copy, Default)]
pub struct BedrockConverseAdapter;

impl LlmAdapter for BedrockConverseAdapter {
    type Output = Vec<Value>;

    fn provider(&self) -> &'static str {
        "bedrock"
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
                let content = match message.content() {
                    MessageContent::PassThrough(value) => return Ok(value.clone()),
                    MessageContent::Empty => Vec::new(),
                    MessageContent::Text(text) => vec![json!({ "text": text })],
                    MessageContent::Structured(parts) => {
                        parts.iter().map(convert_part).collect::<Result<Vec<_>>>()?
                    }
                };
                Ok(json!({ "role": message.role(), "content": content }))
            })
            .collect()
    }

    fn to_tool_schema_format(&self, tools: &[ToolSchema]) -> Result<Value> {
        Ok(Value::Array(
            tools
                .iter()
                .filter(|tool| tool.is_complete())
                .map(|tool| {
                    json!({
                        "name": tool.name,
                        "description": tool.description,
                        "inputSchema": tool.parameters,
                    })
                })
                .collect(),
        ))
    }
}

fn unsupported(kind: &str) -> PromptError {
    PromptError::ConfigurationError(format!("Bedrock Converse does not support {kind} content"))
}

fn convert_part(part: &ContentPart) -> Result<Value> {
    match part {
        ContentPart::Text { text } => Ok(json!({ "text": text })),
        ContentPart::Url { .. } => Err(unsupported("url")),
        ContentPart::Base64 {
            slot_name,
            media_type,
            content_type,
            data,
        } => {
            let format = mime_subtype(content_type).unwrap_or(DEFAULT_IMAGE_FORMAT);
            let source = json!({ "bytes": base64_encode(data) });
            match media_type {
                MediaType::Image => Ok(json!({
                    "image": { "format": format, "source": source }
                })),
                MediaType::File => {
                    let name = if slot_name.is_empty() {
                        DEFAULT_DOCUMENT_NAME
                    } else {
                        slot_name.as_str()
                    };
                    Ok(json!({
                        "document": { "format": format, "name": name, "source": source }
                    }))
                }
                MediaType::Audio | MediaType::Video => Err(unsupported(media_type.as_str())),
            }
        }
    }
}

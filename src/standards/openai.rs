//! OpenAI chat completions message format

use serde_json::{Value, json};

use super::adapter::{
    LlmAdapter, SystemHandling, gemini_native_unsupported, required_subtype, visible_messages,
};
use crate::error::{PromptError, Result};
use crate::types::{ChatMessage, ContentPart, MediaType, MessageContent, ToolSchema};
use crate::utils::{base64_encode, data_url};

#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiAdapter;

impl LlmAdapter for OpenAiAdapter {
    type Output = Vec<Value>;

    fn provider(&self) -> &'static str {
        "openai"
    }

    fn system_handling(&self) -> SystemHandling {
        SystemHandling::Separate
    }

    fn to_llm_syntax(&self, messages: &[ChatMessage]) -> Result<Vec<Value>> {
        visible_messages(messages, self.system_handling())
            .map(|message| convert_message(message, self.provider()))
            .collect()
    }

    fn to_tool_schema_format(&self, tools: &[ToolSchema]) -> Result<Value> {
        Ok(Value::Array(
            tools
                .iter()
                .map(|tool| {
                    json!({
                        "type": "function",
                        "function": {
                            "name": tool.name,
                            "description": tool.description,
                            "parameters": tool.parameters,
                        }
                    })
                })
                .collect(),
        ))
    }

    /// The canonical output schema is already in OpenAI's shape
    fn to_output_schema_format(&self, schema: &Value) -> Result<Value> {
        Ok(schema.clone())
    }
}

fn convert_message(message: &ChatMessage, provider: &str) -> Result<Value> {
    if message.is_gemini_native() {
        return Err(gemini_native_unsupported(provider));
    }
    match message.content() {
        MessageContent::Structured(parts) => {
            let content = parts.iter().map(convert_part).collect::<Result<Vec<_>>>()?;
            Ok(json!({ "role": message.role(), "content": content }))
        }
        _ => Ok(message.to_json()),
    }
}

fn convert_part(part: &ContentPart) -> Result<Value> {
    match part {
        ContentPart::Text { text } => Ok(json!({ "type": "text", "text": text })),
        ContentPart::Url {
            media_type: MediaType::Image,
            url,
            ..
        } => Ok(json!({ "type": "image_url", "image_url": { "url": url } })),
        ContentPart::Url { .. } => Err(PromptError::ConfigurationError(
            "Message contains a non-image URL, but OpenAI only supports image URLs.".to_string(),
        )),
        ContentPart::Base64 {
            slot_name,
            media_type,
            content_type,
            data,
        } => match media_type {
            MediaType::Image => Ok(json!({
                "type": "image_url",
                "image_url": { "url": data_url(content_type, data) }
            })),
            MediaType::File => {
                let extension = required_subtype(slot_name, content_type)?;
                Ok(json!({
                    "type": "file",
                    "file": {
                        "filename": format!("{slot_name}.{extension}"),
                        "file_data": data_url(content_type, data),
                    }
                }))
            }
            MediaType::Audio => {
                let format = match required_subtype(slot_name, content_type)? {
                    "mpeg" => "mp3",
                    other => other,
                };
                Ok(json!({
                    "type": "input_audio",
                    "input_audio": { "data": base64_encode(data), "format": format }
                }))
            }
            MediaType::Video => Err(PromptError::ConfigurationError(
                "OpenAI does not support video content".to_string(),
            )),
        },
    }
}

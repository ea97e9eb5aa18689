//! Typed Gemini content objects for Vertex AI

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{GeminiPartRef, gemini_role, message_parts};
use crate::error::{PromptError, Result};
use crate::standards::adapter::{LlmAdapter, SystemHandling, visible_messages};
use crate::types::{ChatMessage, GeminiPart, ToolSchema};
use crate::utils::base64_encode;

/// Content of a single conversational turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData", alias = "inline_data")]
        inline_data: Blob,
    },
    FunctionCall {
        #[serde(rename = "functionCall", alias = "function_call")]
        function_call: FunctionCall,
    },
    FunctionResponse {
        #[serde(rename = "functionResponse", alias = "function_response")]
        function_response: FunctionResponse,
    },
    /// Any other part kind, kept as received
    Other(Map<String, Value>),
}

/// Tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

/// Result of a tool invocation sent back to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    #[serde(default)]
    pub response: Map<String, Value>,
}

/// Inline bytes; serialized as base64
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    #[serde(rename = "mimeType", alias = "mime_type")]
    pub mime_type: String,
    #[serde(with = "crate::utils::base64_serde")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "functionDeclarations")]
    pub function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Map<String, Value>,
}

/// Turn a model reply into a history message.
///
/// Text and inline data become a Gemini-native message, so neither Gemini
/// adapter re-derives its parts. Replies with any other part kind (function
/// calls, function responses) are kept whole as pass-through messages.
impl TryFrom<Content> for ChatMessage {
    type Error = PromptError;

    fn try_from(content: Content) -> Result<Self> {
        let mut parts = Vec::with_capacity(content.parts.len());
        for part in &content.parts {
            match part {
                Part::Text { text } => parts.push(GeminiPart::text(text.clone())),
                Part::InlineData { inline_data } => parts.push(GeminiPart::inline_data(
                    inline_data.mime_type.clone(),
                    base64_encode(&inline_data.data),
                )),
                _ => return Ok(ChatMessage::pass_through(serde_json::to_value(&content)?)),
            }
        }
        ChatMessage::gemini(content.role, parts)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiNativeAdapter;

impl GeminiNativeAdapter {
    /// Typed tool list; [`LlmAdapter::to_tool_schema_format`] returns its JSON form
    pub fn tools(&self, tools: &[ToolSchema]) -> Vec<Tool> {
        vec![Tool {
            function_declarations: tools
                .iter()
                .map(|tool| FunctionDeclaration {
                    name: tool.name.clone(),
                    description: tool.description.clone(),
                    parameters: tool.parameters.clone(),
                })
                .collect(),
        }]
    }
}

impl LlmAdapter for GeminiNativeAdapter {
    type Output = Vec<Content>;

    fn provider(&self) -> &'static str {
        "vertex"
    }

    fn system_handling(&self) -> SystemHandling {
        SystemHandling::Separate
    }

    fn to_llm_syntax(&self, messages: &[ChatMessage]) -> Result<Vec<Content>> {
        visible_messages(messages, self.system_handling())
            .map(|message| {
                // A pass-through message must already be a Gemini content object
                if let Ok(value) = message.pass_through_value() {
                    return Ok(serde_json::from_value(value.clone())?);
                }
                let parts = message_parts(message)?
                    .into_iter()
                    .map(|part| match part {
                        GeminiPartRef::Text(text) => Part::Text {
                            text: text.to_string(),
                        },
                        GeminiPartRef::InlineData { mime_type, data } => Part::InlineData {
                            inline_data: Blob {
                                mime_type: mime_type.to_string(),
                                data: data.to_vec(),
                            },
                        },
                    })
                    .collect();
                Ok(Content {
                    role: gemini_role(message.role())?.to_string(),
                    parts,
                })
            })
            .collect()
    }

    fn to_tool_schema_format(&self, tools: &[ToolSchema]) -> Result<Value> {
        Ok(serde_json::to_value(self.tools(tools))?)
    }
}

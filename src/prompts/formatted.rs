//! Provider-ready prompts

use serde_json::Value;

use crate::error::{PromptError, Result};
use crate::standards::WireContent;
use crate::types::{ChatMessage, PromptInfo, ToolSchema};

/// Output of the formatting step.
///
/// `llm_prompt` is what goes to the provider. The bound messages and
/// canonical schemas are kept alongside for recording.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedPrompt<F = WireContent> {
    pub(crate) prompt_info: PromptInfo,
    pub(crate) messages: Vec<ChatMessage>,
    pub(crate) llm_prompt: F,
    pub(crate) tool_schema: Option<Vec<ToolSchema>>,
    pub(crate) formatted_tool_schema: Option<Value>,
    pub(crate) output_schema: Option<Value>,
    pub(crate) formatted_output_schema: Option<Value>,
}

impl<F> FormattedPrompt<F> {
    pub fn prompt_info(&self) -> &PromptInfo {
        &self.prompt_info
    }

    /// Bound messages before provider translation
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn llm_prompt(&self) -> &F {
        &self.llm_prompt
    }

    pub fn into_llm_prompt(self) -> F {
        self.llm_prompt
    }

    pub fn tool_schema(&self) -> Option<&[ToolSchema]> {
        self.tool_schema.as_deref()
    }

    pub fn formatted_tool_schema(&self) -> Option<&Value> {
        self.formatted_tool_schema.as_ref()
    }

    pub fn output_schema(&self) -> Option<&Value> {
        self.output_schema.as_ref()
    }

    pub fn formatted_output_schema(&self) -> Option<&Value> {
        self.formatted_output_schema.as_ref()
    }

    /// Text of the first system message, if there is one
    pub fn system_content(&self) -> Result<Option<&str>> {
        match self.messages.iter().find(|message| message.has_role("system")) {
            Some(message) => message.text().map(Some).map_err(|_| {
                PromptError::ConfigurationError("System message must be a string".to_string())
            }),
            None => Ok(None),
        }
    }

    /// Bound messages followed by `new_message`
    pub fn all_messages(&self, new_message: ChatMessage) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.extend(self.messages.iter().cloned());
        messages.push(new_message);
        messages
    }

    /// Bound messages followed by a raw provider completion
    pub fn all_messages_with_completion(&self, completion: Value) -> Vec<ChatMessage> {
        self.all_messages(ChatMessage::pass_through(completion))
    }
}

//! Bound prompts and the formatting step

use serde_json::Value;

use super::formatted::FormattedPrompt;
use crate::error::Result;
use crate::standards::{Adapter, LlmAdapter, WireContent};
use crate::types::{ChatMessage, PromptInfo, ToolSchema};

/// Prompt with every placeholder substituted, not yet in provider format
#[derive(Debug, Clone, PartialEq)]
pub struct BoundPrompt {
    prompt_info: PromptInfo,
    messages: Vec<ChatMessage>,
    tool_schema: Option<Vec<ToolSchema>>,
    output_schema: Option<Value>,
}

impl BoundPrompt {
    pub fn new(prompt_info: PromptInfo, messages: Vec<ChatMessage>) -> Self {
        Self {
            prompt_info,
            messages,
            tool_schema: None,
            output_schema: None,
        }
    }

    pub fn with_tool_schema(mut self, tool_schema: Vec<ToolSchema>) -> Self {
        self.tool_schema = Some(tool_schema);
        self
    }

    pub fn with_output_schema(mut self, output_schema: Value) -> Self {
        self.output_schema = Some(output_schema);
        self
    }

    pub fn prompt_info(&self) -> &PromptInfo {
        &self.prompt_info
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn tool_schema(&self) -> Option<&[ToolSchema]> {
        self.tool_schema.as_deref()
    }

    pub fn output_schema(&self) -> Option<&Value> {
        self.output_schema.as_ref()
    }

    /// Format for `flavor`, or for the flavor recorded with the prompt
    pub fn format(&self, flavor: Option<&str>) -> Result<FormattedPrompt<WireContent>> {
        let flavor = flavor.unwrap_or(&self.prompt_info.flavor_name);
        let adapter = Adapter::for_flavor(flavor)?;
        self.format_with(&adapter)
    }

    /// Format with a specific adapter, keeping its concrete output type
    pub fn format_with<A: LlmAdapter>(&self, adapter: &A) -> Result<FormattedPrompt<A::Output>> {
        let llm_prompt = adapter.to_llm_syntax(&self.messages)?;

        let formatted_tool_schema = match &self.tool_schema {
            Some(tools) => Some(adapter.to_tool_schema_format(tools)?),
            None => None,
        };
        let formatted_output_schema = match &self.output_schema {
            Some(schema) => Some(adapter.to_output_schema_format(schema)?),
            None => None,
        };

        Ok(FormattedPrompt {
            prompt_info: self.prompt_info.clone(),
            messages: self.messages.clone(),
            llm_prompt,
            tool_schema: self.tool_schema.clone(),
            formatted_tool_schema,
            output_schema: self.output_schema.clone(),
            formatted_output_schema,
        })
    }
}

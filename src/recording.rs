//! Call records handed to the external recording service
//!
//! Pure data; nothing in this crate sends a record anywhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::prompts::FormattedPrompt;
use crate::types::{ChatMessage, MediaInputCollection, PromptInfo, PromptVersionInfo, ToolSchema};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageTokens {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// How and when the model was called
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallInfo {
    pub provider: String,
    pub model: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub model_parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_info: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageTokens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_style: Option<String>,
}

impl CallInfo {
    pub fn from_prompt_info(
        prompt_info: &PromptInfo,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            provider: prompt_info.provider.clone(),
            model: prompt_info.model.clone(),
            start_time,
            end_time,
            model_parameters: prompt_info.model_parameters.clone(),
            provider_info: prompt_info.provider_info.clone(),
            usage: None,
            api_style: None,
        }
    }

    pub fn with_usage(mut self, usage: UsageTokens) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_api_style(mut self, api_style: impl Into<String>) -> Self {
        self.api_style = Some(api_style.into());
        self
    }

    /// Wall-clock latency in milliseconds
    pub fn latency_ms(&self) -> i64 {
        (self.end_time - self.start_time).num_milliseconds()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseInfo {
    pub is_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call_response: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_tokens: Option<u32>,
}

/// Everything needed to record one completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub project_id: String,
    pub all_messages: Vec<ChatMessage>,
    pub inputs: Map<String, Value>,
    pub prompt_version_info: PromptVersionInfo,
    pub call_info: CallInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_info: Option<ResponseInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub completion_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_schema: Option<Vec<ToolSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_inputs: Option<MediaInputCollection>,
}

impl RecordPayload {
    /// Record for a formatted prompt. Copies the bound messages and the
    /// canonical schemas; the provider wire content is not recorded.
    pub fn from_formatted<F>(
        project_id: impl Into<String>,
        formatted: &FormattedPrompt<F>,
        inputs: Map<String, Value>,
        call_info: CallInfo,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            all_messages: formatted.messages().to_vec(),
            inputs,
            prompt_version_info: formatted.prompt_info().version_info(),
            call_info,
            response_info: None,
            session_id: None,
            trace_id: None,
            parent_id: None,
            completion_id: Uuid::new_v4(),
            tool_schema: formatted.tool_schema().map(<[ToolSchema]>::to_vec),
            output_schema: formatted.output_schema().cloned(),
            media_inputs: None,
        }
    }

    /// Replace the recorded messages, typically with
    /// [`FormattedPrompt::all_messages`] after the reply arrived
    pub fn with_all_messages(mut self, all_messages: Vec<ChatMessage>) -> Self {
        self.all_messages = all_messages;
        self
    }

    pub fn with_response_info(mut self, response_info: ResponseInfo) -> Self {
        self.response_info = Some(response_info);
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_completion_id(mut self, completion_id: Uuid) -> Self {
        self.completion_id = completion_id;
        self
    }

    pub fn with_media_inputs(mut self, media_inputs: MediaInputCollection) -> Self {
        self.media_inputs = Some(media_inputs);
        self
    }
}

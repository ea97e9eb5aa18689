//! Flavor to adapter lookup
//!
//! Every [`Flavor`] maps to exactly one adapter. The lookup is a closed
//! match, so adding a flavor without an adapter fails to compile.

use serde::Serialize;
use serde_json::Value;

use super::adapter::{LlmAdapter, SystemHandling};
use super::anthropic::AnthropicAdapter;
use super::baseten::BasetenAdapter;
use super::bedrock::BedrockConverseAdapter;
use super::flavor::Flavor;
use super::gemini::GeminiApiAdapter;
#[cfg(feature = "gemini-native")]
use super::gemini::{GeminiNativeAdapter, native::Content};
use super::llama3::Llama3Adapter;
use super::openai::OpenAiAdapter;
use crate::error::Result;
use crate::types::{ChatMessage, ToolSchema};

/// Adapter selected by flavor
#[derive(Debug, Clone, Copy)]
pub enum Adapter {
    OpenAi(OpenAiAdapter),
    Anthropic(AnthropicAdapter),
    Llama3(Llama3Adapter),
    Baseten(BasetenAdapter),
    #[cfg(feature = "gemini-native")]
    GeminiNative(GeminiNativeAdapter),
    GeminiApi(GeminiApiAdapter),
    Bedrock(BedrockConverseAdapter),
}

/// Wire content produced by an [`Adapter`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireContent {
    /// JSON message list (OpenAI, Anthropic, Gemini API, Bedrock)
    Messages(Vec<Value>),
    /// Single prompt string (Llama 3)
    Text(String),
    /// Canonical messages, unchanged (Baseten)
    Canonical(Vec<ChatMessage>),
    /// Typed Gemini content objects (Vertex)
    #[cfg(feature = "gemini-native")]
    GeminiContents(Vec<Content>),
}

impl WireContent {
    pub fn as_messages(&self) -> Option<&[Value]> {
        match self {
            Self::Messages(messages) => Some(messages),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_canonical(&self) -> Option<&[ChatMessage]> {
        match self {
            Self::Canonical(messages) => Some(messages),
            _ => None,
        }
    }

    #[cfg(feature = "gemini-native")]
    pub fn as_gemini_contents(&self) -> Option<&[Content]> {
        match self {
            Self::GeminiContents(contents) => Some(contents),
            _ => None,
        }
    }

    /// JSON form, ready to embed in a request body
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Adapter {
    /// Adapter for a flavor name such as `openai_chat`
    pub fn for_flavor(name: &str) -> Result<Self> {
        let flavor: Flavor = name.parse()?;
        let adapter = Self::from_flavor(flavor)?;
        tracing::debug!(flavor = name, provider = adapter.provider(), "selected adapter");
        Ok(adapter)
    }

    pub fn from_flavor(flavor: Flavor) -> Result<Self> {
        Ok(match flavor {
            Flavor::OpenAiChat => Self::OpenAi(OpenAiAdapter),
            Flavor::AnthropicChat => Self::Anthropic(AnthropicAdapter),
            Flavor::Llama3Chat => Self::Llama3(Llama3Adapter),
            Flavor::BasetenMistralChat => Self::Baseten(BasetenAdapter),
            #[cfg(feature = "gemini-native")]
            Flavor::GeminiChat => Self::GeminiNative(GeminiNativeAdapter),
            #[cfg(not(feature = "gemini-native"))]
            Flavor::GeminiChat => {
                return Err(crate::error::PromptError::ConfigurationError(format!(
                    "Flavor '{}' requires the `gemini-native` feature of promptwire, which is not enabled. \
                     Enable it or use the '{}' flavor.",
                    Flavor::GeminiChat,
                    Flavor::GeminiApiChat
                )));
            }
            Flavor::GeminiApiChat => Self::GeminiApi(GeminiApiAdapter),
            Flavor::BedrockConverse => Self::Bedrock(BedrockConverseAdapter),
        })
    }
}

macro_rules! dispatch {
    ($self:expr, $adapter:ident => $body:expr) => {
        match $self {
            Adapter::OpenAi($adapter) => $body,
            Adapter::Anthropic($adapter) => $body,
            Adapter::Llama3($adapter) => $body,
            Adapter::Baseten($adapter) => $body,
            #[cfg(feature = "gemini-native")]
            Adapter::GeminiNative($adapter) => $body,
            Adapter::GeminiApi($adapter) => $body,
            Adapter::Bedrock($adapter) => $body,
        }
    };
}

impl LlmAdapter for Adapter {
    type Output = WireContent;

    fn provider(&self) -> &'static str {
        dispatch!(self, a => a.provider())
    }

    fn system_handling(&self) -> SystemHandling {
        dispatch!(self, a => a.system_handling())
    }

    fn to_llm_syntax(&self, messages: &[ChatMessage]) -> Result<WireContent> {
        Ok(match self {
            Self::OpenAi(a) => WireContent::Messages(a.to_llm_syntax(messages)?),
            Self::Anthropic(a) => WireContent::Messages(a.to_llm_syntax(messages)?),
            Self::Llama3(a) => WireContent::Text(a.to_llm_syntax(messages)?),
            Self::Baseten(a) => WireContent::Canonical(a.to_llm_syntax(messages)?),
            #[cfg(feature = "gemini-native")]
            Self::GeminiNative(a) => WireContent::GeminiContents(a.to_llm_syntax(messages)?),
            Self::GeminiApi(a) => WireContent::Messages(a.to_llm_syntax(messages)?),
            Self::Bedrock(a) => WireContent::Messages(a.to_llm_syntax(messages)?),
        })
    }

    fn to_tool_schema_format(&self, tools: &[ToolSchema]) -> Result<Value> {
        dispatch!(self, a => a.to_tool_schema_format(tools))
    }

    fn to_output_schema_format(&self, schema: &Value) -> Result<Value> {
        dispatch!(self, a => a.to_output_schema_format(schema))
    }
}

//! # Promptwire
//!
//! Prompt templates in, provider-ready requests out.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **Template binding**: mustache-style variables, sections and partials,
//!   conversation history spliced at a placeholder, media attached to slots.
//! - **One canonical message model**: [`ChatMessage`](types::ChatMessage) holds
//!   plain text, structured parts, or a provider reply passed through as-is.
//! - **Provider adapters**: OpenAI, Anthropic, Gemini (API and Vertex),
//!   Bedrock Converse, Llama 3 and Baseten, selected by flavor name.
//! - **Template sources**: exported prompt directories on disk or templates
//!   held in memory, behind the async [`TemplateResolver`](resolver::TemplateResolver) trait.
//! - **Recording payloads**: serde structs describing a completed call.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use promptwire::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<(), PromptError> {
//!     let template = TemplatePrompt::new(
//!         PromptInfo::for_flavor("support-bot", "anthropic_chat", "claude-3-5-sonnet"),
//!         vec![
//!             TemplateMessage::new("system", "You answer questions about {{product}}."),
//!             TemplateMessage::history(),
//!             TemplateMessage::new("user", "{{question}}"),
//!         ],
//!     );
//!
//!     let request = BindRequest::try_from_json(json!({
//!         "product": "Promptwire",
//!         "question": "Which providers are supported?",
//!     }))?
//!     .with_history(vec![]);
//!
//!     let formatted = template.bind(request)?.format(None)?;
//!     println!("system: {:?}", formatted.system_content()?);
//!     println!("messages: {}", formatted.llm_prompt().to_json()?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod prompts;
pub mod recording;
pub mod resolver;
pub mod standards;
pub mod template;
pub mod types;
pub mod utils;

pub use error::{PromptError, Result};

/// Commonly used types
pub mod prelude {
    pub use crate::config::PromptsConfig;
    pub use crate::error::{ErrorCategory, PromptError};
    pub use crate::prompts::{
        BindRequest, BoundPrompt, FormattedPrompt, Prompts, TemplateMessage, TemplatePrompt,
    };
    pub use crate::recording::{CallInfo, RecordPayload, ResponseInfo, UsageTokens};
    pub use crate::resolver::{
        FilesystemTemplateResolver, InMemoryTemplateResolver, TemplateDto, TemplateResolver,
    };
    pub use crate::standards::{Adapter, Flavor, LlmAdapter, WireContent};
    pub use crate::types::{
        ChatMessage, ContentPart, GeminiPart, MediaInput, MediaInputCollection, MediaSlot,
        MediaType, MessageContent, PromptInfo, PromptVersionInfo, ToolSchema,
    };
}

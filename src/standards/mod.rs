//! Provider wire formats
//!
//! One adapter per LLM wire protocol, selected by [`Flavor`]:
//! - `openai_chat` → [`OpenAiAdapter`]
//! - `anthropic_chat` → [`AnthropicAdapter`]
//! - `gemini_chat` → [`GeminiNativeAdapter`] (feature `gemini-native`)
//! - `gemini_api_chat` → [`GeminiApiAdapter`]
//! - `amazon_bedrock_converse` / `bedrock_converse` → [`BedrockConverseAdapter`]
//! - `llama_3_chat` → [`Llama3Adapter`]
//! - `baseten_mistral_chat` → [`BasetenAdapter`]

pub mod adapter;
pub mod anthropic;
pub mod baseten;
pub mod bedrock;
pub mod flavor;
pub mod gemini;
pub mod llama3;
pub mod openai;
pub mod registry;

pub use adapter::{LlmAdapter, SystemHandling};
pub use anthropic::AnthropicAdapter;
pub use baseten::BasetenAdapter;
pub use bedrock::BedrockConverseAdapter;
pub use flavor::Flavor;
pub use gemini::GeminiApiAdapter;
#[cfg(feature = "gemini-native")]
pub use gemini::GeminiNativeAdapter;
pub use llama3::Llama3Adapter;
pub use openai::OpenAiAdapter;
pub use registry::{Adapter, WireContent};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PromptError;

/// Identifier selecting a provider adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Flavor {
    OpenAiChat,
    AnthropicChat,
    Llama3Chat,
    BasetenMistralChat,
    /// Gemini through typed content objects (`gemini-native` feature)
    GeminiChat,
    /// Gemini through plain JSON maps
    GeminiApiChat,
    BedrockConverse,
}

impl Flavor {
    pub const ALL: [Flavor; 7] = [
        Self::OpenAiChat,
        Self::AnthropicChat,
        Self::Llama3Chat,
        Self::BasetenMistralChat,
        Self::GeminiChat,
        Self::GeminiApiChat,
        Self::BedrockConverse,
    ];

    /// Canonical flavor name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAiChat => "openai_chat",
            Self::AnthropicChat => "anthropic_chat",
            Self::Llama3Chat => "llama_3_chat",
            Self::BasetenMistralChat => "baseten_mistral_chat",
            Self::GeminiChat => "gemini_chat",
            Self::GeminiApiChat => "gemini_api_chat",
            Self::BedrockConverse => "amazon_bedrock_converse",
        }
    }

    /// Provider recorded for prompts of this flavor
    pub fn provider(&self) -> &'static str {
        match self {
            Self::OpenAiChat => "openai",
            Self::AnthropicChat => "anthropic",
            Self::Llama3Chat => "sagemaker",
            Self::BasetenMistralChat => "baseten",
            Self::GeminiChat => "vertex",
            Self::GeminiApiChat => "gemini",
            Self::BedrockConverse => "bedrock",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flavor {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai_chat" => Ok(Self::OpenAiChat),
            "anthropic_chat" => Ok(Self::AnthropicChat),
            "llama_3_chat" => Ok(Self::Llama3Chat),
            "baseten_mistral_chat" => Ok(Self::BasetenMistralChat),
            "gemini_chat" => Ok(Self::GeminiChat),
            "gemini_api_chat" => Ok(Self::GeminiApiChat),
            "amazon_bedrock_converse" | "bedrock_converse" => Ok(Self::BedrockConverse),
            other => Err(PromptError::ConfigurationError(format!(
                "Unable to create adapter for flavor '{other}'."
            ))),
        }
    }
}

impl TryFrom<String> for Flavor {
    type Error = PromptError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Flavor> for String {
    fn from(flavor: Flavor) -> Self {
        flavor.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for flavor in Flavor::ALL {
            assert_eq!(flavor.as_str().parse::<Flavor>().unwrap(), flavor);
        }
    }

    #[test]
    fn bedrock_has_two_names() {
        assert_eq!("bedrock_converse".parse::<Flavor>().unwrap(), Flavor::BedrockConverse);
        assert_eq!(Flavor::BedrockConverse.provider(), "bedrock");
    }

    #[test]
    fn unknown_flavor_names_the_flavor() {
        let err = "cohere_chat".parse::<Flavor>().unwrap_err();
        assert_eq!(
            err,
            PromptError::ConfigurationError(
                "Unable to create adapter for flavor 'cohere_chat'.".to_string()
            )
        );
    }

    #[test]
    fn providers_match_flavors() {
        assert_eq!(Flavor::Llama3Chat.provider(), "sagemaker");
        assert_eq!(Flavor::GeminiChat.provider(), "vertex");
        assert_eq!(Flavor::GeminiApiChat.provider(), "gemini");
    }
}

//! Baseten-hosted models accept the canonical messages unchanged

use super::adapter::{LlmAdapter, SystemHandling};
use crate::error::Result;
use crate::types::ChatMessage;

#[derive(Debug, Clone, Copy, Default)]
pub struct BasetenAdapter;

impl LlmAdapter for BasetenAdapter {
    type Output = Vec<ChatMessage>;

    fn provider(&self) -> &'static str {
        "baseten"
    }

    fn system_handling(&self) -> SystemHandling {
        SystemHandling::Inline
    }

    fn to_llm_syntax(&self, messages: &[ChatMessage]) -> Result<Vec<ChatMessage>> {
        Ok(messages.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentPart, MediaType};

    #[test]
    fn identity() {
        let messages = vec![
            ChatMessage::system("s"),
            ChatMessage::structured("user", vec![ContentPart::url("a", MediaType::Video, "u")]),
        ];
        assert_eq!(BasetenAdapter.to_llm_syntax(&messages).unwrap(), messages);
    }
}

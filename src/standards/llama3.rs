//! Llama 3 flat prompt string

use super::adapter::{LlmAdapter, SystemHandling, visible_messages};
use crate::error::{PromptError, Result};
use crate::types::ChatMessage;

const BEGIN_OF_TEXT: &str = "<|begin_of_text|>";
const END_OF_TURN: &str = "<|eot_id|>";

#[derive(Debug, Clone, Copy, Default)]
pub struct Llama3Adapter;

fn header(role: &str) -> String {
    format!("<|start_header_id|>{role}<|end_header_id|>")
}

impl LlmAdapter for Llama3Adapter {
    type Output = String;

    fn provider(&self) -> &'static str {
        "sagemaker"
    }

    fn system_handling(&self) -> SystemHandling {
        SystemHandling::Inline
    }

    fn to_llm_syntax(&self, messages: &[ChatMessage]) -> Result<String> {
        let mut prompt = String::from(BEGIN_OF_TEXT);
        for message in visible_messages(messages, self.system_handling()) {
            let text = if message.is_empty() {
                ""
            } else {
                message.text().map_err(|_| {
                    PromptError::UnsupportedOperation(
                        "Llama 3 prompts only support plain text messages".to_string(),
                    )
                })?
            };
            prompt.push_str(&header(message.role().unwrap_or_default()));
            prompt.push('\n');
            prompt.push_str(text);
            prompt.push_str(END_OF_TURN);
        }
        prompt.push_str(&header("assistant"));
        Ok(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentPart;

    #[test]
    fn renders_headers_and_keeps_system() {
        let prompt = Llama3Adapter
            .to_llm_syntax(&[ChatMessage::system("Be brief"), ChatMessage::user("Hi")])
            .unwrap();
        assert_eq!(
            prompt,
            "<|begin_of_text|>\
             <|start_header_id|>system<|end_header_id|>\nBe brief<|eot_id|>\
             <|start_header_id|>user<|end_header_id|>\nHi<|eot_id|>\
             <|start_header_id|>assistant<|end_header_id|>"
        );
    }

    #[test]
    fn empty_message_renders_empty_body() {
        let prompt = Llama3Adapter
            .to_llm_syntax(&[ChatMessage::user("Hi"), ChatMessage::empty("assistant")])
            .unwrap();
        assert_eq!(
            prompt,
            "<|begin_of_text|>\
             <|start_header_id|>user<|end_header_id|>\nHi<|eot_id|>\
             <|start_header_id|>assistant<|end_header_id|>\n<|eot_id|>\
             <|start_header_id|>assistant<|end_header_id|>"
        );
    }

    #[test]
    fn structured_content_is_unsupported() {
        let err = Llama3Adapter
            .to_llm_syntax(&[ChatMessage::structured("user", vec![ContentPart::text("x")])])
            .unwrap_err();
        assert!(matches!(err, PromptError::UnsupportedOperation(_)));
    }

    #[test]
    fn tools_are_unsupported() {
        let err = Llama3Adapter.to_tool_schema_format(&[]).unwrap_err();
        assert_eq!(
            err,
            PromptError::UnsupportedOperation(
                "Tool schema format not supported for this model and provider.".into()
            )
        );
    }
}

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::content::{ContentPart, GeminiPart, MediaType};
use crate::error::{PromptError, Result};
use crate::utils::{base64_decode, base64_encode};

/// Message content - exactly one of the four canonical states
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    /// No content set
    Empty,
    /// Plain text
    Text(String),
    /// Ordered multi-part content
    Structured(Vec<ContentPart>),
    /// Provider-native message used verbatim (e.g. an LLM reply object)
    PassThrough(Value),
}

/// Canonical, provider-independent conversational turn
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    role: Option<String>,
    content: MessageContent,
    gemini_native: bool,
}

impl ChatMessage {
    /// Plain text message
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            content: MessageContent::Text(text.into()),
            gemini_native: false,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new("system", text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new("user", text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new("assistant", text)
    }

    /// Multi-part message
    pub fn structured(role: impl Into<String>, parts: Vec<ContentPart>) -> Self {
        Self {
            role: Some(role.into()),
            content: MessageContent::Structured(parts),
            gemini_native: false,
        }
    }

    /// Message whose parts already have the Gemini wire shape.
    ///
    /// Inline data is decoded into canonical base64 parts, so invalid
    /// base64 is rejected here rather than at formatting time.
    pub fn gemini(role: impl Into<String>, parts: Vec<GeminiPart>) -> Result<Self> {
        let parts = parts
            .into_iter()
            .map(|part| match part {
                GeminiPart::Text { text } => Ok(ContentPart::Text { text }),
                GeminiPart::InlineData { inline_data } => Ok(ContentPart::Base64 {
                    slot_name: String::new(),
                    media_type: MediaType::from_mime(&inline_data.mime_type),
                    data: base64_decode(&inline_data.data)?,
                    content_type: inline_data.mime_type,
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            role: Some(role.into()),
            content: MessageContent::Structured(parts),
            gemini_native: true,
        })
    }

    /// Opaque provider message; the role is read from its `role` key when present
    pub fn pass_through(value: Value) -> Self {
        let role = value
            .get("role")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            role,
            content: MessageContent::PassThrough(value),
            gemini_native: false,
        }
    }

    /// Message with no content
    pub fn empty(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            content: MessageContent::Empty,
            gemini_native: false,
        }
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_deref() == Some(role)
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub fn is_gemini_native(&self) -> bool {
        self.gemini_native
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.content, MessageContent::Empty)
    }

    pub fn is_text(&self) -> bool {
        matches!(self.content, MessageContent::Text(_))
    }

    pub fn is_structured(&self) -> bool {
        matches!(self.content, MessageContent::Structured(_))
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self.content, MessageContent::PassThrough(_))
    }

    /// Text of a plain message
    pub fn text(&self) -> Result<&str> {
        match &self.content {
            MessageContent::Text(text) => Ok(text),
            MessageContent::Structured(_) => Err(PromptError::IllegalState(
                "Message is not a string, use parts() instead".to_string(),
            )),
            MessageContent::PassThrough(_) => Err(PromptError::IllegalState(
                "Message is not a string, use pass_through_value() instead".to_string(),
            )),
            MessageContent::Empty => Err(empty_message()),
        }
    }

    /// Parts of a structured message
    pub fn parts(&self) -> Result<&[ContentPart]> {
        match &self.content {
            MessageContent::Structured(parts) => Ok(parts),
            MessageContent::Text(_) => Err(PromptError::IllegalState(
                "Message is not structured, use text() instead".to_string(),
            )),
            MessageContent::PassThrough(_) => Err(PromptError::IllegalState(
                "Message is not structured, use pass_through_value() instead".to_string(),
            )),
            MessageContent::Empty => Err(empty_message()),
        }
    }

    /// Value of a pass-through message
    pub fn pass_through_value(&self) -> Result<&Value> {
        match &self.content {
            MessageContent::PassThrough(value) => Ok(value),
            MessageContent::Text(_) => Err(PromptError::IllegalState(
                "Message is not a pass-through message, use text() instead".to_string(),
            )),
            MessageContent::Structured(_) => Err(PromptError::IllegalState(
                "Message is not a pass-through message, use parts() instead".to_string(),
            )),
            MessageContent::Empty => Err(empty_message()),
        }
    }

    /// Parts of a Gemini-native message in their wire shape
    pub fn gemini_parts(&self) -> Result<Vec<GeminiPart>> {
        if !self.gemini_native {
            return Err(PromptError::IllegalState(
                "Message is not a Gemini-native message".to_string(),
            ));
        }
        self.parts()?
            .iter()
            .map(|part| match part {
                ContentPart::Text { text } => Ok(GeminiPart::text(text.clone())),
                ContentPart::Base64 {
                    content_type, data, ..
                } => Ok(GeminiPart::inline_data(content_type.clone(), base64_encode(data))),
                ContentPart::Url { .. } => Err(mixed_gemini_content()),
            })
            .collect()
    }

    /// JSON form: `{role, content}`, `{role, parts}` for Gemini-native
    /// messages, or the pass-through value verbatim.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        match &self.content {
            MessageContent::PassThrough(value) => return value.clone(),
            _ if self.gemini_native => {
                let parts = self
                    .gemini_parts()
                    .ok()
                    .and_then(|parts| serde_json::to_value(parts).ok())
                    .unwrap_or(Value::Array(Vec::new()));
                insert_role(&mut map, &self.role);
                map.insert("parts".to_string(), parts);
            }
            MessageContent::Empty => {
                insert_role(&mut map, &self.role);
                map.insert("content".to_string(), Value::Null);
            }
            MessageContent::Text(text) => {
                insert_role(&mut map, &self.role);
                map.insert("content".to_string(), Value::String(text.clone()));
            }
            MessageContent::Structured(parts) => {
                insert_role(&mut map, &self.role);
                let parts = serde_json::to_value(parts).unwrap_or(Value::Array(Vec::new()));
                map.insert("content".to_string(), parts);
            }
        }
        Value::Object(map)
    }

    /// Parse the JSON form produced by [`ChatMessage::to_json`].
    ///
    /// Objects with keys other than `role` and `content` (or `role` and
    /// `parts`) are kept as pass-through messages.
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(map) = &value else {
            return Ok(Self::pass_through(value));
        };
        let canonical_keys = map.keys().all(|k| matches!(k.as_str(), "role" | "content"));
        let gemini_keys = map.contains_key("parts")
            && map.keys().all(|k| matches!(k.as_str(), "role" | "parts"));
        if !(canonical_keys || gemini_keys) || map.is_empty() {
            return Ok(Self::pass_through(value));
        }

        let role = match map.get("role") {
            None | Some(Value::Null) => None,
            Some(Value::String(role)) => Some(role.clone()),
            Some(other) => {
                return Err(PromptError::InvalidInput(format!(
                    "Message role must be a string, got {other}"
                )));
            }
        };

        // Provider-native parts (tool calls, function responses, ...) keep the
        // whole message as pass-through
        if gemini_keys {
            let parts = map.get("parts").cloned().unwrap_or(Value::Null);
            let Ok(parts) = serde_json::from_value::<Vec<GeminiPart>>(parts) else {
                return Ok(Self::pass_through(value));
            };
            let mut message = Self::gemini(String::new(), parts)?;
            message.role = role;
            return Ok(message);
        }

        let content = match map.get("content") {
            None | Some(Value::Null) => MessageContent::Empty,
            Some(Value::String(text)) => MessageContent::Text(text.clone()),
            Some(Value::Array(items)) => {
                let parts = items
                    .iter()
                    .cloned()
                    .map(serde_json::from_value)
                    .collect::<std::result::Result<Vec<ContentPart>, _>>();
                match parts {
                    Ok(parts) => MessageContent::Structured(parts),
                    Err(_) => return Ok(Self::pass_through(value)),
                }
            }
            Some(object @ Value::Object(_)) => {
                match serde_json::from_value::<ContentPart>(object.clone()) {
                    Ok(part) => MessageContent::Structured(vec![part]),
                    Err(_) => return Ok(Self::pass_through(value)),
                }
            }
            Some(other) => {
                return Err(PromptError::InvalidInput(format!(
                    "Unsupported message content: {other}"
                )));
            }
        };

        Ok(Self {
            role,
            content,
            gemini_native: false,
        })
    }
}

fn insert_role(map: &mut Map<String, Value>, role: &Option<String>) {
    if let Some(role) = role {
        map.insert("role".to_string(), Value::String(role.clone()));
    }
}

fn empty_message() -> PromptError {
    PromptError::IllegalState("Message has no content".to_string())
}

pub(crate) fn mixed_gemini_content() -> PromptError {
    PromptError::ConfigurationError(
        "Gemini-native message contains a media URL; mixed native and canonical content is not supported"
            .to_string(),
    )
}

impl Serialize for ChatMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChatMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrong_accessor_is_illegal_state() {
        let message = ChatMessage::structured("user", vec![ContentPart::text("hi")]);
        assert!(matches!(message.text(), Err(PromptError::IllegalState(_))));
        assert_eq!(message.parts().unwrap().len(), 1);

        let message = ChatMessage::user("hi");
        assert!(matches!(message.parts(), Err(PromptError::IllegalState(_))));
        assert!(matches!(
            message.pass_through_value(),
            Err(PromptError::IllegalState(_))
        ));

        let message = ChatMessage::empty("user");
        assert_eq!(
            message.text().unwrap_err(),
            PromptError::IllegalState("Message has no content".to_string())
        );
    }

    #[test]
    fn pass_through_takes_role_from_value() {
        let reply = json!({"role": "assistant", "content": "hi", "tool_calls": []});
        let message = ChatMessage::pass_through(reply.clone());
        assert_eq!(message.role(), Some("assistant"));
        assert_eq!(message.to_json(), reply);
    }

    #[test]
    fn serializes_text_and_structured_messages() {
        assert_eq!(
            serde_json::to_value(ChatMessage::user("hello")).unwrap(),
            json!({"role": "user", "content": "hello"})
        );
        let message = ChatMessage::structured(
            "user",
            vec![
                ContentPart::text("look"),
                ContentPart::url("img", MediaType::Image, "http://localhost/image"),
            ],
        );
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "look"},
                    {"type": "url", "slot_name": "img", "slot_type": "image", "url": "http://localhost/image"}
                ]
            })
        );
    }

    #[test]
    fn gemini_native_message_uses_parts_key() {
        let message = ChatMessage::gemini(
            "model",
            vec![GeminiPart::text("I can help"), GeminiPart::inline_data("image/png", "aGk=")],
        )
        .unwrap();
        assert!(message.is_gemini_native());
        assert_eq!(
            message.to_json(),
            json!({
                "role": "model",
                "parts": [
                    {"text": "I can help"},
                    {"inline_data": {"mime_type": "image/png", "data": "aGk="}}
                ]
            })
        );
        let parsed: ChatMessage = serde_json::from_value(message.to_json()).unwrap();
        assert_eq!(parsed, message);
    }

    #[test]
    fn gemini_native_rejects_invalid_base64() {
        let err = ChatMessage::gemini("user", vec![GeminiPart::inline_data("image/png", "%%%")])
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidInput(_)));
    }

    #[test]
    fn deserializes_object_content_as_single_part() {
        let message: ChatMessage = serde_json::from_value(json!({
            "role": "user",
            "content": {"type": "text", "text": "only part"}
        }))
        .unwrap();
        assert_eq!(message.parts().unwrap(), &[ContentPart::text("only part")]);
    }

    #[test]
    fn deserializes_null_content_as_empty() {
        let message: ChatMessage =
            serde_json::from_value(json!({"role": "assistant", "content": null})).unwrap();
        assert!(message.is_empty());
        assert_eq!(message.role(), Some("assistant"));
    }

    #[test]
    fn provider_native_parts_make_a_pass_through_message() {
        let reply = json!({
            "role": "assistant",
            "content": [
                {"type": "text", "text": "Let me check."},
                {"type": "tool_use", "id": "toolu_01", "name": "lookup_order", "input": {"order_id": "42"}}
            ]
        });
        let message: ChatMessage = serde_json::from_value(reply.clone()).unwrap();
        assert!(message.is_pass_through());
        assert_eq!(message.role(), Some("assistant"));
        assert_eq!(message.to_json(), reply);

        let result = json!({
            "role": "user",
            "content": {"type": "tool_result", "tool_use_id": "toolu_01", "content": "shipped"}
        });
        let message: ChatMessage = serde_json::from_value(result.clone()).unwrap();
        assert_eq!(message.pass_through_value().unwrap(), &result);

        let gemini_call = json!({
            "role": "model",
            "parts": [{"functionCall": {"name": "lookup_order", "args": {"order_id": "42"}}}]
        });
        let message: ChatMessage = serde_json::from_value(gemini_call.clone()).unwrap();
        assert!(message.is_pass_through());
        assert!(!message.is_gemini_native());
        assert_eq!(message.to_json(), gemini_call);
    }

    #[test]
    fn unknown_keys_make_a_pass_through_message() {
        let reply = json!({"role": "assistant", "content": null, "tool_calls": [{"id": "1"}]});
        let message: ChatMessage = serde_json::from_value(reply.clone()).unwrap();
        assert!(message.is_pass_through());
        assert_eq!(message.pass_through_value().unwrap(), &reply);
    }
}

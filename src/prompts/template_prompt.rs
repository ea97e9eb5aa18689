//! Templates and the binder that turns them into concrete messages

use serde_json::{Map, Value};

use super::bound::BoundPrompt;
use crate::error::{PromptError, Result};
use crate::template::{self, Partials};
use crate::types::{
    ChatMessage, ContentPart, MediaInputCollection, MediaSlot, MessageContent, PromptInfo,
    ToolSchema,
};

/// One entry of a template
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateMessage {
    /// Literal message whose text may contain placeholders
    Message {
        message: ChatMessage,
        media_slots: Vec<MediaSlot>,
    },
    /// Splice point for caller-supplied conversation history
    History,
}

impl TemplateMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Message {
            message: ChatMessage::new(role, content),
            media_slots: Vec::new(),
        }
    }

    pub fn with_media(
        role: impl Into<String>,
        content: impl Into<String>,
        media_slots: Vec<MediaSlot>,
    ) -> Self {
        Self::Message {
            message: ChatMessage::new(role, content),
            media_slots,
        }
    }

    pub fn history() -> Self {
        Self::History
    }

    pub fn is_history(&self) -> bool {
        matches!(self, Self::History)
    }
}

/// Inputs for [`TemplatePrompt::bind`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindRequest {
    pub variables: Map<String, Value>,
    pub history: Option<Vec<ChatMessage>>,
    pub media_inputs: Option<MediaInputCollection>,
    pub partials: Partials,
}

impl BindRequest {
    pub fn new(variables: Map<String, Value>) -> Self {
        Self {
            variables,
            ..Default::default()
        }
    }

    /// Variables from a JSON object
    pub fn try_from_json(variables: Value) -> Result<Self> {
        match variables {
            Value::Object(map) => Ok(Self::new(map)),
            other => Err(PromptError::InvalidInput(format!(
                "Template variables must be a JSON object, got {other}"
            ))),
        }
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_media_inputs(mut self, media_inputs: MediaInputCollection) -> Self {
        self.media_inputs = Some(media_inputs);
        self
    }

    pub fn with_partial(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.partials.insert(name.into(), source.into());
        self
    }

    /// Add partials that this request does not already define
    pub fn with_default_partials(mut self, defaults: &Partials) -> Self {
        for (name, source) in defaults {
            self.partials
                .entry(name.clone())
                .or_insert_with(|| source.clone());
        }
        self
    }
}

/// A resolved prompt template, ready to bind
#[derive(Debug, Clone, PartialEq)]
pub struct TemplatePrompt {
    prompt_info: PromptInfo,
    messages: Vec<TemplateMessage>,
    tool_schema: Option<Vec<ToolSchema>>,
    output_schema: Option<Value>,
}

impl TemplatePrompt {
    pub fn new(prompt_info: PromptInfo, messages: Vec<TemplateMessage>) -> Self {
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

    pub fn messages(&self) -> &[TemplateMessage] {
        &self.messages
    }

    pub fn tool_schema(&self) -> Option<&[ToolSchema]> {
        self.tool_schema.as_deref()
    }

    pub fn output_schema(&self) -> Option<&Value> {
        self.output_schema.as_ref()
    }

    pub fn has_history_placeholder(&self) -> bool {
        self.messages.iter().any(TemplateMessage::is_history)
    }

    /// Substitute variables, splice history and attach media.
    ///
    /// Messages keep template order with history expanded in place. A literal
    /// message stays plain text unless at least one of its media slots
    /// matched an input, in which case it becomes structured content: the
    /// rendered text followed by one part per matched slot.
    pub fn bind(&self, request: BindRequest) -> Result<BoundPrompt> {
        let name = &self.prompt_info.template_name;

        let mut literal_texts = Vec::with_capacity(self.messages.len());
        for entry in &self.messages {
            if let TemplateMessage::Message { message, .. } = entry {
                match message.content() {
                    MessageContent::Text(text) if !message.is_gemini_native() => {
                        literal_texts.push(text.as_str())
                    }
                    _ => {
                        return Err(PromptError::ConfigurationError(
                            "Structured or pass-through messages are not allowed when binding a prompt"
                                .to_string(),
                        ));
                    }
                }
            }
        }

        let has_placeholder = self.has_history_placeholder();
        if request.history.is_some() && !has_placeholder {
            return Err(PromptError::ConfigurationError(format!(
                "Received history but prompt '{name}' does not have a history placeholder."
            )));
        }
        if has_placeholder && request.history.is_none() {
            tracing::warn!(
                "Prompt '{}' has a history placeholder but no history was provided.",
                name
            );
        }

        template::validate_variables(&request.variables)?;

        let BindRequest {
            variables,
            history,
            media_inputs,
            partials,
        } = request;
        let history = history.unwrap_or_default();
        let mut texts = literal_texts.into_iter();
        let mut bound = Vec::with_capacity(self.messages.len());

        for entry in &self.messages {
            match entry {
                TemplateMessage::History => bound.extend(history.iter().cloned()),
                TemplateMessage::Message {
                    message,
                    media_slots,
                } => {
                    let source = texts.next().unwrap_or_default();
                    let rendered = template::render(source, &variables, &partials)?;
                    let role = message.role().unwrap_or_default();

                    let media_parts: Vec<ContentPart> = match &media_inputs {
                        Some(inputs) => media_slots
                            .iter()
                            .filter_map(|slot| {
                                inputs
                                    .get(&slot.placeholder_name)
                                    .map(|input| input.to_content_part(slot))
                            })
                            .collect(),
                        None => Vec::new(),
                    };

                    if media_parts.is_empty() {
                        bound.push(ChatMessage::new(role, rendered));
                    } else {
                        let mut parts = Vec::with_capacity(media_parts.len() + 1);
                        parts.push(ContentPart::text(rendered));
                        parts.extend(media_parts);
                        bound.push(ChatMessage::structured(role, parts));
                    }
                }
            }
        }

        let mut prompt = BoundPrompt::new(self.prompt_info.clone(), bound);
        if let Some(tool_schema) = &self.tool_schema {
            prompt = prompt.with_tool_schema(tool_schema.clone());
        }
        if let Some(output_schema) = &self.output_schema {
            prompt = prompt.with_output_schema(output_schema.clone());
        }
        Ok(prompt)
    }
}

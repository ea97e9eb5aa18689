//! Template documents as stored on disk or returned by the prompt service

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{PromptError, Result};
use crate::types::{MediaSlot, ToolSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDto {
    pub prompt_template_id: String,
    pub prompt_template_version_id: String,
    pub prompt_template_name: String,
    pub content: Vec<TemplateMessageDto>,
    pub metadata: TemplateMetadata,
    #[serde(default)]
    pub format_version: u32,
    #[serde(default)]
    pub project_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tool_schema: Vec<ToolSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
}

/// A message entry, or a `{"kind": "history"}` marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateMessageDto {
    Kind {
        kind: String,
    },
    Message {
        role: String,
        content: String,
        #[serde(default, deserialize_with = "null_as_default")]
        media_slots: Vec<MediaSlot>,
    },
}

impl TemplateMessageDto {
    pub fn message(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Message {
            role: role.into(),
            content: content.into(),
            media_slots: Vec::new(),
        }
    }

    pub fn history() -> Self {
        Self::Kind {
            kind: "history".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub flavor: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_info: Option<Map<String, Value>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Older template files carry their messages as a JSON string and keep the
/// model inside the parameters.
#[derive(Debug, Deserialize)]
struct LegacyTemplate {
    prompt_template_id: String,
    prompt_template_version_id: String,
    name: String,
    content: String,
    #[serde(default)]
    metadata: LegacyMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct LegacyMetadata {
    #[serde(default)]
    flavor_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    params: Map<String, Value>,
}

/// Prompt editor role names to canonical ones
pub(crate) fn translate_role(role: &str) -> String {
    match role {
        "Human" | "human" => "user".to_string(),
        "Assistant" => "assistant".to_string(),
        "System" => "system".to_string(),
        other => other.to_string(),
    }
}

fn translate_roles(content: Vec<TemplateMessageDto>) -> Vec<TemplateMessageDto> {
    content
        .into_iter()
        .map(|message| match message {
            TemplateMessageDto::Message {
                role,
                content,
                media_slots,
            } => TemplateMessageDto::Message {
                role: translate_role(&role),
                content,
                media_slots,
            },
            kind => kind,
        })
        .collect()
}

/// Parse a template file in any supported format
pub fn parse_template_file(text: &str, project_id: &str) -> Result<TemplateDto> {
    let value: Value = serde_json::from_str(text)?;
    let format_version = value
        .get("format_version")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let mut dto = match format_version {
        2 | 3 => serde_json::from_value::<TemplateDto>(value)?,
        _ => from_legacy(serde_json::from_value(value)?)?,
    };
    dto.project_id = project_id.to_string();
    dto.content = translate_roles(dto.content);
    Ok(dto)
}

fn from_legacy(legacy: LegacyTemplate) -> Result<TemplateDto> {
    let LegacyTemplate {
        prompt_template_id,
        prompt_template_version_id,
        name,
        content,
        metadata,
    } = legacy;

    let flavor = metadata
        .flavor_name
        .filter(|flavor| !flavor.is_empty())
        .ok_or_else(|| {
            PromptError::ConfigurationError(format!(
                "Flavor for prompt {name} must be configured. Unable to fulfill request."
            ))
        })?;
    let model = metadata
        .params
        .get("model")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            PromptError::ConfigurationError(format!(
                "Model for prompt {name} must be configured. Unable to fulfill request."
            ))
        })?;

    let messages: Vec<TemplateMessageDto> = serde_json::from_str(&content)?;

    Ok(TemplateDto {
        prompt_template_id,
        prompt_template_version_id,
        prompt_template_name: name,
        content: messages,
        metadata: TemplateMetadata {
            provider: None,
            model: Some(model),
            flavor: Some(flavor),
            params: metadata.params,
            provider_info: None,
        },
        format_version: 1,
        project_id: String::new(),
        tool_schema: Vec::new(),
        output_schema: None,
    })
}

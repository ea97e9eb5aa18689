//! Identity and model metadata of a prompt template version

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata recorded with a resolved template
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PromptInfo {
    pub prompt_template_id: String,
    pub prompt_template_version_id: String,
    pub template_name: String,
    pub environment: String,
    /// Model parameters (temperature, max_tokens, ...), never containing `model`
    #[serde(default)]
    pub model_parameters: Map<String, Value>,
    pub provider: String,
    pub model: String,
    pub flavor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_info: Option<Map<String, Value>>,
}

impl PromptInfo {
    /// Info for an ad-hoc prompt that was not fetched from a template source
    pub fn for_flavor(
        template_name: impl Into<String>,
        flavor_name: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let flavor_name = flavor_name.into();
        let provider = flavor_name
            .parse::<crate::standards::Flavor>()
            .map(|flavor| flavor.provider().to_string())
            .unwrap_or_default();
        Self {
            template_name: template_name.into(),
            flavor_name,
            provider,
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn version_info(&self) -> PromptVersionInfo {
        PromptVersionInfo {
            prompt_template_version_id: self.prompt_template_version_id.clone(),
            environment: self.environment.clone(),
        }
    }
}

/// The part of [`PromptInfo`] the recording collaborator needs
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptVersionInfo {
    pub prompt_template_version_id: String,
    pub environment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_flavor_resolves_provider() {
        let info = PromptInfo::for_flavor("greeting", "gemini_api_chat", "gemini-2.0-flash");
        assert_eq!(info.provider, "gemini");
        assert_eq!(info.flavor_name, "gemini_api_chat");

        let info = PromptInfo::for_flavor("greeting", "not_a_flavor", "m");
        assert_eq!(info.provider, "");
    }

    #[test]
    fn version_info_copies_identity() {
        let info = PromptInfo {
            prompt_template_version_id: "v1".into(),
            environment: "prod".into(),
            ..Default::default()
        };
        assert_eq!(
            info.version_info(),
            PromptVersionInfo {
                prompt_template_version_id: "v1".into(),
                environment: "prod".into()
            }
        );
    }
}

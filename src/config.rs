//! Configuration for the [`Prompts`](crate::prompts::Prompts) facade

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::template::Partials;

pub const DEFAULT_ENVIRONMENT: &str = "latest";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// Environment used when a lookup does not name one
    pub default_environment: String,
    /// Root directory containing `freeplay/prompts`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_directory: Option<PathBuf>,
    /// Partials available to every bind
    pub partials: Partials,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            default_environment: DEFAULT_ENVIRONMENT.to_string(),
            templates_directory: None,
            partials: Partials::new(),
        }
    }
}

impl PromptsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_default_environment(mut self, environment: impl Into<String>) -> Self {
        self.default_environment = environment.into();
        self
    }

    pub fn with_templates_directory(mut self, directory: impl AsRef<Path>) -> Self {
        self.templates_directory = Some(directory.as_ref().to_path_buf());
        self
    }

    pub fn with_partial(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.partials.insert(name.into(), source.into());
        self
    }

    /// `explicit` if given, otherwise the default environment
    pub fn environment<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit.unwrap_or(&self.default_environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromptError;

    #[test]
    fn defaults_to_latest() {
        let config = PromptsConfig::default();
        assert_eq!(config.environment(None), "latest");
        assert_eq!(config.environment(Some("prod")), "prod");
    }

    #[test]
    fn parses_json_and_ignores_unknown_keys() {
        let config = PromptsConfig::from_json_str(
            r#"{"templates_directory": "/srv/prompts", "partials": {"sig": "-- Bot"}, "extra": 1}"#,
        )
        .unwrap();
        assert_eq!(config.default_environment, "latest");
        assert_eq!(config.templates_directory, Some(PathBuf::from("/srv/prompts")));
        assert_eq!(config.partials["sig"], "-- Bot");
    }

    #[test]
    fn invalid_json_is_json_error() {
        let err = PromptsConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, PromptError::JsonError(_)));
    }

    #[test]
    fn builders_compose() {
        let config = PromptsConfig::new()
            .with_default_environment("staging")
            .with_templates_directory("/tmp/t")
            .with_partial("a", "b");
        assert_eq!(config.environment(None), "staging");
        assert_eq!(config.partials.len(), 1);
    }
}

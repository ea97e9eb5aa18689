use async_trait::async_trait;

use super::TemplateResolver;
use super::dto::TemplateDto;
use crate::error::{PromptError, Result};

/// Templates held in memory, keyed by environment
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateResolver {
    templates: Vec<(String, TemplateDto)>,
}

impl InMemoryTemplateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template; one with the same project, environment and name is replaced
    pub fn insert(&mut self, environment: impl Into<String>, template: TemplateDto) {
        let environment = environment.into();
        match self.templates.iter_mut().find(|(env, existing)| {
            *env == environment
                && existing.project_id == template.project_id
                && existing.prompt_template_name == template.prompt_template_name
        }) {
            Some(slot) => slot.1 = template,
            None => self.templates.push((environment, template)),
        }
    }

    pub fn with_template(mut self, environment: impl Into<String>, template: TemplateDto) -> Self {
        self.insert(environment, template);
        self
    }
}

#[async_trait]
impl TemplateResolver for InMemoryTemplateResolver {
    async fn get_prompts(&self, project_id: &str, environment: &str) -> Result<Vec<TemplateDto>> {
        Ok(self
            .templates
            .iter()
            .filter(|(env, dto)| env == environment && dto.project_id == project_id)
            .map(|(_, dto)| dto.clone())
            .collect())
    }

    async fn get_prompt(
        &self,
        project_id: &str,
        template_name: &str,
        environment: &str,
    ) -> Result<TemplateDto> {
        self.templates
            .iter()
            .find(|(env, dto)| {
                env == environment
                    && dto.project_id == project_id
                    && dto.prompt_template_name == template_name
            })
            .map(|(_, dto)| dto.clone())
            .ok_or_else(|| {
                PromptError::ConfigurationError(format!(
                    "Could not find template {template_name} for project {project_id} and environment {environment}."
                ))
            })
    }

    async fn get_prompt_by_version_id(
        &self,
        project_id: &str,
        template_id: &str,
        version_id: &str,
    ) -> Result<TemplateDto> {
        self.templates
            .iter()
            .map(|(_, dto)| dto)
            .find(|dto| {
                dto.project_id == project_id
                    && dto.prompt_template_id == template_id
                    && dto.prompt_template_version_id == version_id
            })
            .cloned()
            .ok_or_else(|| {
                PromptError::ConfigurationError(format!(
                    "Could not find template version id {version_id} for project {project_id}"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::dto::{TemplateMessageDto, TemplateMetadata};

    fn dto(name: &str, version: &str) -> TemplateDto {
        TemplateDto {
            prompt_template_id: format!("{name}-id"),
            prompt_template_version_id: version.to_string(),
            prompt_template_name: name.to_string(),
            content: vec![TemplateMessageDto::message("user", "hi")],
            metadata: TemplateMetadata::default(),
            format_version: 2,
            project_id: "proj".to_string(),
            tool_schema: Vec::new(),
            output_schema: None,
        }
    }

    #[tokio::test]
    async fn looks_up_by_name_and_version() {
        let resolver = InMemoryTemplateResolver::new()
            .with_template("latest", dto("a", "v1"))
            .with_template("prod", dto("a", "v0"));

        assert_eq!(resolver.get_prompt("proj", "a", "prod").await.unwrap().prompt_template_version_id, "v0");
        assert_eq!(
            resolver.get_prompt_by_version_id("proj", "a-id", "v1").await.unwrap().prompt_template_version_id,
            "v1"
        );
        assert_eq!(resolver.get_prompts("proj", "latest").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn insert_replaces_same_name() {
        let resolver = InMemoryTemplateResolver::new()
            .with_template("latest", dto("a", "v1"))
            .with_template("latest", dto("a", "v2"));
        let all = resolver.get_prompts("proj", "latest").await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].prompt_template_version_id, "v2");
    }

    #[tokio::test]
    async fn missing_template_is_configuration_error() {
        let err = InMemoryTemplateResolver::new()
            .get_prompt("proj", "nope", "latest")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PromptError::ConfigurationError(
                "Could not find template nope for project proj and environment latest.".into()
            )
        );
    }
}

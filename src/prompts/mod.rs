//! Template retrieval, binding and formatting
//!
//! ```text
//! TemplateResolver → TemplatePrompt::bind → BoundPrompt::format → FormattedPrompt
//! ```
//!
//! [`Prompts`] wires the three steps together for the common case.

pub mod bound;
pub mod formatted;
pub mod template_prompt;

pub use bound::BoundPrompt;
pub use formatted::FormattedPrompt;
pub use template_prompt::{BindRequest, TemplateMessage, TemplatePrompt};

use crate::config::PromptsConfig;
use crate::error::{PromptError, Result};
use crate::resolver::{FilesystemTemplateResolver, TemplateDto, TemplateMessageDto, TemplateResolver};
use crate::standards::{Flavor, WireContent};
use crate::types::PromptInfo;

/// Build a [`TemplatePrompt`] from a resolved document
pub fn template_from_dto(dto: TemplateDto, environment: &str) -> Result<TemplatePrompt> {
    let name = dto.prompt_template_name;
    let metadata = dto.metadata;

    let flavor_name = metadata
        .flavor
        .filter(|flavor| !flavor.is_empty())
        .ok_or_else(|| {
            PromptError::ConfigurationError(format!(
                "Flavor for prompt {name} must be configured. Unable to fulfill request."
            ))
        })?;
    let model = metadata
        .model
        .filter(|model| !model.is_empty())
        .ok_or_else(|| {
            PromptError::ConfigurationError(format!(
                "Model for prompt {name} must be configured. Unable to fulfill request."
            ))
        })?;
    let flavor: Flavor = flavor_name.parse()?;

    let mut model_parameters = metadata.params;
    model_parameters.remove("model");

    let messages = dto
        .content
        .into_iter()
        .map(|message| match message {
            TemplateMessageDto::Kind { kind } if kind == "history" => Ok(TemplateMessage::History),
            TemplateMessageDto::Kind { kind } => Err(PromptError::ConfigurationError(format!(
                "Unknown message kind '{kind}' in prompt {name}"
            ))),
            TemplateMessageDto::Message {
                role,
                content,
                media_slots,
            } => Ok(TemplateMessage::with_media(role, content, media_slots)),
        })
        .collect::<Result<Vec<_>>>()?;

    let prompt_info = PromptInfo {
        prompt_template_id: dto.prompt_template_id,
        prompt_template_version_id: dto.prompt_template_version_id,
        template_name: name,
        environment: environment.to_string(),
        model_parameters,
        provider: flavor.provider().to_string(),
        model,
        flavor_name,
        provider_info: metadata.provider_info,
    };

    let mut prompt = TemplatePrompt::new(prompt_info, messages);
    if !dto.tool_schema.is_empty() {
        prompt = prompt.with_tool_schema(dto.tool_schema);
    }
    if let Some(output_schema) = dto.output_schema {
        prompt = prompt.with_output_schema(output_schema);
    }
    Ok(prompt)
}

/// Entry point for fetching and formatting prompts
#[derive(Debug, Clone)]
pub struct Prompts<R> {
    resolver: R,
    config: PromptsConfig,
}

impl Prompts<FilesystemTemplateResolver> {
    /// Filesystem-backed prompts rooted at `config.templates_directory`
    pub fn from_config(config: PromptsConfig) -> Result<Self> {
        let directory = config.templates_directory.as_ref().ok_or_else(|| {
            PromptError::configuration("templates_directory must be set to read prompts from disk")
        })?;
        let resolver = FilesystemTemplateResolver::new(directory)?;
        Ok(Self { resolver, config })
    }
}

impl<R: TemplateResolver> Prompts<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_config(resolver, PromptsConfig::default())
    }

    pub fn with_config(resolver: R, config: PromptsConfig) -> Self {
        Self { resolver, config }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn config(&self) -> &PromptsConfig {
        &self.config
    }

    pub async fn get(
        &self,
        project_id: &str,
        template_name: &str,
        environment: Option<&str>,
    ) -> Result<TemplatePrompt> {
        let environment = self.config.environment(environment);
        let dto = self
            .resolver
            .get_prompt(project_id, template_name, environment)
            .await?;
        template_from_dto(dto, environment)
    }

    pub async fn get_all(
        &self,
        project_id: &str,
        environment: Option<&str>,
    ) -> Result<Vec<TemplatePrompt>> {
        let environment = self.config.environment(environment);
        self.resolver
            .get_prompts(project_id, environment)
            .await?
            .into_iter()
            .map(|dto| template_from_dto(dto, environment))
            .collect()
    }

    /// Version lookups carry no environment, so the default one is recorded
    pub async fn get_by_version_id(
        &self,
        project_id: &str,
        template_id: &str,
        version_id: &str,
    ) -> Result<TemplatePrompt> {
        let dto = self
            .resolver
            .get_prompt_by_version_id(project_id, template_id, version_id)
            .await?;
        template_from_dto(dto, &self.config.default_environment)
    }

    /// Fetch, bind and format in one step
    pub async fn get_formatted(
        &self,
        project_id: &str,
        template_name: &str,
        environment: Option<&str>,
        request: BindRequest,
        flavor: Option<&str>,
    ) -> Result<FormattedPrompt<WireContent>> {
        let template = self.get(project_id, template_name, environment).await?;
        template
            .bind(request.with_default_partials(&self.config.partials))?
            .format(flavor)
    }

    /// [`get_formatted`](Self::get_formatted) for a specific template version
    pub async fn get_formatted_by_version_id(
        &self,
        project_id: &str,
        template_id: &str,
        version_id: &str,
        request: BindRequest,
        flavor: Option<&str>,
    ) -> Result<FormattedPrompt<WireContent>> {
        let template = self
            .get_by_version_id(project_id, template_id, version_id)
            .await?;
        template
            .bind(request.with_default_partials(&self.config.partials))?
            .format(flavor)
    }
}

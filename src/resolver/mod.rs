//! Template sources
//!
//! A [`TemplateResolver`] fetches [`TemplateDto`] documents by name or by
//! version id. [`FilesystemTemplateResolver`] reads an exported prompts
//! directory; [`InMemoryTemplateResolver`] serves documents held in memory.

pub mod dto;
pub mod filesystem;
pub mod memory;

pub use dto::{TemplateDto, TemplateMessageDto, TemplateMetadata, parse_template_file};
pub use filesystem::FilesystemTemplateResolver;
pub use memory::InMemoryTemplateResolver;

use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait TemplateResolver: Send + Sync {
    /// Every template of a project in one environment
    async fn get_prompts(&self, project_id: &str, environment: &str) -> Result<Vec<TemplateDto>>;

    async fn get_prompt(
        &self,
        project_id: &str,
        template_name: &str,
        environment: &str,
    ) -> Result<TemplateDto>;

    async fn get_prompt_by_version_id(
        &self,
        project_id: &str,
        template_id: &str,
        version_id: &str,
    ) -> Result<TemplateDto>;
}

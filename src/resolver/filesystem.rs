//! Templates exported to a local directory
//!
//! Layout: `{root}/freeplay/prompts/{project_id}/{environment}/{name}.json`

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::TemplateResolver;
use super::dto::{TemplateDto, parse_template_file};
use crate::error::{PromptError, Result};

#[derive(Debug, Clone)]
pub struct FilesystemTemplateResolver {
    prompts_directory: PathBuf,
}

impl FilesystemTemplateResolver {
    /// Checks that `root` holds a `freeplay/prompts` directory
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(PromptError::ConfigurationError(format!(
                "Path for templates is not a directory. [{}]",
                root.display()
            )));
        }
        let prompts_directory = root.join("freeplay").join("prompts");
        if !prompts_directory.is_dir() {
            return Err(PromptError::ConfigurationError(format!(
                "Path for templates does not appear to be a prompts directory. [{}]",
                root.display()
            )));
        }
        Ok(Self { prompts_directory })
    }

    pub fn prompts_directory(&self) -> &Path {
        &self.prompts_directory
    }

    async fn project_directory(&self, project_id: &str) -> Result<PathBuf> {
        let path = self.prompts_directory.join(path_segment("project id", project_id)?);
        if is_dir(&path).await {
            Ok(path)
        } else {
            Err(PromptError::ConfigurationError(format!(
                "Could not find directory for project {project_id}."
            )))
        }
    }

    async fn environment_directory(&self, project_id: &str, environment: &str) -> Result<PathBuf> {
        let path = self
            .prompts_directory
            .join(path_segment("project id", project_id)?)
            .join(path_segment("environment", environment)?);
        if is_dir(&path).await {
            Ok(path)
        } else {
            Err(PromptError::ConfigurationError(format!(
                "Could not find directory for project {project_id} and environment {environment}."
            )))
        }
    }
}

/// Lookup keys name a single entry below their parent directory
fn path_segment<'a>(kind: &str, value: &'a str) -> Result<&'a str> {
    let escapes = value.is_empty()
        || value == "."
        || value.contains(['/', '\\'])
        || value.contains("..");
    if escapes {
        return Err(PromptError::ConfigurationError(format!(
            "Invalid {kind} '{value}'."
        )));
    }
    Ok(value)
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false)
}

/// `.json` files directly under `dir`, sorted by path
async fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") && entry.file_type().await?.is_file()
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

async fn read_template(path: &Path, project_id: &str) -> Result<TemplateDto> {
    let text = tokio::fs::read_to_string(path).await?;
    parse_template_file(&text, project_id)
}

#[async_trait]
impl TemplateResolver for FilesystemTemplateResolver {
    async fn get_prompts(&self, project_id: &str, environment: &str) -> Result<Vec<TemplateDto>> {
        tracing::debug!(project_id, environment, "loading templates from filesystem");
        let directory = self.environment_directory(project_id, environment).await?;
        let mut templates = Vec::new();
        for path in json_files(&directory).await? {
            templates.push(read_template(&path, project_id).await?);
        }
        Ok(templates)
    }

    async fn get_prompt(
        &self,
        project_id: &str,
        template_name: &str,
        environment: &str,
    ) -> Result<TemplateDto> {
        tracing::debug!(project_id, environment, template_name, "loading template from filesystem");
        path_segment("template name", template_name)?;
        let directory = self.environment_directory(project_id, environment).await?;
        let path = directory.join(format!("{template_name}.json"));
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(PromptError::ConfigurationError(format!(
                "Could not find template {template_name} for project {project_id} and environment {environment}."
            )));
        }
        read_template(&path, project_id).await
    }

    /// Searches every environment of the project; unreadable files are skipped
    async fn get_prompt_by_version_id(
        &self,
        project_id: &str,
        template_id: &str,
        version_id: &str,
    ) -> Result<TemplateDto> {
        tracing::debug!(project_id, template_id, version_id, "searching templates by version");
        let project_directory = self.project_directory(project_id).await?;

        let mut environments = Vec::new();
        let mut entries = tokio::fs::read_dir(&project_directory).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                environments.push(entry.path());
            }
        }
        environments.sort();

        for environment in environments {
            for path in json_files(&environment).await? {
                match read_template(&path, project_id).await {
                    Ok(dto)
                        if dto.prompt_template_id == template_id
                            && dto.prompt_template_version_id == version_id =>
                    {
                        return Ok(dto);
                    }
                    Ok(_) => {}
                    Err(error) => {
                        tracing::warn!(path = %path.display(), %error, "skipping unreadable template file");
                    }
                }
            }
        }

        Err(PromptError::ConfigurationError(format!(
            "Could not find template version id {version_id} for project {project_id} in local filesystem"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_root() {
        let err = FilesystemTemplateResolver::new("/definitely/not/here").unwrap_err();
        assert_eq!(
            err,
            PromptError::ConfigurationError(
                "Path for templates is not a directory. [/definitely/not/here]".into()
            )
        );
    }

    #[test]
    fn rejects_root_without_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let err = FilesystemTemplateResolver::new(dir.path()).unwrap_err();
        assert_eq!(
            err,
            PromptError::ConfigurationError(format!(
                "Path for templates does not appear to be a prompts directory. [{}]",
                dir.path().display()
            ))
        );
    }

    #[tokio::test]
    async fn lookup_keys_cannot_leave_their_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("freeplay/prompts/proj/latest")).unwrap();
        std::fs::write(dir.path().join("freeplay/prompts/proj/outside.json"), "{}").unwrap();
        let resolver = FilesystemTemplateResolver::new(dir.path()).unwrap();

        for name in ["../outside", "..\\outside", "nested/name", ""] {
            let err = resolver.get_prompt("proj", name, "latest").await.unwrap_err();
            assert_eq!(
                err,
                PromptError::ConfigurationError(format!("Invalid template name '{name}'."))
            );
        }
        assert_eq!(
            resolver.get_prompts("proj", "..").await.unwrap_err(),
            PromptError::ConfigurationError("Invalid environment '..'.".into())
        );
        assert_eq!(
            resolver.get_prompts("../proj", "latest").await.unwrap_err(),
            PromptError::ConfigurationError("Invalid project id '../proj'.".into())
        );
    }

    #[tokio::test]
    async fn missing_environment_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("freeplay/prompts/proj")).unwrap();
        let resolver = FilesystemTemplateResolver::new(dir.path()).unwrap();
        let err = resolver.get_prompt("proj", "x", "prod").await.unwrap_err();
        assert_eq!(
            err,
            PromptError::ConfigurationError(
                "Could not find directory for project proj and environment prod.".into()
            )
        );
    }

    #[tokio::test]
    async fn missing_project_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("freeplay/prompts")).unwrap();
        let resolver = FilesystemTemplateResolver::new(dir.path()).unwrap();
        let err = resolver
            .get_prompt_by_version_id("proj", "t", "v")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PromptError::ConfigurationError("Could not find directory for project proj.".into())
        );
    }
}

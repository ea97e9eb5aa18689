//! Filesystem template resolver against exported prompt fixtures.

use std::path::{Path, PathBuf};

use promptwire::prelude::*;
use promptwire::resolver::TemplateMessageDto;

const PROJECT_ID: &str = "475516c8-7be4-4d55-9388-535cef042981";

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn resolver() -> FilesystemTemplateResolver {
    FilesystemTemplateResolver::new(fixtures_dir()).expect("fixtures are a prompts directory")
}

#[tokio::test]
async fn reads_v3_template_by_name() {
    let dto = resolver()
        .get_prompt(PROJECT_ID, "support-agent", "latest")
        .await
        .unwrap();

    assert_eq!(dto.format_version, 3);
    assert_eq!(dto.project_id, PROJECT_ID);
    assert_eq!(dto.prompt_template_version_id, "e3f9b1a2-0c4d-4b6e-9f3a-7d2c1b0a9e8f");
    assert_eq!(dto.content[1], TemplateMessageDto::history());
    assert_eq!(dto.tool_schema.len(), 1);
    assert_eq!(dto.tool_schema[0].name, "lookup_order");
}

#[tokio::test]
async fn environments_are_separate() {
    let dto = resolver()
        .get_prompt(PROJECT_ID, "support-agent", "prod")
        .await
        .unwrap();
    assert_eq!(dto.format_version, 2);
    assert!(dto.tool_schema.is_empty());
    assert!(dto.output_schema.is_some());
}

#[tokio::test]
async fn lists_only_json_templates() {
    let mut names: Vec<String> = resolver()
        .get_prompts(PROJECT_ID, "latest")
        .await
        .unwrap()
        .into_iter()
        .map(|dto| dto.prompt_template_name)
        .collect();
    names.sort();
    assert_eq!(names, ["legacy-summarizer", "support-agent"]);
}

#[tokio::test]
async fn legacy_template_is_normalized() {
    let dto = resolver()
        .get_prompt(PROJECT_ID, "legacy-summarizer", "latest")
        .await
        .unwrap();
    assert_eq!(dto.metadata.flavor.as_deref(), Some("llama_3_chat"));
    assert_eq!(dto.metadata.model.as_deref(), Some("meta-llama-3-8b-instruct"));
    assert_eq!(dto.content[1], TemplateMessageDto::message("user", "{{text}}"));
}

#[tokio::test]
async fn finds_template_by_version_in_any_environment() {
    let dto = resolver()
        .get_prompt_by_version_id(
            PROJECT_ID,
            "5985c6bb-115c-4ca2-99bd-0ffeb917fca4",
            "0b7d2c4e-6a1f-4e3b-8c5d-2f9e1a7b3c6d",
        )
        .await
        .unwrap();
    assert_eq!(dto.metadata.flavor.as_deref(), Some("openai_chat"));
}

#[tokio::test]
async fn missing_lookups_name_what_was_missing() {
    let resolver = resolver();

    assert_eq!(
        resolver
            .get_prompt(PROJECT_ID, "nope", "latest")
            .await
            .unwrap_err(),
        PromptError::ConfigurationError(format!(
            "Could not find template nope for project {PROJECT_ID} and environment latest."
        ))
    );
    assert_eq!(
        resolver.get_prompts(PROJECT_ID, "staging").await.unwrap_err(),
        PromptError::ConfigurationError(format!(
            "Could not find directory for project {PROJECT_ID} and environment staging."
        ))
    );
    assert_eq!(
        resolver
            .get_prompt_by_version_id(PROJECT_ID, "t", "v")
            .await
            .unwrap_err(),
        PromptError::ConfigurationError(format!(
            "Could not find template version id v for project {PROJECT_ID} in local filesystem"
        ))
    );
}

#[tokio::test]
async fn unreadable_files_are_skipped_during_version_search() {
    let dir = tempfile::tempdir().unwrap();
    let env_dir = dir.path().join("freeplay/prompts/proj/latest");
    std::fs::create_dir_all(&env_dir).unwrap();
    std::fs::write(env_dir.join("broken.json"), "{ not json").unwrap();
    std::fs::copy(
        fixtures_dir()
            .join("freeplay/prompts")
            .join(PROJECT_ID)
            .join("prod/support-agent.json"),
        env_dir.join("support-agent.json"),
    )
    .unwrap();

    let resolver = FilesystemTemplateResolver::new(dir.path()).unwrap();
    let dto = resolver
        .get_prompt_by_version_id(
            "proj",
            "5985c6bb-115c-4ca2-99bd-0ffeb917fca4",
            "0b7d2c4e-6a1f-4e3b-8c5d-2f9e1a7b3c6d",
        )
        .await
        .unwrap();
    assert_eq!(dto.project_id, "proj");

    let err = resolver.get_prompt("proj", "broken", "latest").await.unwrap_err();
    assert!(matches!(err, PromptError::JsonError(_)));
}

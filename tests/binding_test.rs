//! Binding behavior: substitution, history splicing and media slots.

use promptwire::prelude::*;
use serde_json::json;
use tracing_test::traced_test;

fn prompt(messages: Vec<TemplateMessage>) -> TemplatePrompt {
    TemplatePrompt::new(
        PromptInfo::for_flavor("history-prompt", "openai_chat", "gpt-4o-mini"),
        messages,
    )
}

fn request(variables: serde_json::Value) -> BindRequest {
    BindRequest::try_from_json(variables).expect("variables object")
}

#[test]
fn plain_placeholders_are_replaced() {
    let bound = prompt(vec![TemplateMessage::new(
        "user",
        "Answer {{question}} in {{count}} words. Formal: {{formal}}",
    )])
    .bind(request(json!({"question": "why", "count": 3, "formal": false})))
    .unwrap();

    assert_eq!(
        bound.messages(),
        &[ChatMessage::user("Answer why in 3 words. Formal: false")]
    );
}

#[test]
fn missing_variable_fails_instead_of_rendering_empty() {
    let err = prompt(vec![TemplateMessage::new("user", "Hello {{name}}")])
        .bind(BindRequest::default())
        .unwrap_err();
    assert!(matches!(err, PromptError::TemplateError(_)));
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[test]
fn sections_repeat_per_element() {
    let template = prompt(vec![TemplateMessage::new(
        "user",
        "{{#items}}- {{name}}\n{{/items}}",
    )]);

    let bound = template
        .bind(request(json!({"items": [{"name": "a"}, {"name": "b"}, {"name": "c"}]})))
        .unwrap();
    assert_eq!(bound.messages()[0].text().unwrap(), "- a\n- b\n- c\n");

    let empty = template.bind(request(json!({"items": []}))).unwrap();
    assert_eq!(empty.messages()[0].text().unwrap(), "");
}

#[test]
fn null_variable_is_rejected() {
    let err = prompt(vec![TemplateMessage::new("user", "{{a}}")])
        .bind(request(json!({"a": null})))
        .unwrap_err();
    assert_eq!(
        err,
        PromptError::InvalidInput("Invalid value for key 'a': null is not allowed".into())
    );
}

#[test]
fn history_without_placeholder_always_fails() {
    for history in [vec![], vec![ChatMessage::user("earlier")]] {
        let err = prompt(vec![TemplateMessage::new("user", "hi")])
            .bind(BindRequest::default().with_history(history))
            .unwrap_err();
        assert!(matches!(err, PromptError::ConfigurationError(_)));
    }
}

#[traced_test]
#[test]
fn placeholder_without_history_warns_and_splices_nothing() {
    let bound = prompt(vec![
        TemplateMessage::new("system", "sys"),
        TemplateMessage::history(),
        TemplateMessage::new("user", "hi"),
    ])
    .bind(BindRequest::default())
    .unwrap();

    assert_eq!(
        bound.messages(),
        &[ChatMessage::system("sys"), ChatMessage::user("hi")]
    );
    assert!(logs_contain(
        "Prompt 'history-prompt' has a history placeholder but no history was provided."
    ));
}

#[test]
fn history_keeps_pass_through_replies() {
    let tool_reply = json!({
        "role": "assistant",
        "content": null,
        "tool_calls": [{"id": "call_1", "type": "function", "function": {"name": "lookup", "arguments": "{}"}}]
    });
    let history = vec![
        ChatMessage::user("find it"),
        ChatMessage::pass_through(tool_reply.clone()),
    ];

    let formatted = prompt(vec![
        TemplateMessage::history(),
        TemplateMessage::new("user", "thanks"),
    ])
    .bind(BindRequest::default().with_history(history))
    .unwrap()
    .format(None)
    .unwrap();

    assert_eq!(
        formatted.llm_prompt().as_messages().unwrap(),
        &[
            json!({"role": "user", "content": "find it"}),
            tool_reply,
            json!({"role": "user", "content": "thanks"}),
        ]
    );
}

#[test]
fn only_matched_slots_contribute_parts() {
    let template = prompt(vec![TemplateMessage::with_media(
        "user",
        "Compare {{what}}",
        vec![
            MediaSlot::new(MediaType::Image, "A"),
            MediaSlot::new(MediaType::Image, "B"),
        ],
    )]);
    let inputs = MediaInputCollection::new().with("B", MediaInput::url("https://example.com/b.png"));

    let bound = template
        .bind(request(json!({"what": "these"})).with_media_inputs(inputs))
        .unwrap();

    let parts = bound.messages()[0].parts().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], ContentPart::text("Compare these"));
    assert_eq!(
        parts[1],
        ContentPart::url("B", MediaType::Image, "https://example.com/b.png")
    );
}

#[test]
fn bound_structured_messages_cannot_be_rebound() {
    let bound = prompt(vec![TemplateMessage::with_media(
        "user",
        "pic",
        vec![MediaSlot::new(MediaType::Image, "img")],
    )])
    .bind(BindRequest::default().with_media_inputs(
        MediaInputCollection::new().with("img", MediaInput::url("https://example.com/i.png")),
    ))
    .unwrap();

    let rebound = TemplatePrompt::new(
        bound.prompt_info().clone(),
        bound
            .messages()
            .iter()
            .map(|message| TemplateMessage::Message {
                message: message.clone(),
                media_slots: Vec::new(),
            })
            .collect(),
    );
    let err = rebound.bind(BindRequest::default()).unwrap_err();
    assert!(matches!(err, PromptError::ConfigurationError(_)));
}

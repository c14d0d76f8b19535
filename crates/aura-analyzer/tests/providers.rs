//! Integration tests for `Analyzer` against wiremock vendor servers.

use std::collections::HashMap;
use std::env::VarError;
use std::time::Duration;

use aura_analyzer::{Analyzer, AnalyzerError};
use aura_core::{build_app_config, AppConfig, Sentiment};
use serde_json::json;
use wiremock::matchers::{any, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUNNY_REPLY: &str =
    r#"{"sentiment":{"type":"positive","score":0.9},"keywords":["love","sunny","day"]}"#;

fn config(vars: &[(&str, &str)]) -> AppConfig {
    let env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    build_app_config(|key| env.get(key).cloned().ok_or(VarError::NotPresent))
        .expect("test config should load")
}

fn openai_config(server: &MockServer) -> AppConfig {
    config(&[
        ("AI_PROVIDER", "openai"),
        ("OPENAI_API_KEY", "sk-test"),
        ("AURA_OPENAI_BASE_URL", server.uri().as_str()),
    ])
}

fn openai_reply(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}

#[tokio::test]
async fn openai_reply_is_returned_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.3,
            "max_tokens": 200
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply(SUNNY_REPLY)))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = Analyzer::from_config(&openai_config(&server)).expect("analyzer");
    let result = analyzer
        .analyze_text("I absolutely love this sunny day!")
        .await
        .expect("analysis should succeed");

    assert_eq!(result.sentiment.kind, "positive");
    assert!((result.sentiment.score - 0.9).abs() < f64::EPSILON);
    assert_eq!(result.keywords, vec!["love", "sunny", "day"]);
}

#[tokio::test]
async fn openai_request_carries_system_and_user_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply(SUNNY_REPLY)))
        .mount(&server)
        .await;

    let analyzer = Analyzer::from_config(&openai_config(&server)).expect("analyzer");
    analyzer
        .analyze_text("  what a lovely morning  ")
        .await
        .expect("analysis should succeed");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).expect("json body");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    let prompt = body["messages"][1]["content"].as_str().expect("prompt");
    assert!(prompt.contains("Text: \"what a lovely morning\""), "prompt: {prompt}");
}

#[tokio::test]
async fn anthropic_fenced_reply_is_unwrapped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("x-api-key", "sk-ant-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-3-haiku-20240307",
            "max_tokens": 200,
            "temperature": 0.3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [
                {"type": "text", "text": format!("```json\n{SUNNY_REPLY}\n```")}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = config(&[
        ("AI_PROVIDER", "anthropic"),
        ("CLAUDE_API_KEY", "sk-ant-test"),
        ("AURA_ANTHROPIC_BASE_URL", server.uri().as_str()),
    ]);
    let analyzer = Analyzer::from_config(&cfg).expect("analyzer");
    let result = analyzer
        .analyze_text("I absolutely love this sunny day!")
        .await
        .expect("analysis should succeed");

    assert_eq!(result.sentiment.kind, "positive");
    assert_eq!(result.keywords, vec!["love", "sunny", "day"]);
}

#[tokio::test]
async fn google_reply_missing_keywords_defaults_to_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-pro:generateContent"))
        .and(header("x-goog-api-key", "g-test"))
        .and(body_partial_json(json!({
            "generationConfig": {"temperature": 0.3, "maxOutputTokens": 200}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [
                    {"text": "{\"sentiment\": {\"type\": \"negative\", \"score\": 0.65}}"}
                ]}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = config(&[
        ("AI_PROVIDER", "google"),
        ("GOOGLE_API_KEY", "g-test"),
        ("AURA_GOOGLE_BASE_URL", server.uri().as_str()),
    ]);
    let analyzer = Analyzer::from_config(&cfg).expect("analyzer");
    let result = analyzer
        .analyze_text("The traffic this morning was awful")
        .await
        .expect("analysis should succeed");

    assert_eq!(result.sentiment.kind, "negative");
    assert!((result.sentiment.score - 0.65).abs() < f64::EPSILON);
    assert!(result.keywords.is_empty());
}

#[tokio::test]
async fn short_text_is_neutral_without_vendor_call() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let analyzer = Analyzer::from_config(&openai_config(&server)).expect("analyzer");
    for text in ["a", " ok ", "hé"] {
        let result = analyzer.analyze_text(text).await.expect("short text");
        assert_eq!(result.sentiment, Sentiment::neutral(), "input {text:?}");
        assert!(result.keywords.is_empty());
    }
}

#[tokio::test]
async fn blank_text_is_invalid_input() {
    let server = MockServer::start().await;
    let analyzer = Analyzer::from_config(&openai_config(&server)).expect("analyzer");

    for text in ["", "   ", "\n\t"] {
        let err = analyzer.analyze_text(text).await.unwrap_err();
        assert!(
            matches!(err, AnalyzerError::InvalidInput),
            "expected InvalidInput for {text:?}, got: {err:?}"
        );
    }
}

#[tokio::test]
async fn unknown_provider_fails_analyzable_requests() {
    let cfg = config(&[("AI_PROVIDER", "cohere")]);
    let analyzer = Analyzer::from_config(&cfg).expect("unknown provider still builds");
    assert_eq!(analyzer.provider_name(), "cohere");

    for text in ["hey", "This is a perfectly normal sentence."] {
        let err = analyzer.analyze_text(text).await.unwrap_err();
        assert!(
            matches!(err, AnalyzerError::Configuration(_)),
            "expected Configuration for {text:?}, got: {err:?}"
        );
        assert_eq!(err.to_string(), "Unknown AI provider: cohere");
    }
}

#[tokio::test]
async fn short_text_is_neutral_even_with_unknown_provider() {
    let cfg = config(&[("AI_PROVIDER", "cohere")]);
    let analyzer = Analyzer::from_config(&cfg).expect("unknown provider still builds");

    let result = analyzer.analyze_text("hi").await.expect("short text");
    assert_eq!(result.sentiment, Sentiment::neutral());
    assert!(result.keywords.is_empty());

    let err = analyzer.analyze_text("  ").await.unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidInput), "got: {err:?}");
}

#[tokio::test]
async fn missing_credential_fails_before_calling_vendor() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cfg = config(&[
        ("AI_PROVIDER", "anthropic"),
        ("AURA_ANTHROPIC_BASE_URL", server.uri().as_str()),
    ]);
    let analyzer = Analyzer::from_config(&cfg).expect("analyzer");
    let err = analyzer
        .analyze_text("Some text worth analyzing")
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            AnalyzerError::MissingCredential {
                vendor: "Anthropic",
                env_var: "ANTHROPIC_API_KEY"
            }
        ),
        "expected MissingCredential, got: {err:?}"
    );
}

#[tokio::test]
async fn vendor_error_status_is_a_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;

    let analyzer = Analyzer::from_config(&openai_config(&server)).expect("analyzer");
    let err = analyzer
        .analyze_text("Some text worth analyzing")
        .await
        .unwrap_err();

    match err {
        AnalyzerError::Provider {
            vendor,
            status,
            ref message,
        } => {
            assert_eq!(vendor, "OpenAI");
            assert_eq!(status, Some(401));
            assert!(message.contains("Incorrect API key provided"), "message: {message}");
        }
        other => panic!("expected Provider, got: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_reply_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(openai_reply("The sentiment here is clearly positive.")),
        )
        .mount(&server)
        .await;

    let analyzer = Analyzer::from_config(&openai_config(&server)).expect("analyzer");
    let err = analyzer
        .analyze_text("Some text worth analyzing")
        .await
        .unwrap_err();

    assert!(
        matches!(err, AnalyzerError::ResponseParse { vendor: "OpenAI", .. }),
        "expected ResponseParse, got: {err:?}"
    );
    assert_eq!(err.to_string(), "Failed to parse AI response");
}

#[tokio::test]
async fn empty_choices_is_a_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let analyzer = Analyzer::from_config(&openai_config(&server)).expect("analyzer");
    let err = analyzer
        .analyze_text("Some text worth analyzing")
        .await
        .unwrap_err();

    assert!(
        matches!(err, AnalyzerError::Provider { ref message, .. } if message == "response contained no text"),
        "expected empty-reply Provider error, got: {err:?}"
    );
}

#[tokio::test]
async fn anthropic_empty_text_block_is_a_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_2",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": "   "}]
        })))
        .mount(&server)
        .await;

    let cfg = config(&[
        ("AI_PROVIDER", "anthropic"),
        ("ANTHROPIC_API_KEY", "sk-ant-test"),
        ("AURA_ANTHROPIC_BASE_URL", server.uri().as_str()),
    ]);
    let analyzer = Analyzer::from_config(&cfg).expect("analyzer");
    let err = analyzer
        .analyze_text("Some text worth analyzing")
        .await
        .unwrap_err();

    assert!(
        matches!(err, AnalyzerError::Provider { vendor: "Anthropic", ref message, .. } if message == "response contained no text"),
        "expected empty-reply Provider error, got: {err:?}"
    );
}

#[tokio::test]
async fn openai_empty_content_is_a_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply("")))
        .mount(&server)
        .await;

    let analyzer = Analyzer::from_config(&openai_config(&server)).expect("analyzer");
    let err = analyzer
        .analyze_text("Some text worth analyzing")
        .await
        .unwrap_err();

    assert!(
        matches!(err, AnalyzerError::Provider { vendor: "OpenAI", ref message, .. } if message == "response contained no text"),
        "expected empty-reply Provider error, got: {err:?}"
    );
}

#[tokio::test]
async fn slow_vendor_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(openai_reply(SUNNY_REPLY))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let cfg = config(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("AURA_OPENAI_BASE_URL", server.uri().as_str()),
        ("AURA_PROVIDER_TIMEOUT_SECS", "1"),
    ]);
    let analyzer = Analyzer::from_config(&cfg).expect("analyzer");
    let err = analyzer
        .analyze_text("Some text worth analyzing")
        .await
        .unwrap_err();

    assert!(
        matches!(err, AnalyzerError::Timeout { vendor: "OpenAI", secs: 1 }),
        "expected Timeout, got: {err:?}"
    );
}

//! Anthropic messages API.

use serde::{Deserialize, Serialize};

use super::Connection;
use crate::error::AnalyzerError;
use crate::prompt::{MAX_OUTPUT_TOKENS, TEMPERATURE};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone)]
pub(crate) struct AnthropicAdapter {
    conn: Connection,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicAdapter {
    pub(super) fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub(super) async fn complete(&self, prompt: &str) -> Result<String, AnalyzerError> {
        let api_key = self.conn.api_key()?;
        let body = MessagesRequest {
            model: self.conn.model(),
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let request = self
            .conn
            .http
            .post(self.conn.url("messages"))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let response: MessagesResponse = self.conn.send(request).await?;
        response
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| self.conn.empty_reply())
    }
}

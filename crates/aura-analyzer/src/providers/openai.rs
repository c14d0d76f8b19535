//! OpenAI chat completions.

use serde::{Deserialize, Serialize};

use super::Connection;
use crate::error::AnalyzerError;
use crate::prompt::{MAX_OUTPUT_TOKENS, SYSTEM_PROMPT, TEMPERATURE};

#[derive(Debug, Clone)]
pub(crate) struct OpenAiAdapter {
    conn: Connection,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiAdapter {
    pub(super) fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub(super) async fn complete(&self, prompt: &str) -> Result<String, AnalyzerError> {
        let api_key = self.conn.api_key()?;
        let body = ChatRequest {
            model: self.conn.model(),
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        let request = self
            .conn
            .http
            .post(self.conn.url("chat/completions"))
            .bearer_auth(api_key)
            .json(&body);

        let response: ChatResponse = self.conn.send(request).await?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| self.conn.empty_reply())
    }
}

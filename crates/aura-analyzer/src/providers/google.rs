//! Google Gemini `generateContent`.

use serde::{Deserialize, Serialize};

use super::Connection;
use crate::error::AnalyzerError;
use crate::prompt::{MAX_OUTPUT_TOKENS, TEMPERATURE};

#[derive(Debug, Clone)]
pub(crate) struct GoogleAdapter {
    conn: Connection,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GoogleAdapter {
    pub(super) fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub(super) async fn complete(&self, prompt: &str) -> Result<String, AnalyzerError> {
        let api_key = self.conn.api_key()?;
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let path = format!("models/{}:generateContent", self.conn.model());
        let request = self
            .conn
            .http
            .post(self.conn.url(&path))
            .header("x-goog-api-key", api_key)
            .json(&body);

        let response: GenerateResponse = self.conn.send(request).await?;
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(self.conn.empty_reply());
        }
        Ok(text)
    }
}

//! Vendor adapters.
//!
//! Each adapter turns a prompt into the vendor's raw reply text. They share
//! one [`Connection`] shape: credential check first, then a single JSON POST
//! with no retries.

mod anthropic;
mod google;
mod openai;

use std::time::Duration;

use aura_core::{AppConfig, ProviderEndpoint, ProviderKind};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AnalyzerError;

pub(crate) use anthropic::AnthropicAdapter;
pub(crate) use google::GoogleAdapter;
pub(crate) use openai::OpenAiAdapter;

/// Build the shared outbound HTTP client.
///
/// # Errors
///
/// Returns [`AnalyzerError::HttpClient`] if the TLS backend cannot be set up.
pub(crate) fn build_http_client(timeout_secs: u64) -> Result<Client, AnalyzerError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("sentiment-aura/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(AnalyzerError::HttpClient)
}

/// The configured vendor, bound to its endpoint and credential.
#[derive(Debug, Clone)]
pub(crate) enum ProviderClient {
    OpenAi(OpenAiAdapter),
    Anthropic(AnthropicAdapter),
    Google(GoogleAdapter),
}

impl ProviderClient {
    pub(crate) fn new(kind: ProviderKind, config: &AppConfig, http: Client) -> Self {
        let conn = Connection {
            kind,
            http,
            api_key: config.credentials.get(kind).map(ToOwned::to_owned),
            endpoint: config.endpoint(kind).clone(),
            timeout_secs: config.provider_timeout_secs,
        };
        match kind {
            ProviderKind::OpenAi => Self::OpenAi(OpenAiAdapter::new(conn)),
            ProviderKind::Anthropic => Self::Anthropic(AnthropicAdapter::new(conn)),
            ProviderKind::Google => Self::Google(GoogleAdapter::new(conn)),
        }
    }

    pub(crate) fn kind(&self) -> ProviderKind {
        match self {
            Self::OpenAi(_) => ProviderKind::OpenAi,
            Self::Anthropic(_) => ProviderKind::Anthropic,
            Self::Google(_) => ProviderKind::Google,
        }
    }

    /// Send `prompt` to the vendor and return its trimmed reply text.
    pub(crate) async fn complete(&self, prompt: &str) -> Result<String, AnalyzerError> {
        let reply = match self {
            Self::OpenAi(adapter) => adapter.complete(prompt).await?,
            Self::Anthropic(adapter) => adapter.complete(prompt).await?,
            Self::Google(adapter) => adapter.complete(prompt).await?,
        };
        Ok(reply.trim().to_string())
    }
}

/// Everything an adapter needs to reach its vendor.
#[derive(Clone)]
pub(crate) struct Connection {
    kind: ProviderKind,
    http: Client,
    api_key: Option<String>,
    endpoint: ProviderEndpoint,
    timeout_secs: u64,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("kind", &self.kind)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl Connection {
    fn vendor(&self) -> &'static str {
        self.kind.vendor()
    }

    fn model(&self) -> &str {
        &self.endpoint.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint.base_url, path.trim_start_matches('/'))
    }

    /// The API key, or [`AnalyzerError::MissingCredential`] before any call is made.
    fn api_key(&self) -> Result<&str, AnalyzerError> {
        self.api_key
            .as_deref()
            .ok_or(AnalyzerError::MissingCredential {
                vendor: self.vendor(),
                env_var: self.kind.credential_var(),
            })
    }

    /// Send a prepared request and decode the vendor's success envelope.
    ///
    /// Non-2xx statuses become [`AnalyzerError::Provider`] carrying the
    /// vendor's own `error.message` when it sent one; a client-side timeout
    /// becomes [`AnalyzerError::Timeout`].
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, AnalyzerError> {
        tracing::debug!(vendor = self.vendor(), model = self.model(), "calling provider");

        let response = request.send().await.map_err(|e| self.transport_error(&e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            let detail = vendor_error_message(&body).unwrap_or_else(|| truncate(&body, 200));
            return Err(AnalyzerError::Provider {
                vendor: self.vendor(),
                status: Some(status.as_u16()),
                message: if detail.is_empty() {
                    status.to_string()
                } else {
                    format!("{status}: {detail}")
                },
            });
        }

        serde_json::from_str(&body).map_err(|e| AnalyzerError::Provider {
            vendor: self.vendor(),
            status: Some(status.as_u16()),
            message: format!("unexpected response body: {e}"),
        })
    }

    fn transport_error(&self, error: &reqwest::Error) -> AnalyzerError {
        if error.is_timeout() {
            return AnalyzerError::Timeout {
                vendor: self.vendor(),
                secs: self.timeout_secs,
            };
        }
        AnalyzerError::Provider {
            vendor: self.vendor(),
            status: error.status().map(|s| s.as_u16()),
            message: error.to_string(),
        }
    }

    fn empty_reply(&self) -> AnalyzerError {
        AnalyzerError::Provider {
            vendor: self.vendor(),
            status: None,
            message: "response contained no text".to_string(),
        }
    }
}

/// All three vendors report failures as `{"error": {"message": "..."}}`.
fn vendor_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.trim().chars().take(max_chars).collect()
}

//! Request handling: validate, dispatch, unwrap, normalize.

use aura_core::{AnalysisResult, AppConfig, ConfigError};

use crate::error::AnalyzerError;
use crate::normalize::parse_reply;
use crate::prompt::build_prompt;
use crate::providers::{build_http_client, ProviderClient};

/// Trimmed input shorter than this (in characters) is answered with a
/// neutral result without calling the vendor.
pub const MIN_ANALYZABLE_CHARS: usize = 3;

/// Sentiment analyzer bound to the provider selected at startup.
///
/// Built once from [`AppConfig`] and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct Analyzer {
    provider_name: String,
    provider: Option<ProviderClient>,
}

impl Analyzer {
    /// Build the analyzer for the configured provider.
    ///
    /// An unsupported `AI_PROVIDER` is not an error here: the service still
    /// starts and every analysis request reports the bad provider instead.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::HttpClient`] if the outbound HTTP client
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, AnalyzerError> {
        let provider = match config.provider_kind() {
            Ok(kind) => {
                let http = build_http_client(config.provider_timeout_secs)?;
                if config.credentials.get(kind).is_none() {
                    tracing::warn!(
                        provider = %kind,
                        env_var = kind.credential_var(),
                        "no API key configured for selected provider"
                    );
                }
                Some(ProviderClient::new(kind, config, http))
            }
            Err(e) => {
                tracing::warn!(
                    provider = %config.provider_name,
                    error = %e,
                    "unsupported AI provider configured"
                );
                None
            }
        };

        Ok(Self {
            provider_name: config.provider_name.clone(),
            provider,
        })
    }

    /// Configured provider name, as given in `AI_PROVIDER`.
    #[must_use]
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Classify `text` and extract its keywords.
    ///
    /// Empty input is rejected. Input shorter than [`MIN_ANALYZABLE_CHARS`]
    /// gets a neutral result with no vendor call, whatever the configured
    /// provider. Everything else resolves the provider and costs exactly one
    /// vendor round trip.
    ///
    /// # Errors
    ///
    /// - [`AnalyzerError::InvalidInput`] if `text` is blank.
    /// - [`AnalyzerError::Configuration`] if the provider is unsupported.
    /// - [`AnalyzerError::MissingCredential`], [`AnalyzerError::Provider`] or
    ///   [`AnalyzerError::Timeout`] if the vendor call cannot be made or fails.
    /// - [`AnalyzerError::ResponseParse`] if the reply is not a JSON object.
    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisResult, AnalyzerError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AnalyzerError::InvalidInput);
        }

        let chars = text.chars().count();
        if chars < MIN_ANALYZABLE_CHARS {
            tracing::debug!(chars, "input too short; returning neutral");
            return Ok(AnalysisResult::neutral());
        }

        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| ConfigError::UnknownProvider(self.provider_name.clone()))?;

        let vendor = provider.kind().vendor();
        let reply = provider.complete(&build_prompt(text)).await?;
        tracing::debug!(vendor, reply = %reply, "provider reply received");

        parse_reply(vendor, &reply)
    }
}

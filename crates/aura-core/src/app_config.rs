use std::net::SocketAddr;
use std::str::FromStr;

use serde::Serialize;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// The closed set of LLM vendors the service can delegate analysis to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Google,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [Self::OpenAi, Self::Anthropic, Self::Google];

    /// Configuration name, as accepted in `AI_PROVIDER`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
        }
    }

    /// Vendor name used in error messages and logs.
    #[must_use]
    pub fn vendor(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Google => "Google",
        }
    }

    /// Primary environment variable holding this vendor's API key.
    #[must_use]
    pub fn credential_var(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Google => "GOOGLE_API_KEY",
        }
    }

    /// Alternate variable consulted when the primary one is unset or empty.
    #[must_use]
    pub fn fallback_credential_var(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_KEY",
            Self::Anthropic => "CLAUDE_API_KEY",
            Self::Google => "GEMINI_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "google" => Ok(Self::Google),
            _ => Err(ConfigError::UnknownProvider(s.to_string())),
        }
    }
}

/// Where and with which model a vendor is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoint {
    pub base_url: String,
    pub model: String,
}

/// API keys for every supported vendor. Any of them may be absent.
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    pub openai: Option<String>,
    pub anthropic: Option<String>,
    pub google: Option<String>,
}

/// Presence flags for each credential; safe to expose over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CredentialStatus {
    pub openai: bool,
    pub anthropic: bool,
    pub google: bool,
}

impl ProviderCredentials {
    #[must_use]
    pub fn get(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::OpenAi => self.openai.as_deref(),
            ProviderKind::Anthropic => self.anthropic.as_deref(),
            ProviderKind::Google => self.google.as_deref(),
        }
    }

    #[must_use]
    pub fn status(&self) -> CredentialStatus {
        CredentialStatus {
            openai: self.openai.is_some(),
            anthropic: self.anthropic.is_some(),
            google: self.google.is_some(),
        }
    }
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "[redacted]");
        f.debug_struct("ProviderCredentials")
            .field("openai", &redact(&self.openai))
            .field("anthropic", &redact(&self.anthropic))
            .field("google", &redact(&self.google))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub debug: bool,
    pub log_level: String,
    /// Lower-cased `AI_PROVIDER` value; may name an unsupported vendor.
    pub provider_name: String,
    pub credentials: ProviderCredentials,
    pub allowed_origins: Vec<String>,
    pub provider_timeout_secs: u64,
    pub openai: ProviderEndpoint,
    pub anthropic: ProviderEndpoint,
    pub google: ProviderEndpoint,
}

impl AppConfig {
    /// Resolves the configured provider name to a supported vendor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownProvider`] when `AI_PROVIDER` names a
    /// vendor this service has no adapter for.
    pub fn provider_kind(&self) -> Result<ProviderKind, ConfigError> {
        self.provider_name.parse()
    }

    #[must_use]
    pub fn endpoint(&self, kind: ProviderKind) -> &ProviderEndpoint {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::Google => &self.google,
        }
    }
}

use aura_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Text cannot be empty")]
    InvalidInput,

    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("{vendor} API key is not configured (set {env_var})")]
    MissingCredential {
        vendor: &'static str,
        env_var: &'static str,
    },

    #[error("{vendor} API error: {message}")]
    Provider {
        vendor: &'static str,
        status: Option<u16>,
        message: String,
    },

    #[error("{vendor} API request timed out after {secs}s")]
    Timeout { vendor: &'static str, secs: u64 },

    /// The vendor replied, but not with a JSON object we can read.
    ///
    /// `reason` carries the parser diagnostic for logs; the display text is
    /// fixed so it can be shown to API callers as-is.
    #[error("Failed to parse AI response")]
    ResponseParse {
        vendor: &'static str,
        reason: String,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl AnalyzerError {
    /// Vendor this error originated from, when there is one.
    #[must_use]
    pub fn vendor(&self) -> Option<&'static str> {
        match self {
            Self::MissingCredential { vendor, .. }
            | Self::Provider { vendor, .. }
            | Self::Timeout { vendor, .. }
            | Self::ResponseParse { vendor, .. } => Some(*vendor),
            Self::InvalidInput | Self::Configuration(_) | Self::HttpClient(_) => None,
        }
    }
}

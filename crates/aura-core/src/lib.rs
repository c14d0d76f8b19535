//! Shared configuration and data model for the Sentiment Aura service.

mod analysis;
mod app_config;
mod config;

pub use analysis::{AnalysisResult, Sentiment, NEUTRAL_SCORE, NEUTRAL_TYPE};
pub use app_config::{
    AppConfig, CredentialStatus, Environment, ProviderCredentials, ProviderEndpoint, ProviderKind,
};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("Unknown AI provider: {0}")]
    UnknownProvider(String),
}

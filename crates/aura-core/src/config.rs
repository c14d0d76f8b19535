use crate::app_config::{
    AppConfig, Environment, ProviderCredentials, ProviderEndpoint, ProviderKind,
};
use crate::ConfigError;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the parsing/validation core, decoupled from the process environment
/// so tests (here and in downstream crates) can feed a plain `HashMap`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for malformed ports, addresses,
/// booleans, timeouts or environment tags.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::{IpAddr, SocketAddr};

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let non_empty = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let credential = |kind: ProviderKind| {
        non_empty(kind.credential_var()).or_else(|| non_empty(kind.fallback_credential_var()))
    };

    let endpoint = |model_var: &str, model: &str, url_var: &str, url: &str| ProviderEndpoint {
        base_url: or_default(url_var, url).trim_end_matches('/').to_string(),
        model: or_default(model_var, model),
    };

    let env = parse_environment(&or_default("AURA_ENV", "development"))?;

    let host = or_default("AURA_HOST", "0.0.0.0");
    let host = host
        .parse::<IpAddr>()
        .map_err(|e| invalid("AURA_HOST", format!("{e}")))?;
    let port = or_default("PORT", "8000");
    let port = port
        .parse::<u16>()
        .map_err(|e| invalid("PORT", format!("{e}")))?;
    let bind_addr = SocketAddr::new(host, port);

    let debug = parse_flag("DEBUG", &or_default("DEBUG", "false"))?;
    let log_level = or_default("AURA_LOG_LEVEL", if debug { "debug" } else { "info" });

    let provider_name = or_default("AI_PROVIDER", "openai").trim().to_lowercase();

    let credentials = ProviderCredentials {
        openai: credential(ProviderKind::OpenAi),
        anthropic: credential(ProviderKind::Anthropic),
        google: credential(ProviderKind::Google),
    };

    let allowed_origins = or_default("AURA_ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    let provider_timeout_secs = or_default("AURA_PROVIDER_TIMEOUT_SECS", "30");
    let provider_timeout_secs = provider_timeout_secs
        .parse::<u64>()
        .map_err(|e| invalid("AURA_PROVIDER_TIMEOUT_SECS", format!("{e}")))?;
    if provider_timeout_secs == 0 {
        return Err(invalid(
            "AURA_PROVIDER_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let openai = endpoint(
        "AURA_OPENAI_MODEL",
        "gpt-4o-mini",
        "AURA_OPENAI_BASE_URL",
        "https://api.openai.com/v1",
    );
    let anthropic = endpoint(
        "AURA_ANTHROPIC_MODEL",
        "claude-3-haiku-20240307",
        "AURA_ANTHROPIC_BASE_URL",
        "https://api.anthropic.com/v1",
    );
    let google = endpoint(
        "AURA_GOOGLE_MODEL",
        "gemini-pro",
        "AURA_GOOGLE_BASE_URL",
        "https://generativelanguage.googleapis.com/v1beta",
    );

    Ok(AppConfig {
        env,
        bind_addr,
        debug,
        log_level,
        provider_name,
        credentials,
        allowed_origins,
        provider_timeout_secs,
        openai,
        anthropic,
        google,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim().to_lowercase().as_str() {
        "development" | "dev" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" | "prod" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "AURA_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

fn parse_flag(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

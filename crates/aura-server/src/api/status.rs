use aura_core::{CredentialStatus, ProviderKind};
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use super::AppState;

#[derive(Debug, Serialize)]
pub(super) struct HealthData {
    status: &'static str,
    provider: String,
    environment: String,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(super) struct ConfigStatus {
    provider: String,
    provider_supported: bool,
    supported_providers: Vec<&'static str>,
    credentials: CredentialStatus,
    allowed_origins: Vec<String>,
    environment: String,
    debug: bool,
}

/// `GET /`: service banner.
pub(super) async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Sentiment Aura API is running!",
        "provider": state.config.provider_name,
        "endpoints": {
            "/process_text": "POST - Analyze text sentiment and extract keywords",
            "/api/process_text": "POST - Same as /process_text",
            "/api/health": "GET - Liveness probe",
            "/api/config": "GET - Configuration status (no secrets)"
        }
    }))
}

/// `GET /api/health`: liveness only; the vendor is not contacted.
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthData> {
    Json(HealthData {
        status: "ok",
        provider: state.config.provider_name.clone(),
        environment: state.config.env.to_string(),
        timestamp: Utc::now(),
    })
}

/// `GET /api/config`: which credentials are present, never their values.
pub(super) async fn config_status(State(state): State<AppState>) -> Json<ConfigStatus> {
    let config = &state.config;
    Json(ConfigStatus {
        provider: config.provider_name.clone(),
        provider_supported: config.provider_kind().is_ok(),
        supported_providers: ProviderKind::ALL.into_iter().map(ProviderKind::as_str).collect(),
        credentials: config.credentials.status(),
        allowed_origins: config.allowed_origins.clone(),
        environment: config.env.to_string(),
        debug: config.debug,
    })
}

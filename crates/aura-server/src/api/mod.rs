mod process;
mod status;

use std::sync::Arc;

use aura_analyzer::{Analyzer, AnalyzerError};
use aura_core::AppConfig;
use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub config: Arc<AppConfig>,
}

/// Error body for every non-2xx response: `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorBody {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

/// Log an analysis failure with its vendor context and pick the status to report.
pub(super) fn map_analyzer_error(request_id: &str, error: &AnalyzerError) -> ApiError {
    let vendor = error.vendor().unwrap_or("none");
    match error {
        AnalyzerError::InvalidInput => {
            tracing::debug!(request_id, "rejected empty text");
            return ApiError::new(StatusCode::BAD_REQUEST, error.to_string());
        }
        AnalyzerError::ResponseParse { reason, .. } => {
            tracing::error!(request_id, vendor, reason = %reason, "failed to parse provider reply");
        }
        AnalyzerError::Provider { status, .. } => {
            tracing::error!(
                request_id,
                vendor,
                upstream_status = ?status,
                error = %error,
                "provider call failed"
            );
        }
        _ => tracing::error!(request_id, vendor, error = %error, "text analysis failed"),
    }

    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ]);

    // Credentialed CORS cannot be combined with a wildcard origin.
    if origins.iter().any(|o| o == "*") {
        return cors.allow_origin(AllowOrigin::any());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
}

pub fn build_app(state: AppState) -> Router {
    let cors = build_cors(&state.config.allowed_origins);

    Router::new()
        .route("/", get(status::root))
        .route("/process_text", post(process::process_text))
        .route("/api/process_text", post(process::process_text))
        .route("/api/health", get(status::health))
        .route("/api/config", get(status::config_status))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

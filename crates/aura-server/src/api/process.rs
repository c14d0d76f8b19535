use aura_core::AnalysisResult;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_analyzer_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct TextInput {
    pub text: String,
}

/// `POST /process_text`: sentiment and keywords for a piece of text.
pub(super) async fn process_text(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<TextInput>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(input) = payload.map_err(|rejection| {
        tracing::debug!(request_id = %req_id.0, error = %rejection, "invalid request body");
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    })?;

    let result = state
        .analyzer
        .analyze_text(&input.text)
        .await
        .map_err(|e| map_analyzer_error(&req_id.0, &e))?;

    tracing::info!(
        request_id = %req_id.0,
        provider = state.analyzer.provider_name(),
        sentiment = %result.sentiment.kind,
        score = result.sentiment.score,
        keywords = result.keywords.len(),
        "text analyzed"
    );

    Ok(Json(result))
}

//! Turning a vendor's raw reply into an [`AnalysisResult`].

use aura_core::{AnalysisResult, Sentiment};
use serde_json::{Map, Value};

use crate::error::AnalyzerError;
use crate::fence::strip_code_fence;

/// Unwrap, parse and normalize a raw vendor reply.
///
/// # Errors
///
/// Returns [`AnalyzerError::ResponseParse`] if the unwrapped reply is not
/// valid JSON or is valid JSON but not an object.
pub fn parse_reply(vendor: &'static str, raw: &str) -> Result<AnalysisResult, AnalyzerError> {
    let unwrapped = strip_code_fence(raw);
    let value: Value =
        serde_json::from_str(unwrapped).map_err(|e| AnalyzerError::ResponseParse {
            vendor,
            reason: e.to_string(),
        })?;

    match value {
        Value::Object(map) => Ok(normalize(&map)),
        other => Err(AnalyzerError::ResponseParse {
            vendor,
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

/// Fill in defaults for whatever the model left out.
///
/// A `sentiment` object with a string `type` and a numeric `score` is passed
/// through as-is; neither the label nor the score range is checked. Missing
/// or malformed sentiment falls back to neutral/0.5. String entries of a
/// `keywords` array are kept in order; anything else yields no keywords.
#[must_use]
pub fn normalize(reply: &Map<String, Value>) -> AnalysisResult {
    AnalysisResult {
        sentiment: sentiment_from(reply.get("sentiment")),
        keywords: keywords_from(reply.get("keywords")),
    }
}

fn sentiment_from(value: Option<&Value>) -> Sentiment {
    let Some(value) = value else {
        return Sentiment::neutral();
    };

    let kind = value.get("type").and_then(Value::as_str);
    let score = value.get("score").and_then(Value::as_f64);
    match (kind, score) {
        (Some(kind), Some(score)) => Sentiment {
            kind: kind.to_string(),
            score,
        },
        _ => {
            tracing::warn!(sentiment = %value, "malformed sentiment in model reply; using neutral");
            Sentiment::neutral()
        }
    }
}

fn keywords_from(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(ToOwned::to_owned)
            .collect(),
        Some(other) => {
            tracing::warn!(keywords = %other, "keywords in model reply is not an array; dropping");
            Vec::new()
        }
        None => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

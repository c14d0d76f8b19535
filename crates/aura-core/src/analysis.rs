use serde::{Deserialize, Serialize};

/// Sentiment label used whenever the upstream model gives us nothing usable.
pub const NEUTRAL_TYPE: &str = "neutral";

/// Intensity paired with [`NEUTRAL_TYPE`] for defaulted results.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Sentiment classification as reported by the upstream model.
///
/// `kind` is expected to be one of `positive`, `negative` or `neutral` and
/// `score` to lie in `[0.0, 1.0]`, but neither is enforced: values the model
/// returns are passed through to the caller untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    #[serde(rename = "type")]
    pub kind: String,
    pub score: f64,
}

impl Sentiment {
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            kind: NEUTRAL_TYPE.to_string(),
            score: NEUTRAL_SCORE,
        }
    }
}

/// Per-request analysis outcome returned by `/process_text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    pub keywords: Vec<String>,
}

impl AnalysisResult {
    /// Neutral sentiment with no keywords.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            sentiment: Sentiment::neutral(),
            keywords: Vec::new(),
        }
    }
}

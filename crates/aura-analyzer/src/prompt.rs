//! The fixed instruction sent to every vendor.

/// Sampling temperature for all vendor calls.
pub const TEMPERATURE: f32 = 0.3;

/// Output-token ceiling for all vendor calls.
pub const MAX_OUTPUT_TOKENS: u32 = 200;

/// System message for vendors that accept one separately from the prompt.
pub const SYSTEM_PROMPT: &str = "You are a sentiment analysis expert. Return only valid JSON.";

/// Build the analysis prompt for `text`.
///
/// The model is asked for a sentiment object (`type` + intensity `score`)
/// and 3-5 keywords, in exactly the JSON shape the normalizer reads.
#[must_use]
pub fn build_prompt(text: &str) -> String {
    format!(
        r#"Analyze the following text and return a JSON response with:
1. sentiment: object with 'type' (positive/negative/neutral) and 'score' (0-1, where 1 is most intense)
2. keywords: array of 3-5 most important keywords or themes

Text: "{text}"

Return ONLY valid JSON in this exact format:
{{
  "sentiment": {{"type": "positive", "score": 0.8}},
  "keywords": ["keyword1", "keyword2", "keyword3"]
}}"#
    )
}

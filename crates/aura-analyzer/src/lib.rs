//! Sentiment and keyword extraction delegated to a hosted LLM.
//!
//! The [`Analyzer`] validates input text, short-circuits trivially short
//! input, asks the configured vendor (OpenAI, Anthropic or Google) for a
//! strict JSON verdict, strips markdown fencing from the reply and
//! normalizes the result so callers always receive a well-formed
//! [`aura_core::AnalysisResult`].

pub mod error;
pub mod fence;
pub mod normalize;
pub mod pipeline;
pub mod prompt;

mod providers;

pub use error::AnalyzerError;
pub use fence::strip_code_fence;
pub use pipeline::{Analyzer, MIN_ANALYZABLE_CHARS};
pub use prompt::build_prompt;

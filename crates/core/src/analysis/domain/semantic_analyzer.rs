use serde::Serialize;
use thiserror::Error;

use super::semantic_result::SemanticResult;
use crate::shared::constants::{
    SPEAKER_CONCEPT_LIMIT, SPEAKER_KEYWORD_LIMIT, SUMMARY_KEYWORD_LIMIT,
};

/// Which facets to compute for a text, and how many ranked entries to return.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AnalysisOptions {
    pub sentiment: bool,
    pub emotion: bool,
    pub keyword_limit: Option<usize>,
    pub concept_limit: Option<usize>,
}

impl AnalysisOptions {
    /// Per-speaker request: sentiment, emotion, top concepts and keywords.
    pub fn for_speaker() -> Self {
        Self {
            sentiment: true,
            emotion: true,
            keyword_limit: Some(SPEAKER_KEYWORD_LIMIT),
            concept_limit: Some(SPEAKER_CONCEPT_LIMIT),
        }
    }

    /// Whole-transcript request: sentiment and a longer keyword list only.
    pub fn for_summary() -> Self {
        Self {
            sentiment: true,
            emotion: false,
            keyword_limit: Some(SUMMARY_KEYWORD_LIMIT),
            concept_limit: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("analysis request failed: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("analysis service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode analysis response: {0}")]
    Decode(String),
}

/// Domain interface for the external semantic-analysis service.
///
/// Implementations must be safe to call from several threads at once so
/// per-speaker requests can be issued concurrently.
pub trait SemanticAnalyzer: Send + Sync {
    fn analyze(
        &self,
        text: &str,
        options: &AnalysisOptions,
    ) -> Result<SemanticResult, AnalysisError>;
}

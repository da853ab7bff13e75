use crate::analysis::domain::semantic_analyzer::{
    AnalysisError, AnalysisOptions, SemanticAnalyzer,
};
use crate::analysis::domain::semantic_result::SemanticResult;

/// One request to the semantic analyzer.
#[derive(Clone, Debug)]
pub struct AnalysisJob {
    pub text: String,
    pub options: AnalysisOptions,
}

/// The first job (by position) that failed, and why.
#[derive(Debug)]
pub struct JobFailure {
    pub index: usize,
    pub error: AnalysisError,
}

/// Abstracts how a batch of independent analysis requests is issued.
///
/// This is a port (application-layer interface). Infrastructure provides
/// concrete implementations (sequential, threaded). Every implementation
/// returns results in job order and fails the whole batch if any job fails.
pub trait AnalysisExecutor: Send + Sync {
    fn execute(
        &self,
        analyzer: &dyn SemanticAnalyzer,
        jobs: &[AnalysisJob],
    ) -> Result<Vec<SemanticResult>, JobFailure>;
}

use crate::analysis::domain::semantic_analyzer::SemanticAnalyzer;
use crate::analysis::domain::semantic_result::SemanticResult;
use crate::pipeline::analysis_executor::{AnalysisExecutor, AnalysisJob, JobFailure};

/// Issues one request at a time and stops at the first failure.
#[derive(Debug, Default)]
pub struct SequentialAnalysisExecutor;

impl SequentialAnalysisExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl AnalysisExecutor for SequentialAnalysisExecutor {
    fn execute(
        &self,
        analyzer: &dyn SemanticAnalyzer,
        jobs: &[AnalysisJob],
    ) -> Result<Vec<SemanticResult>, JobFailure> {
        jobs.iter()
            .enumerate()
            .map(|(index, job)| {
                analyzer
                    .analyze(&job.text, &job.options)
                    .map_err(|error| JobFailure { index, error })
            })
            .collect()
    }
}

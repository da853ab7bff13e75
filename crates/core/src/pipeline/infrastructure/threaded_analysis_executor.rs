use std::sync::atomic::{AtomicBool, Ordering};

use crate::analysis::domain::semantic_analyzer::{AnalysisError, SemanticAnalyzer};
use crate::analysis::domain::semantic_result::SemanticResult;
use crate::pipeline::analysis_executor::{AnalysisExecutor, AnalysisJob, JobFailure};

pub const DEFAULT_WORKERS: usize = 4;

type JobResult = (usize, Result<SemanticResult, AnalysisError>);

/// Issues analysis requests from a small pool of worker threads.
///
/// Layout: `feeder → [workers] → collector`
///
/// Results are reassembled in job order regardless of completion order.
/// Once any job fails, workers stop picking up new jobs and the failure
/// with the lowest job index is reported.
pub struct ThreadedAnalysisExecutor {
    workers: usize,
}

impl ThreadedAnalysisExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for ThreadedAnalysisExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}

impl AnalysisExecutor for ThreadedAnalysisExecutor {
    fn execute(
        &self,
        analyzer: &dyn SemanticAnalyzer,
        jobs: &[AnalysisJob],
    ) -> Result<Vec<SemanticResult>, JobFailure> {
        if jobs.is_empty() {
            return Ok(Vec::new());
        }

        let workers = self.workers.min(jobs.len());
        let failed = AtomicBool::new(false);
        let (job_tx, job_rx) = crossbeam_channel::bounded::<usize>(workers);
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<JobResult>();

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                let failed = &failed;
                scope.spawn(move || {
                    for index in job_rx {
                        if failed.load(Ordering::Relaxed) {
                            break;
                        }
                        let job = &jobs[index];
                        let result = analyzer.analyze(&job.text, &job.options);
                        if result.is_err() {
                            failed.store(true, Ordering::Relaxed);
                        }
                        if result_tx.send((index, result)).is_err() {
                            break;
                        }
                    }
                });
            }
            // Only workers hold receivers, so a send fails once they have all stopped.
            drop(job_rx);

            for index in 0..jobs.len() {
                if failed.load(Ordering::Relaxed) || job_tx.send(index).is_err() {
                    break;
                }
            }
            drop(job_tx);
        });
        drop(result_tx);

        collect_in_order(jobs.len(), result_rx)
    }
}

fn collect_in_order(
    total: usize,
    results: crossbeam_channel::Receiver<JobResult>,
) -> Result<Vec<SemanticResult>, JobFailure> {
    let mut slots: Vec<Option<SemanticResult>> = (0..total).map(|_| None).collect();
    let mut first_failure: Option<JobFailure> = None;

    for (index, result) in results {
        match result {
            Ok(result) => slots[index] = Some(result),
            Err(error) => {
                if first_failure.as_ref().map_or(true, |f| index < f.index) {
                    first_failure = Some(JobFailure { index, error });
                }
            }
        }
    }

    if let Some(failure) = first_failure {
        return Err(failure);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| JobFailure {
                index,
                error: AnalysisError::Request("analysis job was never completed".into()),
            })
        })
        .collect()
}

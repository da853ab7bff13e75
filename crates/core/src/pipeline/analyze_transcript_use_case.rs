use std::time::Instant;

use thiserror::Error;

use crate::analysis::domain::semantic_analyzer::{
    AnalysisError, AnalysisOptions, SemanticAnalyzer,
};
use crate::analysis::domain::semantic_result::SemanticResult;
use crate::lexicon::domain::indicator::{IndicatorKind, IndicatorWordLists};
use crate::lexicon::domain::lexical_scorer::{count_words, IndicatorScore, LexicalScorer};
use crate::pipeline::analysis_executor::{AnalysisExecutor, AnalysisJob};
use crate::pipeline::report_logger::{NullReportLogger, ReportLogger};
use crate::report::domain::report::{
    RankedEntry, Report, ReportRow, ReportSummary, SentimentSummary,
};
use crate::shared::constants::{KEYWORD_RELEVANCE_THRESHOLD, MIN_SPEAKER_WORDS};
use crate::transcript::domain::cue::Cue;
use crate::transcript::domain::cue_segmenter::CueSegmenter;

/// Which analysis request failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisTarget {
    Speaker(String),
    Summary,
}

impl std::fmt::Display for AnalysisTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisTarget::Speaker(speaker) => write!(f, "speaker '{speaker}'"),
            AnalysisTarget::Summary => write!(f, "transcript summary"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("semantic analysis failed for {target}: {source}")]
    Analysis {
        target: AnalysisTarget,
        #[source]
        source: AnalysisError,
    },
}

/// A speaker that passed the word-count gate, waiting for its semantic result.
struct ScoredSpeaker {
    speaker: String,
    word_count: usize,
    weasel: IndicatorScore,
    hedge: IndicatorScore,
    filler: IndicatorScore,
}

impl ScoredSpeaker {
    fn into_row(self, result: &SemanticResult) -> ReportRow {
        ReportRow {
            speaker: self.speaker,
            word_count: self.word_count,
            weasel: self.weasel.into(),
            hedge: self.hedge.into(),
            filler: self.filler.into(),
            sentiment: result.sentiment.as_ref().map(SentimentSummary::from),
            emotions: result
                .ranked_emotions()
                .into_iter()
                .map(|(name, score)| RankedEntry::new(name, score))
                .collect(),
            keywords: result
                .keywords_above(KEYWORD_RELEVANCE_THRESHOLD)
                .map(RankedEntry::from)
                .collect(),
        }
    }
}

/// Builds the per-speaker and whole-transcript report.
///
/// Steps:
/// 1. Segment cues into per-speaker utterances
/// 2. Score every speaker with at least `MIN_SPEAKER_WORDS` words against
///    the weasel, hedge and filler lists
/// 3. Analyze each scored speaker's text (through the executor)
/// 4. Analyze the whole transcript, short speakers included
///
/// Any failed analysis request aborts the report.
pub struct AnalyzeTranscriptUseCase {
    word_lists: IndicatorWordLists,
    scorer: LexicalScorer,
    analyzer: Box<dyn SemanticAnalyzer>,
    executor: Box<dyn AnalysisExecutor>,
    logger: Box<dyn ReportLogger>,
}

impl AnalyzeTranscriptUseCase {
    pub fn new(
        word_lists: IndicatorWordLists,
        scorer: LexicalScorer,
        analyzer: Box<dyn SemanticAnalyzer>,
        executor: Box<dyn AnalysisExecutor>,
        logger: Option<Box<dyn ReportLogger>>,
    ) -> Self {
        Self {
            word_lists,
            scorer,
            analyzer,
            executor,
            logger: logger.unwrap_or_else(|| Box::new(NullReportLogger)),
        }
    }

    pub fn execute(&mut self, cues: &[Cue]) -> Result<Report, ReportError> {
        let started = Instant::now();
        let groups = CueSegmenter::segment(cues);
        self.logger.timing("segment", elapsed_ms(started));

        if !groups.skipped().is_empty() {
            self.logger.info(&format!(
                "Dropped {} of {} cues without a speaker tag",
                groups.skipped().len(),
                cues.len()
            ));
            for skipped in groups.skipped() {
                log::debug!("Dropped cue {} ({}): {:?}", skipped.index, skipped.reason, skipped.text);
            }
        }

        let started = Instant::now();
        let total = groups.len();
        let mut transcript = String::new();
        let mut scored = Vec::new();
        let mut jobs = Vec::new();

        for (position, (speaker, utterances)) in groups.iter().enumerate() {
            self.logger.progress(position + 1, total);

            let row_text = utterances.join("\n");
            transcript.push_str(&row_text);
            transcript.push('\n');

            let word_count = count_words(&row_text);
            if word_count < MIN_SPEAKER_WORDS {
                self.logger.info(&format!(
                    "Skipping {speaker}: {word_count} words is below the {MIN_SPEAKER_WORDS}-word minimum"
                ));
                continue;
            }
            self.logger.metric("word_count", word_count as f64);

            scored.push(ScoredSpeaker {
                speaker: speaker.to_string(),
                word_count,
                weasel: self.score(IndicatorKind::Weasel, &row_text, word_count),
                hedge: self.score(IndicatorKind::Hedge, &row_text, word_count),
                filler: self.score(IndicatorKind::Filler, &row_text, word_count),
            });
            jobs.push(AnalysisJob {
                text: row_text,
                options: AnalysisOptions::for_speaker(),
            });
        }
        self.logger.timing("score", elapsed_ms(started));

        let started = Instant::now();
        let results = self
            .executor
            .execute(self.analyzer.as_ref(), &jobs)
            .map_err(|failure| ReportError::Analysis {
                target: AnalysisTarget::Speaker(scored[failure.index].speaker.clone()),
                source: failure.error,
            })?;
        self.logger.timing("analyze", elapsed_ms(started));

        let rows: Vec<ReportRow> = scored
            .into_iter()
            .zip(results.iter())
            .map(|(speaker, result)| speaker.into_row(result))
            .collect();

        let started = Instant::now();
        let summary = self.summarize(&transcript)?;
        self.logger.timing("summary", elapsed_ms(started));
        self.logger.summary();

        Ok(Report {
            rows,
            summary,
            skipped_cues: groups.skipped().to_vec(),
        })
    }

    fn score(&self, kind: IndicatorKind, text: &str, word_count: usize) -> IndicatorScore {
        self.scorer
            .score(self.word_lists.get(kind), text, word_count)
    }

    fn summarize(&self, transcript: &str) -> Result<ReportSummary, ReportError> {
        let result = self
            .analyzer
            .analyze(transcript, &AnalysisOptions::for_summary())
            .map_err(|e| ReportError::Analysis {
                target: AnalysisTarget::Summary,
                source: e,
            })?;
        Ok(ReportSummary {
            sentiment: result.sentiment.as_ref().map(SentimentSummary::from),
            keywords: result.keywords.iter().map(RankedEntry::from).collect(),
        })
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

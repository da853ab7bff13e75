use serde::Serialize;

use super::magnitude::Magnitude;
use crate::analysis::domain::semantic_result::{DocumentSentiment, KeywordEntry};
use crate::lexicon::domain::lexical_scorer::{IndicatorScore, WordHit};
use crate::transcript::domain::cue_segmenter::SkippedCue;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorBreakdown {
    pub ratio: f64,
    pub magnitude: Magnitude,
    pub catalog: Vec<WordHit>,
}

impl From<IndicatorScore> for IndicatorBreakdown {
    fn from(score: IndicatorScore) -> Self {
        Self {
            ratio: score.ratio,
            magnitude: Magnitude::from_ratio(score.ratio),
            catalog: score.catalog,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub label: String,
    pub score: f64,
    pub magnitude: Magnitude,
}

impl From<&DocumentSentiment> for SentimentSummary {
    fn from(sentiment: &DocumentSentiment) -> Self {
        Self {
            label: sentiment.label.clone(),
            score: sentiment.score,
            magnitude: Magnitude::from_fraction(sentiment.score),
        }
    }
}

/// A named score: an emotion, or a keyword with its relevance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub score: f64,
    pub magnitude: Magnitude,
}

impl RankedEntry {
    pub fn new(name: &str, score: f64) -> Self {
        Self {
            name: name.to_string(),
            score,
            magnitude: Magnitude::from_fraction(score),
        }
    }
}

impl From<&KeywordEntry> for RankedEntry {
    fn from(keyword: &KeywordEntry) -> Self {
        Self::new(&keyword.text, keyword.relevance)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub speaker: String,
    pub word_count: usize,
    pub weasel: IndicatorBreakdown,
    pub hedge: IndicatorBreakdown,
    pub filler: IndicatorBreakdown,
    pub sentiment: Option<SentimentSummary>,
    /// Strongest first.
    pub emotions: Vec<RankedEntry>,
    /// Relevance above the reporting threshold, provider order.
    pub keywords: Vec<RankedEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub sentiment: Option<SentimentSummary>,
    pub keywords: Vec<RankedEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// One row per qualifying speaker, in order of first appearance.
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
    pub skipped_cues: Vec<SkippedCue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::domain::magnitude::MagnitudeCategory;
    use approx::assert_relative_eq;

    #[test]
    fn test_breakdown_from_score() {
        let breakdown = IndicatorBreakdown::from(IndicatorScore {
            ratio: 16.67,
            catalog: vec![WordHit {
                word: "basically".to_string(),
                count: 2,
            }],
        });
        assert_relative_eq!(breakdown.magnitude.percentage, 16.67);
        assert_eq!(breakdown.magnitude.category, MagnitudeCategory::Red);
        assert_eq!(breakdown.catalog.len(), 1);
    }

    #[test]
    fn test_sentiment_summary_from_document() {
        let summary = SentimentSummary::from(&DocumentSentiment {
            label: "positive".to_string(),
            score: 0.81,
        });
        assert_eq!(summary.label, "positive");
        assert_eq!(summary.magnitude.category, MagnitudeCategory::Green);
    }

    #[test]
    fn test_ranked_entry_from_keyword() {
        let entry = RankedEntry::from(&KeywordEntry {
            text: "roadmap".to_string(),
            relevance: 0.55,
            count: Some(3),
        });
        assert_eq!(entry.name, "roadmap");
        assert_eq!(entry.magnitude.category, MagnitudeCategory::Blue);
    }

    #[test]
    fn test_report_serializes_categories_lowercase() {
        let report = Report {
            rows: vec![],
            summary: ReportSummary {
                sentiment: Some(SentimentSummary::from(&DocumentSentiment {
                    label: "neutral".to_string(),
                    score: 0.3,
                })),
                keywords: vec![RankedEntry::new("budget", 0.9)],
            },
            skipped_cues: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["sentiment"]["magnitude"]["category"], "yellow");
        assert_eq!(json["summary"]["keywords"][0]["magnitude"]["category"], "green");
    }
}

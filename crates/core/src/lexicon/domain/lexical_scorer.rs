use serde::Serialize;

use super::indicator::IndicatorWordList;
use crate::shared::math::round2;

/// How indicator words are located in a speaker's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Case-sensitive substring count. Short entries also match inside
    /// longer words ("um" in "summary").
    #[default]
    Substring,
    /// Like `Substring`, but a match only counts when the characters on
    /// either side are not alphanumeric.
    WordBoundary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordHit {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorScore {
    /// Matched occurrences per hundred words, two decimals.
    pub ratio: f64,
    /// Words with at least one match, most frequent first.
    pub catalog: Vec<WordHit>,
}

impl IndicatorScore {
    pub fn total_matches(&self) -> usize {
        self.catalog.iter().map(|hit| hit.count).sum()
    }
}

/// Whitespace-delimited word count.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalScorer {
    mode: MatchMode,
}

impl LexicalScorer {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Scores `text` against `words`.
    ///
    /// `word_count` must be positive; callers exclude short samples before
    /// scoring. A zero count yields a zero ratio rather than dividing by zero.
    pub fn score(&self, words: &IndicatorWordList, text: &str, word_count: usize) -> IndicatorScore {
        let mut catalog: Vec<WordHit> = words
            .words()
            .iter()
            .map(|word| WordHit {
                word: word.clone(),
                count: self.occurrences(text, word),
            })
            .filter(|hit| hit.count > 0)
            .collect();
        // Stable: equal counts keep list order.
        catalog.sort_by(|a, b| b.count.cmp(&a.count));

        let matched: usize = catalog.iter().map(|hit| hit.count).sum();
        let ratio = if word_count == 0 {
            0.0
        } else {
            round2(100.0 * matched as f64 / word_count as f64)
        };

        IndicatorScore { ratio, catalog }
    }

    fn occurrences(&self, text: &str, word: &str) -> usize {
        match self.mode {
            MatchMode::Substring => text.matches(word).count(),
            MatchMode::WordBoundary => text
                .match_indices(word)
                .filter(|(start, matched)| is_bounded(text, *start, start + matched.len()))
                .count(),
        }
    }
}

fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

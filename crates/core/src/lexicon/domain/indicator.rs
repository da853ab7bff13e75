use std::collections::HashSet;

use serde::Serialize;

/// The lexical indicator categories scored for every speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Weasel,
    Hedge,
    Filler,
}

impl IndicatorKind {
    pub const ALL: &[IndicatorKind] = &[
        IndicatorKind::Weasel,
        IndicatorKind::Hedge,
        IndicatorKind::Filler,
    ];
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndicatorKind::Weasel => write!(f, "Weasel"),
            IndicatorKind::Hedge => write!(f, "Hedge"),
            IndicatorKind::Filler => write!(f, "Filler"),
        }
    }
}

/// An immutable set of lowercase words or phrases.
///
/// Duplicates are dropped on construction; first-seen order is kept only so
/// that equal counts rank deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorWordList {
    words: Vec<String>,
}

impl IndicatorWordList {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .filter(|w| seen.insert(w.clone()))
            .collect();
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The three lists the report is scored against, loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct IndicatorWordLists {
    pub weasel: IndicatorWordList,
    pub hedge: IndicatorWordList,
    pub filler: IndicatorWordList,
}

impl IndicatorWordLists {
    pub fn get(&self, kind: IndicatorKind) -> &IndicatorWordList {
        match kind {
            IndicatorKind::Weasel => &self.weasel,
            IndicatorKind::Hedge => &self.hedge,
            IndicatorKind::Filler => &self.filler,
        }
    }

    pub fn set(&mut self, kind: IndicatorKind, list: IndicatorWordList) {
        match kind {
            IndicatorKind::Weasel => self.weasel = list,
            IndicatorKind::Hedge => self.hedge = list,
            IndicatorKind::Filler => self.filler = list,
        }
    }
}

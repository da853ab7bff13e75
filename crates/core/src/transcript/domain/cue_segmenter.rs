use std::collections::HashMap;

use serde::Serialize;

use super::cue::Cue;
use crate::shared::constants::SPEAKER_DELIMITER;

/// Why a cue contributed to no speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The text has no `": "` delimiter (stage directions, continuations).
    MissingDelimiter,
    /// The delimiter is the first thing in the text.
    EmptySpeaker,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingDelimiter => write!(f, "no speaker delimiter"),
            SkipReason::EmptySpeaker => write!(f, "empty speaker tag"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedCue {
    /// Position of the cue in the input sequence.
    pub index: usize,
    pub text: String,
    pub reason: SkipReason,
}

/// Utterances grouped by speaker, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UtteranceGroups {
    speakers: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
    skipped: Vec<SkippedCue>,
}

impl UtteranceGroups {
    fn push(&mut self, speaker: &str, utterance: &str) {
        let slot = match self.index.get(speaker) {
            Some(&slot) => slot,
            None => {
                self.speakers.push((speaker.to_string(), Vec::new()));
                let slot = self.speakers.len() - 1;
                self.index.insert(speaker.to_string(), slot);
                slot
            }
        };
        self.speakers[slot].1.push(utterance.to_string());
    }

    /// Speakers with their utterances, first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.speakers
            .iter()
            .map(|(speaker, utterances)| (speaker.as_str(), utterances.as_slice()))
    }

    pub fn speakers(&self) -> impl Iterator<Item = &str> {
        self.speakers.iter().map(|(speaker, _)| speaker.as_str())
    }

    pub fn utterances(&self, speaker: &str) -> Option<&[String]> {
        self.index
            .get(speaker)
            .map(|&slot| self.speakers[slot].1.as_slice())
    }

    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }

    /// Cues that were dropped, with the reason, for callers that want to audit them.
    pub fn skipped(&self) -> &[SkippedCue] {
        &self.skipped
    }
}

pub struct CueSegmenter;

impl CueSegmenter {
    /// Splits each cue at the first `": "` into speaker tag and utterance.
    ///
    /// Malformed cues are recorded in [`UtteranceGroups::skipped`] instead of
    /// failing. The speaker tag is kept verbatim (no trimming, no case
    /// folding), so a speaker name that itself contains `": "` cannot be
    /// represented.
    pub fn segment(cues: &[Cue]) -> UtteranceGroups {
        let mut groups = UtteranceGroups::default();

        for (index, cue) in cues.iter().enumerate() {
            match Self::split(&cue.text) {
                Ok((speaker, utterance)) => groups.push(speaker, utterance),
                Err(reason) => groups.skipped.push(SkippedCue {
                    index,
                    text: cue.text.clone(),
                    reason,
                }),
            }
        }

        groups
    }

    fn split(text: &str) -> Result<(&str, &str), SkipReason> {
        let at = text
            .find(SPEAKER_DELIMITER)
            .ok_or(SkipReason::MissingDelimiter)?;
        if at == 0 {
            return Err(SkipReason::EmptySpeaker);
        }
        Ok((&text[..at], &text[at + SPEAKER_DELIMITER.len()..]))
    }
}

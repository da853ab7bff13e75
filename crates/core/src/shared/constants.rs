/// Separates the speaker tag from the spoken text in a cue.
pub const SPEAKER_DELIMITER: &str = ": ";

/// Speakers with fewer words than this get no report row.
pub const MIN_SPEAKER_WORDS: usize = 10;

/// Per-speaker keywords at or below this relevance are not reported.
pub const KEYWORD_RELEVANCE_THRESHOLD: f64 = 0.5;

pub const SPEAKER_KEYWORD_LIMIT: usize = 5;
pub const SPEAKER_CONCEPT_LIMIT: usize = 5;
pub const SUMMARY_KEYWORD_LIMIT: usize = 10;

pub const WATSON_API_VERSION: &str = "2019-07-12";

/// Lifetime of a cached analysis response (10 minutes).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;

pub const APP_DIR_NAME: &str = "Transcript Analyzer";

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::cue::Cue;

#[derive(Error, Debug)]
pub enum CaptionReadError {
    #[error("caption file {path} does not exist")]
    NotFound { path: PathBuf },
    #[error("failed to read caption file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid caption format at line {line}: {reason}")]
    InvalidFormat { line: usize, reason: String },
}

/// Domain interface for caption sources.
///
/// Implementations own format parsing and timing validation; the core only
/// consumes the resulting ordered cues.
pub trait CaptionReader {
    fn read_cues(&self, path: &Path) -> Result<Vec<Cue>, CaptionReadError>;
}

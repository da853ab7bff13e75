use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::lexicon::domain::indicator::{IndicatorKind, IndicatorWordList, IndicatorWordLists};

const BUNDLED_WEASEL: &str = include_str!("../../../data/weasel_words.txt");
const BUNDLED_HEDGE: &str = include_str!("../../../data/hedge_words.txt");
const BUNDLED_FILLER: &str = include_str!("../../../data/filler_words.txt");

#[derive(Error, Debug)]
pub enum WordListError {
    #[error("failed to read word list {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("word list {path} contains no words")]
    Empty { path: PathBuf },
}

/// Parses a newline-delimited catalog. Blank lines and `#` comments are
/// ignored.
pub fn parse(content: &str) -> IndicatorWordList {
    IndicatorWordList::new(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#')),
    )
}

pub fn load(path: &Path) -> Result<IndicatorWordList, WordListError> {
    let content = fs::read_to_string(path).map_err(|e| WordListError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let list = parse(&content);
    if list.is_empty() {
        return Err(WordListError::Empty {
            path: path.to_path_buf(),
        });
    }
    log::debug!("Loaded {} words from {}", list.len(), path.display());
    Ok(list)
}

/// The English lists compiled into the binary.
pub fn bundled(kind: IndicatorKind) -> IndicatorWordList {
    parse(match kind {
        IndicatorKind::Weasel => BUNDLED_WEASEL,
        IndicatorKind::Hedge => BUNDLED_HEDGE,
        IndicatorKind::Filler => BUNDLED_FILLER,
    })
}

/// Loads all three lists, reading a file where one is given and falling
/// back to the bundled list otherwise.
pub fn load_all(
    weasel: Option<&Path>,
    hedge: Option<&Path>,
    filler: Option<&Path>,
) -> Result<IndicatorWordLists, WordListError> {
    let mut lists = IndicatorWordLists::default();
    for (&kind, path) in IndicatorKind::ALL.iter().zip([weasel, hedge, filler]) {
        let list = match path {
            Some(path) => load(path)?,
            None => bundled(kind),
        };
        lists.set(kind, list);
    }
    Ok(lists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::domain::lexical_scorer::LexicalScorer;
    use tempfile::TempDir;

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let list = parse("# hedges\nmaybe\n\n   \nperhaps\n# end\n");
        assert_eq!(list.words(), &["maybe".to_string(), "perhaps".to_string()]);
    }

    #[test]
    fn test_parse_handles_crlf() {
        let list = parse("maybe\r\nsort of\r\n");
        assert_eq!(list.words(), &["maybe".to_string(), "sort of".to_string()]);
    }

    #[test]
    fn test_load_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("weasel.txt");
        fs::write(&path, "Basically\nliterally\n").unwrap();

        let list = load(&path).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains("basically"));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = load(&tmp.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, WordListError::Read { .. }));
    }

    #[test]
    fn test_load_empty_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.txt");
        fs::write(&path, "\n# nothing here\n").unwrap();
        assert!(matches!(load(&path).unwrap_err(), WordListError::Empty { .. }));
    }

    #[test]
    fn test_bundled_lists_are_populated_and_lowercase() {
        for &kind in IndicatorKind::ALL {
            let list = bundled(kind);
            assert!(!list.is_empty(), "{kind} list is empty");
            assert!(list.words().iter().all(|w| *w == w.to_lowercase()));
        }
        assert!(bundled(IndicatorKind::Weasel).contains("basically"));
        assert!(bundled(IndicatorKind::Filler).contains("um"));
    }

    #[test]
    fn test_bundled_entries_do_not_nest_within_a_list() {
        for &kind in IndicatorKind::ALL {
            let list = bundled(kind);
            for outer in list.words() {
                for inner in list.words() {
                    assert!(
                        outer == inner || !outer.contains(inner.as_str()),
                        "{kind} entry '{outer}' contains '{inner}'"
                    );
                }
            }
        }
    }

    #[test]
    fn test_bundled_fillers_ignore_ordinary_words() {
        let text = "There were never other answers whatever the manager said every member agreed";
        let score = LexicalScorer::default().score(&bundled(IndicatorKind::Filler), text, 12);
        assert_eq!(score.ratio, 0.0);
        assert!(score.catalog.is_empty());
    }

    #[test]
    fn test_load_all_mixes_files_and_bundled() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("hedge.txt");
        fs::write(&path, "allegedly\n").unwrap();

        let lists = load_all(None, Some(&path), None).unwrap();
        assert_eq!(lists.hedge.words(), &["allegedly".to_string()]);
        assert_eq!(lists.weasel, bundled(IndicatorKind::Weasel));
        assert_eq!(lists.filler, bundled(IndicatorKind::Filler));
    }
}

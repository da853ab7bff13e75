use std::fs;
use std::path::Path;

use crate::transcript::domain::caption_reader::{CaptionReadError, CaptionReader};
use crate::transcript::domain::cue::Cue;

const HEADER: &str = "WEBVTT";
const TIMING_ARROW: &str = "-->";

/// Reads WebVTT caption files into ordered cues.
///
/// Supports optional cue identifiers, `HH:MM:SS.mmm` and `MM:SS.mmm`
/// timestamps, cue settings after the end time, multi-line payloads, and
/// skips `NOTE`, `STYLE` and `REGION` blocks.
#[derive(Debug, Default)]
pub struct WebVttReader;

impl WebVttReader {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_content(&self, content: &str) -> Result<Vec<Cue>, CaptionReadError> {
        let content = content.trim_start_matches('\u{feff}').trim();
        let lines: Vec<(usize, &str)> = content
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
            .collect();

        let header = lines.first().map(|(_, l)| *l).unwrap_or_default();
        if !is_block_keyword(header, HEADER) {
            return Err(CaptionReadError::InvalidFormat {
                line: 1,
                reason: format!("expected {HEADER} header"),
            });
        }

        let mut cues = Vec::new();
        // The first block is the header (plus optional metadata lines).
        for block in blocks(&lines).into_iter().skip(1) {
            if let Some(cue) = parse_block(&block)? {
                cues.push(cue);
            }
        }
        Ok(cues)
    }
}

impl CaptionReader for WebVttReader {
    fn read_cues(&self, path: &Path) -> Result<Vec<Cue>, CaptionReadError> {
        if !path.exists() {
            return Err(CaptionReadError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path).map_err(|e| CaptionReadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let cues = self.parse_content(&content)?;
        log::debug!("Read {} cues from {}", cues.len(), path.display());
        Ok(cues)
    }
}

fn is_block_keyword(line: &str, keyword: &str) -> bool {
    line == keyword
        || line
            .strip_prefix(keyword)
            .is_some_and(|rest| rest.starts_with(' ') || rest.starts_with('\t'))
}

fn blocks<'a>(lines: &[(usize, &'a str)]) -> Vec<Vec<(usize, &'a str)>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for &(number, line) in lines {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push((number, line));
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn parse_block(block: &[(usize, &str)]) -> Result<Option<Cue>, CaptionReadError> {
    let (first_number, first) = block[0];
    if ["NOTE", "STYLE", "REGION"]
        .iter()
        .any(|kw| is_block_keyword(first, kw))
    {
        return Ok(None);
    }

    let timing_at = if first.contains(TIMING_ARROW) {
        0
    } else if block.len() > 1 && block[1].1.contains(TIMING_ARROW) {
        1
    } else {
        return Err(CaptionReadError::InvalidFormat {
            line: first_number,
            reason: "cue has no timing line".to_string(),
        });
    };

    let (timing_number, timing_line) = block[timing_at];
    let (start_time, end_time) = parse_timing(timing_line).ok_or_else(|| {
        CaptionReadError::InvalidFormat {
            line: timing_number,
            reason: format!("malformed cue timing '{timing_line}'"),
        }
    })?;

    let text = block[timing_at + 1..]
        .iter()
        .map(|(_, l)| *l)
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Some(Cue::new(text, start_time, end_time)))
}

fn parse_timing(line: &str) -> Option<(f64, f64)> {
    let (start, rest) = line.split_once(TIMING_ARROW)?;
    let end = rest.split_whitespace().next()?;
    Some((parse_timestamp(start.trim())?, parse_timestamp(end)?))
}

/// Parses `HH:MM:SS.mmm` or `MM:SS.mmm` into seconds.
fn parse_timestamp(value: &str) -> Option<f64> {
    let (clock, millis) = value.split_once('.')?;
    if millis.len() != 3 {
        return None;
    }
    let millis: u64 = millis.parse().ok()?;

    let parts: Vec<u64> = clock
        .split(':')
        .map(|p| p.parse().ok())
        .collect::<Option<_>>()?;
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => (0, *m, *s),
        _ => return None,
    };
    if minutes > 59 || seconds > 59 {
        return None;
    }

    let total = hours
        .checked_mul(3600)?
        .checked_add(minutes * 60 + seconds)?;
    Some(total as f64 + millis as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    const SAMPLE: &str = "WEBVTT

1
00:00:01.000 --> 00:00:04.000
Alice: Good morning everyone.

2
00:00:04.500 --> 00:00:06.250 align:start
Bob: Morning.

NOTE this block is ignored

00:00:07.000 --> 00:00:09.000
Alice: Let's get started,
shall we?
";

    #[test]
    fn test_parses_cues_in_order() {
        let cues = WebVttReader::new().parse_content(SAMPLE).unwrap();
        assert_eq!(cues.len(), 3);
        assert_eq!(cues[0].text, "Alice: Good morning everyone.");
        assert_eq!(cues[1].text, "Bob: Morning.");
        assert_eq!(cues[2].text, "Alice: Let's get started,\nshall we?");
    }

    #[test]
    fn test_parses_timing_with_settings() {
        let cues = WebVttReader::new().parse_content(SAMPLE).unwrap();
        assert_relative_eq!(cues[1].start_time, 4.5);
        assert_relative_eq!(cues[1].end_time, 6.25);
    }

    #[test]
    fn test_short_timestamps() {
        let content = "WEBVTT\n\n01:02.500 --> 01:03.000\nAlice: hi\n";
        let cues = WebVttReader::new().parse_content(content).unwrap();
        assert_relative_eq!(cues[0].start_time, 62.5);
        assert_relative_eq!(cues[0].end_time, 63.0);
    }

    #[test]
    fn test_long_timestamps() {
        assert_relative_eq!(parse_timestamp("01:00:00.001").unwrap(), 3600.001);
        assert!(parse_timestamp("00:61:00.000").is_none());
        assert!(parse_timestamp("00:00:00,000").is_none());
    }

    #[test]
    fn test_missing_header_is_invalid() {
        let err = WebVttReader::new()
            .parse_content("00:00:01.000 --> 00:00:02.000\nAlice: hi")
            .unwrap_err();
        assert!(matches!(err, CaptionReadError::InvalidFormat { line: 1, .. }));
    }

    #[test]
    fn test_header_with_description() {
        let content = "WEBVTT - team sync\n\n00:01.000 --> 00:02.000\nAlice: hi\n";
        let cues = WebVttReader::new().parse_content(content).unwrap();
        assert_eq!(cues.len(), 1);
    }

    #[test]
    fn test_bom_and_crlf_are_tolerated() {
        let content = "\u{feff}WEBVTT\r\n\r\n00:01.000 --> 00:02.000\r\nAlice: hi\r\n";
        let cues = WebVttReader::new().parse_content(content).unwrap();
        assert_eq!(cues[0].text, "Alice: hi");
    }

    #[test]
    fn test_block_without_timing_is_invalid() {
        let content = "WEBVTT\n\nAlice: hi\n";
        let err = WebVttReader::new().parse_content(content).unwrap_err();
        assert!(matches!(err, CaptionReadError::InvalidFormat { line: 3, .. }));
    }

    #[test]
    fn test_malformed_timing_is_invalid() {
        let content = "WEBVTT\n\n00:01 --> 00:02.000\nAlice: hi\n";
        let err = WebVttReader::new().parse_content(content).unwrap_err();
        assert!(matches!(err, CaptionReadError::InvalidFormat { line: 3, .. }));
    }

    #[test]
    fn test_oversized_hours_are_invalid() {
        let content = "WEBVTT\n\n18446744073709551615:00:00.000 --> 00:02.000\nAlice: hi\n";
        let err = WebVttReader::new().parse_content(content).unwrap_err();
        assert!(matches!(err, CaptionReadError::InvalidFormat { line: 3, .. }));
    }

    #[test]
    fn test_style_block_is_skipped() {
        let content = "WEBVTT\n\nSTYLE\n::cue { color: red }\n\n00:01.000 --> 00:02.000\nBob: ok\n";
        let cues = WebVttReader::new().parse_content(content).unwrap();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Bob: ok");
    }

    #[test]
    fn test_read_cues_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("meeting.vtt");
        fs::write(&path, SAMPLE).unwrap();

        let cues = WebVttReader::new().read_cues(&path).unwrap();
        assert_eq!(cues.len(), 3);
    }

    #[test]
    fn test_read_missing_file_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = WebVttReader::new()
            .read_cues(&tmp.path().join("missing.vtt"))
            .unwrap_err();
        assert!(matches!(err, CaptionReadError::NotFound { .. }));
    }
}

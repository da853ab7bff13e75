use std::collections::HashMap;
use std::time::Instant;

/// Observer for report-building events.
///
/// The use case reports through this port so that the CLI can log progress
/// while tests stay silent or inspect what happened to each speaker.
pub trait ReportLogger: Send {
    /// A speaker is about to be scored (`current` is 1-based).
    fn progress(&mut self, current: usize, total: usize);

    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record one sample of a named figure, such as a speaker's word count.
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Called once after the report is built. Default: no-op.
    fn summary(&self) {}
}

/// Discards every event.
pub struct NullReportLogger;

impl ReportLogger for NullReportLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Sends events to the `log` crate and closes the run with a per-speaker
/// recap: how many speakers got a row, how many words they spoke, and where
/// the time went.
pub struct LogReportLogger {
    started: Instant,
    speakers: usize,
    /// Stage durations in the order the stages ran.
    stages: Vec<(String, f64)>,
    samples: HashMap<String, Vec<f64>>,
    messages: Vec<String>,
}

impl LogReportLogger {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            speakers: 0,
            stages: Vec::new(),
            samples: HashMap::new(),
            messages: Vec::new(),
        }
    }

    /// The end-of-run recap, or `None` before anything was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.stages.is_empty() && self.samples.is_empty() {
            return None;
        }

        let mut lines = vec![format!(
            "Analyzed {} speakers in {:.1}s",
            self.speakers,
            self.started.elapsed().as_secs_f64()
        )];

        let words = self.metrics_for("word_count").unwrap_or(&[]);
        if !words.is_empty() {
            let total: f64 = words.iter().sum();
            let longest = words.iter().copied().fold(0.0, f64::max);
            lines.push(format!(
                "  {} of {} speakers reported: {total:.0} words, longest {longest:.0}",
                words.len(),
                self.speakers
            ));
        } else {
            lines.push(format!("  0 of {} speakers reported", self.speakers));
        }

        if !self.stages.is_empty() {
            let stages: Vec<String> = self
                .stages
                .iter()
                .map(|(stage, ms)| format!("{stage} {ms:.0}ms"))
                .collect();
            lines.push(format!("  stages: {}", stages.join(", ")));
        }

        let mut others: Vec<_> = self
            .samples
            .iter()
            .filter(|(name, _)| name.as_str() != "word_count")
            .collect();
        others.sort_by(|a, b| a.0.cmp(b.0));
        for (name, values) in others {
            let avg = values.iter().sum::<f64>() / values.len().max(1) as f64;
            lines.push(format!("  {name}: avg {avg:.1}"));
        }

        Some(lines.join("\n"))
    }

    /// Total time spent in `stage`, summed over every time it ran.
    pub fn stage_ms(&self, stage: &str) -> Option<f64> {
        let mut runs = self.stages.iter().filter(|(s, _)| s.as_str() == stage).peekable();
        runs.peek()?;
        Some(runs.map(|(_, ms)| ms).sum())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.samples.get(name).map(|v| v.as_slice())
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl Default for LogReportLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportLogger for LogReportLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.speakers = total;
        log::debug!("Scoring speaker {current}/{total}");
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        log::debug!("{stage} took {duration_ms:.1}ms");
        self.stages.push((stage.to_string(), duration_ms));
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.samples.entry(name.to_string()).or_default().push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
        self.messages.push(message.to_string());
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("{text}");
        }
    }
}

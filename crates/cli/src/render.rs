use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use crossterm::style::{Color, Stylize};

use transcript_analyzer_core::report::domain::magnitude::{Magnitude, MagnitudeCategory};
use transcript_analyzer_core::report::domain::report::{
    IndicatorBreakdown, RankedEntry, Report, ReportRow, ReportSummary, SentimentSummary,
};
use transcript_analyzer_core::shared::constants::MIN_SPEAKER_WORDS;

const HEADERS: [&str; 8] = [
    "Speaker",
    "Word count",
    "Sentiment",
    "Emotion",
    "Keywords",
    "Weasel",
    "Hedge",
    "Filler",
];

/// Renders the speaker table, the whole-transcript summary and, when asked,
/// the cues that were dropped for lacking a speaker tag.
pub fn render_report(report: &Report, show_skipped: bool, colored: bool) -> String {
    let mut out = String::new();

    if report.rows.is_empty() {
        out.push_str(&format!(
            "No speaker reached {MIN_SPEAKER_WORDS} words; no per-speaker rows.\n"
        ));
    } else {
        out.push_str(&build_table(&report.rows, colored).to_string());
        out.push('\n');
        out.push_str("Speakers are listed in order of appearance\n");
    }

    out.push('\n');
    out.push_str(&render_summary(&report.summary, colored));

    if show_skipped && !report.skipped_cues.is_empty() {
        out.push('\n');
        out.push_str(&format!(
            "Skipped cues ({}):\n",
            report.skipped_cues.len()
        ));
        for cue in &report.skipped_cues {
            out.push_str(&format!(
                "  #{} [{}] {}\n",
                cue.index,
                cue.reason,
                cue.text.replace('\n', " ")
            ));
        }
    }

    out
}

pub fn render_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

fn build_table(rows: &[ReportRow], colored: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            HEADERS
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );
    if !colored {
        table.force_no_tty();
    }

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.speaker),
            Cell::new(row.word_count).set_alignment(CellAlignment::Right),
            Cell::new(sentiment_text(row.sentiment.as_ref(), colored)),
            Cell::new(ranked_lines(&row.emotions, colored)),
            Cell::new(ranked_lines(&row.keywords, colored)),
            Cell::new(breakdown_text(&row.weasel, colored)),
            Cell::new(breakdown_text(&row.hedge, colored)),
            Cell::new(breakdown_text(&row.filler, colored)),
        ]);
    }

    table
}

fn render_summary(summary: &ReportSummary, colored: bool) -> String {
    let mut out = format!(
        "Overall sentiment: {}\n",
        sentiment_text(summary.sentiment.as_ref(), colored)
    );
    out.push_str("Top keywords:\n");
    if summary.keywords.is_empty() {
        out.push_str(" (none)\n");
    }
    for keyword in &summary.keywords {
        out.push_str(&format!(
            " * {}: {}\n",
            keyword.name,
            paint(&keyword.magnitude, colored)
        ));
    }
    out
}

fn sentiment_text(sentiment: Option<&SentimentSummary>, colored: bool) -> String {
    match sentiment {
        Some(s) => format!("{} {}", s.label, paint(&s.magnitude, colored)),
        None => "n/a".to_string(),
    }
}

fn ranked_lines(entries: &[RankedEntry], colored: bool) -> String {
    entries
        .iter()
        .map(|e| format!("{}: {}", e.name, paint(&e.magnitude, colored)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn breakdown_text(breakdown: &IndicatorBreakdown, colored: bool) -> String {
    let mut lines = vec![paint(&breakdown.magnitude, colored)];
    lines.extend(
        breakdown
            .catalog
            .iter()
            .map(|hit| format!("{} ({})", hit.word, hit.count)),
    );
    lines.join("\n")
}

fn paint(magnitude: &Magnitude, colored: bool) -> String {
    let text = magnitude.to_string();
    if colored {
        text.with(category_color(magnitude.category)).to_string()
    } else {
        text
    }
}

fn category_color(category: MagnitudeCategory) -> Color {
    match category {
        MagnitudeCategory::Green => Color::Green,
        MagnitudeCategory::Blue => Color::Blue,
        MagnitudeCategory::Yellow => Color::Yellow,
        MagnitudeCategory::Red => Color::Red,
    }
}

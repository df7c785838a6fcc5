use colored::{ColoredString, Colorize};

use sentisense_core::history::HistoryStore;
use sentisense_core::types::{AnalysisRecord, SentimentLabel};

use crate::breakdown::{self, Breakdown};
use crate::gauge::{self, Gauge};
use crate::timeline::Timeline;

const BAR_WIDTH: usize = 30;
const GAUGE_WIDTH: usize = 41;
const TEXT_PREVIEW: usize = 48;

fn paint(s: &str, label: SentimentLabel) -> ColoredString {
    match label {
        SentimentLabel::Positive => s.green(),
        SentimentLabel::Neutral => s.blue(),
        SentimentLabel::Negative => s.red(),
    }
}

/// Format the full result view for one analysis: metrics, breakdown, gauge.
pub fn format_result(record: &AnalysisRecord, precision: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "Analysis Results".bold()));
    out.push_str(&format!("{}\n", "=".repeat(40)));
    out.push_str(&format_metrics(record, precision));

    out.push('\n');
    out.push_str(&format_breakdown(&breakdown::project(record.score()), precision));

    out.push('\n');
    out.push_str(&format_gauge(&gauge::project(record.score()), precision));

    out
}

/// Primary label plus the four scores rounded for display.
pub fn format_metrics(record: &AnalysisRecord, precision: usize) -> String {
    let label = record.label();
    let score = record.score();
    let mut out = String::new();

    out.push_str(&format!(
        "{}: {}\n",
        "Primary Sentiment".bold(),
        paint(&label.to_string(), label).bold()
    ));
    out.push_str(&format!(
        "  Compound Score:  {:.precision$}\n",
        score.compound
    ));
    out.push_str(&format!(
        "  Positive Score:  {:.precision$}\n",
        score.positive
    ));
    out.push_str(&format!(
        "  Neutral Score:   {:.precision$}\n",
        score.neutral
    ));
    out.push_str(&format!(
        "  Negative Score:  {:.precision$}\n",
        score.negative
    ));
    out
}

/// Horizontal bar per slice, scaled by share.
pub fn format_breakdown(breakdown: &Breakdown, precision: usize) -> String {
    let mut out = format!("{}\n{}\n", breakdown.title.bold(), "-".repeat(40));
    let dominant = breakdown.dominant();
    for slice in &breakdown.slices {
        let filled = (slice.share * BAR_WIDTH as f64).round() as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(filled.min(BAR_WIDTH)),
            "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH))
        );
        let marker = if slice.label == dominant && slice.share > 0.0 {
            " ◀"
        } else {
            ""
        };
        out.push_str(&format!(
            "  {:<9}{} {:.precision$} ({:.0}%){marker}\n",
            slice.name,
            paint(&bar, slice.label),
            slice.value,
            slice.share * 100.0,
        ));
    }
    out
}

/// Axis from -1 to 1 coloured by band, with a marker under the value.
pub fn format_gauge(gauge: &Gauge, precision: usize) -> String {
    let mut out = format!("{}\n{}\n", gauge.title.bold(), "-".repeat(40));

    let (lo, hi) = gauge.axis;
    let step = (hi - lo) / (GAUGE_WIDTH - 1) as f64;
    let mut axis = String::new();
    for i in 0..GAUGE_WIDTH {
        let band = gauge.band_for(lo + step * i as f64);
        axis.push_str(&paint("━", band.label).to_string());
    }
    let marker_at = (gauge.position(gauge.value) * (GAUGE_WIDTH - 1) as f64).round() as usize;

    out.push_str(&format!("  {axis}\n"));
    out.push_str(&format!("  {}▲\n", " ".repeat(marker_at)));
    out.push_str(&format!(
        "  {:<w$}{}\n",
        format!("{lo:.0}"),
        format!("{hi:.0}"),
        w = GAUGE_WIDTH - 1
    ));
    let band = gauge.current_band();
    out.push_str(&format!(
        "  Value: {} ({} band)\n",
        paint(&format!("{:.precision$}", gauge.value), band.label).bold(),
        band.label.name().to_lowercase(),
    ));
    out
}

/// Table of every point in history order.
pub fn format_timeline(timeline: &Timeline, precision: usize) -> String {
    let mut out = format!("\n{}\n{}\n", timeline.title.bold(), "-".repeat(40));
    if timeline.is_empty() {
        out.push_str("  No analyses yet.\n");
        return out;
    }

    for point in &timeline.points {
        out.push_str(&format!(
            "  {:>3}. {:>+w$.precision$}  {}  {}\n",
            point.index + 1,
            point.compound,
            paint(&format!("{:<11}", point.label.to_string()), point.label),
            preview(&point.text),
            w = precision + 3,
        ));
    }
    if let Some(mean) = timeline.mean_compound() {
        out.push_str(&format!("  Mean compound: {mean:+.precision$}\n"));
    }
    out
}

/// One-line tally of the session history.
pub fn format_summary(history: &HistoryStore) -> String {
    let counts = history.label_counts();
    format!(
        "{}: {} analyses ({} positive, {} neutral, {} negative)\n",
        "History".bold(),
        history.len(),
        counts[&SentimentLabel::Positive].to_string().green(),
        counts[&SentimentLabel::Neutral].to_string().blue(),
        counts[&SentimentLabel::Negative].to_string().red(),
    )
}

/// First line of `text`, cut to a fixed width.
fn preview(text: &str) -> String {
    let first = text.lines().next().unwrap_or_default();
    let multiline = text.lines().nth(1).is_some();
    if first.chars().count() > TEXT_PREVIEW {
        let cut: String = first.chars().take(TEXT_PREVIEW - 1).collect();
        format!("{cut}…")
    } else if multiline {
        format!("{first} …")
    } else {
        first.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline;
    use sentisense_core::types::ScoreVector;

    fn positive_record() -> AnalysisRecord {
        AnalysisRecord::new(
            "I love this product, it's amazing!",
            ScoreVector::new(0.734, 0.266, 0.0, 0.8516),
        )
    }

    #[test]
    fn test_metrics_rounded_to_precision() {
        colored::control::set_override(false);
        let out = format_metrics(&positive_record(), 2);
        assert!(out.contains("Primary Sentiment: Positive 😊"), "{out}");
        assert!(out.contains("Compound Score:  0.85"), "{out}");
        assert!(out.contains("Positive Score:  0.73"), "{out}");
        assert!(out.contains("Neutral Score:   0.27"), "{out}");
        assert!(out.contains("Negative Score:  0.00"), "{out}");
    }

    #[test]
    fn test_result_has_all_sections() {
        let out = format_result(&positive_record(), 2);
        assert!(out.contains("Analysis Results"));
        assert!(out.contains("Sentiment Breakdown"));
        assert!(out.contains("Compound Sentiment Score"));
    }

    #[test]
    fn test_breakdown_marks_dominant_slice() {
        colored::control::set_override(false);
        let out = format_breakdown(&breakdown::project(positive_record().score()), 2);
        let marked: Vec<&str> = out.lines().filter(|l| l.ends_with('◀')).collect();
        assert_eq!(marked.len(), 1, "{out}");
        assert!(marked[0].trim_start().starts_with("Positive"), "{out}");

        let empty = format_breakdown(&breakdown::project(&ScoreVector::default()), 2);
        assert!(!empty.contains('◀'), "{empty}");
    }

    #[test]
    fn test_gauge_reports_band() {
        let g = gauge::project(&ScoreVector::new(0.0, 1.0, 0.0, -0.3));
        let out = format_gauge(&g, 2);
        assert!(out.contains("negative band"), "{out}");
        assert!(out.contains('▲'));
    }

    #[test]
    fn test_timeline_lists_points_in_order() {
        let records = vec![
            positive_record(),
            AnalysisRecord::new("terrible", ScoreVector::new(0.0, 0.0, 1.0, -0.4767)),
        ];
        let out = format_timeline(&timeline::project(&records), 2);
        let first = out.find("I love this product").unwrap();
        let second = out.find("terrible").unwrap();
        assert!(first < second);
        assert!(out.contains("Mean compound"));
    }

    #[test]
    fn test_empty_timeline() {
        let out = format_timeline(&timeline::project(&[]), 2);
        assert!(out.contains("No analyses yet."));
    }

    #[test]
    fn test_preview_truncates() {
        let long = "word ".repeat(30);
        let p = preview(&long);
        assert_eq!(p.chars().count(), TEXT_PREVIEW);
        assert!(p.ends_with('…'));
        assert_eq!(preview("one\ntwo"), "one …");
        assert_eq!(preview("short"), "short");
    }
}

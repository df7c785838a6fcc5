use std::collections::BTreeMap;

use serde::Serialize;

use sentisense_core::history;
use sentisense_core::types::{AnalysisRecord, ScoreVector, SentimentLabel};

use crate::breakdown::{self, Breakdown};
use crate::gauge::{self, Gauge};
use crate::timeline::{self, Timeline};

/// Chart configurations and metrics for a single analysis.
#[derive(Debug, Serialize)]
pub struct ResultReport<'a> {
    pub text: &'a str,
    pub label: SentimentLabel,
    pub primary_sentiment: String,
    pub scores: &'a ScoreVector,
    pub breakdown: Breakdown,
    pub gauge: Gauge,
}

impl<'a> ResultReport<'a> {
    pub fn new(record: &'a AnalysisRecord) -> Self {
        Self {
            text: record.text(),
            label: record.label(),
            primary_sentiment: record.label().to_string(),
            scores: record.score(),
            breakdown: breakdown::project(record.score()),
            gauge: gauge::project(record.score()),
        }
    }
}

/// Timeline chart plus per-label tallies for a whole history.
#[derive(Debug, Serialize)]
pub struct HistoryReport {
    pub count: usize,
    pub label_counts: BTreeMap<SentimentLabel, usize>,
    pub timeline: Timeline,
}

impl HistoryReport {
    pub fn new(records: &[AnalysisRecord]) -> Self {
        Self {
            count: records.len(),
            label_counts: history::label_counts(records),
            timeline: timeline::project(records),
        }
    }
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> String {
    if compact {
        serde_json::to_string(value).expect("report should be serializable")
    } else {
        serde_json::to_string_pretty(value).expect("report should be serializable")
    }
}

/// Format one analysis as JSON.
pub fn format_result(record: &AnalysisRecord, compact: bool) -> String {
    to_json(&ResultReport::new(record), compact)
}

/// Format a history as JSON.
pub fn format_history(records: &[AnalysisRecord], compact: bool) -> String {
    to_json(&HistoryReport::new(records), compact)
}

use std::collections::BTreeMap;

use serde::Serialize;

use sentisense_core::types::{AnalysisRecord, SentimentLabel};

pub const TIMELINE_TITLE: &str = "Sentiment Analysis History Timeline";

/// One history entry plotted as (compound, label).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    /// Zero-based position in the history.
    pub index: usize,
    pub compound: f64,
    pub label: SentimentLabel,
    /// Source text, shown on hover.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub title: &'static str,
    pub points: Vec<TimelinePoint>,
    /// Display label (`Positive 😊`) to colour.
    pub color_map: BTreeMap<String, &'static str>,
}

pub fn project(records: &[AnalysisRecord]) -> Timeline {
    let points = records
        .iter()
        .enumerate()
        .map(|(index, r)| TimelinePoint {
            index,
            compound: r.score().compound,
            label: r.label(),
            text: r.text().to_string(),
        })
        .collect();

    Timeline {
        title: TIMELINE_TITLE,
        points,
        color_map: SentimentLabel::ALL
            .iter()
            .map(|l| (l.to_string(), l.color()))
            .collect(),
    }
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Mean compound score across all points, if any.
    pub fn mean_compound(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        let sum: f64 = self.points.iter().map(|p| p.compound).sum();
        Some(sum / self.points.len() as f64)
    }
}

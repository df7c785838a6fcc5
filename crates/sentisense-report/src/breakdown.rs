use serde::Serialize;

use sentisense_core::types::{ScoreVector, SentimentLabel};

pub const BREAKDOWN_TITLE: &str = "Sentiment Breakdown";

/// One wedge of the proportional breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: SentimentLabel,
    pub name: &'static str,
    pub value: f64,
    /// Fraction of the three values' sum; 0 when the sum is 0.
    pub share: f64,
    pub color: &'static str,
}

/// Three-way positive/neutral/negative split of a single result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub title: &'static str,
    pub slices: [Slice; 3],
}

pub fn project(score: &ScoreVector) -> Breakdown {
    let total = score.proportion_sum();
    let slice = |label: SentimentLabel, value: f64| Slice {
        label,
        name: label.name(),
        value,
        share: if total > 0.0 { value / total } else { 0.0 },
        color: label.color(),
    };

    Breakdown {
        title: BREAKDOWN_TITLE,
        slices: [
            slice(SentimentLabel::Positive, score.positive),
            slice(SentimentLabel::Neutral, score.neutral),
            slice(SentimentLabel::Negative, score.negative),
        ],
    }
}

impl Breakdown {
    pub fn slice(&self, label: SentimentLabel) -> &Slice {
        match label {
            SentimentLabel::Positive => &self.slices[0],
            SentimentLabel::Neutral => &self.slices[1],
            SentimentLabel::Negative => &self.slices[2],
        }
    }

    /// The label with the largest slice. Ties go to the earlier label.
    pub fn dominant(&self) -> SentimentLabel {
        let mut best = &self.slices[0];
        for s in &self.slices[1..] {
            if s.value > best.value {
                best = s;
            }
        }
        best.label
    }
}

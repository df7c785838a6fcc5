use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classifier;

/// Polarity scores produced by a single scorer call.
///
/// `positive`, `neutral` and `negative` are proportions of the text and sum
/// to ~1.0 (or are all zero when the text has no scorable tokens).
/// `compound` is the normalized aggregate in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreVector {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
    pub compound: f64,
}

impl ScoreVector {
    pub fn new(positive: f64, neutral: f64, negative: f64, compound: f64) -> Self {
        Self {
            positive,
            neutral,
            negative,
            compound,
        }
    }

    /// Sum of the three proportions.
    pub fn proportion_sum(&self) -> f64 {
        self.positive + self.neutral + self.negative
    }

    pub fn is_finite(&self) -> bool {
        self.positive.is_finite()
            && self.neutral.is_finite()
            && self.negative.is_finite()
            && self.compound.is_finite()
    }
}

/// Discrete sentiment derived from the compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Display order used by every chart: positive, neutral, negative.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    pub fn from_compound(compound: f64) -> Self {
        classifier::classify_compound(compound)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "😊",
            SentimentLabel::Neutral => "😐",
            SentimentLabel::Negative => "😠",
        }
    }

    /// Chart colour for this label.
    pub fn color(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "#00C853",
            SentimentLabel::Neutral => "#039BE5",
            SentimentLabel::Negative => "#D32F2F",
        }
    }
}

/// Displays as `Positive 😊`, the form shown in metrics and written to exports.
impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.emoji())
    }
}

/// Accepts the bare name (`positive`) or the display form (`Positive 😊`).
impl std::str::FromStr for SentimentLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.split_whitespace().next().unwrap_or_default();
        match name.to_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "neutral" => Ok(SentimentLabel::Neutral),
            "negative" => Ok(SentimentLabel::Negative),
            _ => Err(anyhow::anyhow!("unknown sentiment label: {s}")),
        }
    }
}

/// One completed analysis. The label is always derived from the score, so a
/// record can never disagree with the classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRecord {
    text: String,
    label: SentimentLabel,
    score: ScoreVector,
}

impl AnalysisRecord {
    pub fn new(text: impl Into<String>, score: ScoreVector) -> Self {
        Self {
            text: text.into(),
            label: classifier::classify(&score),
            score,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn label(&self) -> SentimentLabel {
        self.label
    }

    pub fn score(&self) -> &ScoreVector {
        &self.score
    }
}

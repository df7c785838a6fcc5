use crate::types::{ScoreVector, SentimentLabel};

/// Compound scores at or above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Map a score vector onto a discrete label.
pub fn classify(score: &ScoreVector) -> SentimentLabel {
    classify_compound(score.compound)
}

/// Boundary values fall on the non-neutral side. NaN lands in the neutral band.
pub fn classify_compound(compound: f64) -> SentimentLabel {
    if compound >= POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if compound <= NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

use serde::Serialize;

use sentisense_core::classifier::{NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
use sentisense_core::types::{ScoreVector, SentimentLabel};

pub const GAUGE_TITLE: &str = "Compound Sentiment Score";
pub const GAUGE_BAR_COLOR: &str = "#1E88E5";
pub const GAUGE_AXIS: (f64, f64) = (-1.0, 1.0);

/// A coloured range on the gauge axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    pub label: SentimentLabel,
    pub from: f64,
    pub to: f64,
    pub color: &'static str,
}

/// Compound score dial: the value plus three fixed display bands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub title: &'static str,
    pub value: f64,
    pub axis: (f64, f64),
    pub bar_color: &'static str,
    pub bands: [Band; 3],
}

pub fn project(score: &ScoreVector) -> Gauge {
    Gauge {
        title: GAUGE_TITLE,
        value: score.compound,
        axis: GAUGE_AXIS,
        bar_color: GAUGE_BAR_COLOR,
        bands: [
            Band {
                label: SentimentLabel::Negative,
                from: GAUGE_AXIS.0,
                to: NEGATIVE_THRESHOLD,
                color: SentimentLabel::Negative.color(),
            },
            Band {
                label: SentimentLabel::Neutral,
                from: NEGATIVE_THRESHOLD,
                to: POSITIVE_THRESHOLD,
                color: SentimentLabel::Neutral.color(),
            },
            Band {
                label: SentimentLabel::Positive,
                from: POSITIVE_THRESHOLD,
                to: GAUGE_AXIS.1,
                color: SentimentLabel::Positive.color(),
            },
        ],
    }
}

impl Gauge {
    /// Band containing `value`: [-1,-0.05) red, [-0.05,0.05] blue, (0.05,1] green.
    ///
    /// This is display configuration only; at exactly ±0.05 the band is the
    /// middle one even though the classifier puts those values on the outer side.
    pub fn band_for(&self, value: f64) -> &Band {
        if value < self.bands[1].from {
            &self.bands[0]
        } else if value <= self.bands[1].to {
            &self.bands[1]
        } else {
            &self.bands[2]
        }
    }

    pub fn current_band(&self) -> &Band {
        self.band_for(self.value)
    }

    /// Position of `value` along the axis as a fraction in [0, 1].
    pub fn position(&self, value: f64) -> f64 {
        let (lo, hi) = self.axis;
        ((value.clamp(lo, hi) - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}

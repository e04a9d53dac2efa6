//! Per-cycle attendance counts and their chart scaling.

use serde::{Deserialize, Serialize};

/// Attendance counts for one cycle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleSummary {
    /// Sessions marked done
    pub done: usize,

    /// Sessions marked partial
    pub partial: usize,

    /// Sessions marked missed
    pub missed: usize,
}

impl CycleSummary {
    /// Height of the positive stack (done + partial).
    pub fn positive(&self) -> usize {
        self.done + self.partial
    }
}

/// Scaled heights of one cycle's bar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChartBar {
    /// Done segment, stacked at the bottom of the positive band
    pub done: f64,

    /// Partial segment, stacked on top of done
    pub partial: f64,

    /// Missed segment, hanging into the negative band
    pub missed: f64,
}

/// Summaries scaled to a fixed visual height.
///
/// The height is split into a positive band (done + partial) and a negative
/// band (missed) in proportion to the largest value each band has to show.
/// Both maxima are floored at 1 so an all-zero history still scales.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub total_height: f64,
    pub max_positive: usize,
    pub max_negative: usize,
    pub positive_band: f64,
    pub negative_band: f64,
    pub bars: Vec<ChartBar>,
}

impl Chart {
    /// Scales `summaries` into a chart `total_height` units tall.
    pub fn scale(summaries: &[CycleSummary], total_height: f64) -> Self {
        let max_positive = summaries
            .iter()
            .map(CycleSummary::positive)
            .max()
            .unwrap_or(0)
            .max(1);
        let max_negative = summaries.iter().map(|s| s.missed).max().unwrap_or(0).max(1);

        let positive_band =
            total_height * max_positive as f64 / (max_positive + max_negative) as f64;
        let negative_band = total_height - positive_band;

        let bars = summaries
            .iter()
            .map(|s| ChartBar {
                done: positive_band * s.done as f64 / max_positive as f64,
                partial: positive_band * s.partial as f64 / max_positive as f64,
                missed: negative_band * s.missed as f64 / max_negative as f64,
            })
            .collect();

        Self {
            total_height,
            max_positive,
            max_negative,
            positive_band,
            negative_band,
            bars,
        }
    }
}

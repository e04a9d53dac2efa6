//! Text rendering of the per-cycle summary chart.

use std::fmt;

use crate::models::{Chart, CycleSummary};

/// Rows a chart is drawn in unless configured otherwise.
pub const DEFAULT_CHART_HEIGHT: usize = 8;

/// Stacked bars per cycle: done and partial above the axis, missed below it.
pub struct SummaryChart<'a> {
    summaries: &'a [CycleSummary],
    height: usize,
}

impl<'a> SummaryChart<'a> {
    pub fn new(summaries: &'a [CycleSummary]) -> Self {
        Self {
            summaries,
            height: DEFAULT_CHART_HEIGHT,
        }
    }

    /// Sets the number of text rows the bars span.
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = height.max(2);
        self
    }
}

struct Segments {
    done: usize,
    top: usize,
    missed: usize,
}

impl fmt::Display for SummaryChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.summaries.is_empty() {
            return writeln!(f, "No cycles to chart.");
        }

        let chart = Chart::scale(self.summaries, self.height as f64);
        let positive_rows = chart.positive_band.round() as usize;
        let negative_rows = self.height.saturating_sub(positive_rows);
        let bars: Vec<Segments> = chart
            .bars
            .iter()
            .map(|bar| Segments {
                done: bar.done.round() as usize,
                top: (bar.done + bar.partial).round() as usize,
                missed: bar.missed.round() as usize,
            })
            .collect();

        let line = |glyph: &dyn Fn(&Segments) -> &'static str| {
            bars.iter().map(glyph).collect::<Vec<_>>().join(" ")
        };

        writeln!(f, "```text")?;
        for level in (1..=positive_rows).rev() {
            let row = line(&|s| match level {
                l if l <= s.done => "██",
                l if l <= s.top => "▒▒",
                _ => "  ",
            });
            writeln!(f, "{}", row.trim_end())?;
        }
        writeln!(f, "{}", "─".repeat(bars.len() * 3 - 1))?;
        for level in 1..=negative_rows {
            let row = line(&|s| if level <= s.missed { "░░" } else { "  " });
            writeln!(f, "{}", row.trim_end())?;
        }
        writeln!(f, "```")?;
        writeln!(f)?;

        for (cycle, summary) in self.summaries.iter().enumerate() {
            writeln!(
                f,
                "- Cycle {}: {} done, {} partial, {} missed",
                cycle + 1,
                summary.done,
                summary.partial,
                summary.missed
            )?;
        }
        Ok(())
    }
}

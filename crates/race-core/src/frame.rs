// File: crates/race-core/src/frame.rs
// Summary: Pure per-period frame computation (sort, extents, label text). No drawing here.

use skia_safe as skia;

use crate::error::{RaceError, Result};
use crate::table::Table;

/// How raw values are scaled and suffixed for display, e.g. 1e9 and "$B".
#[derive(Clone, Debug, PartialEq)]
pub struct ValueFormat {
    pub scale: f64,
    pub suffix: String,
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self { scale: 1e9, suffix: "$B".to_string() }
    }
}

impl ValueFormat {
    pub fn scaled(&self, raw: f64) -> f64 {
        if self.scale == 0.0 { raw } else { raw / self.scale }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameBar<'a> {
    pub entity: &'a str,
    /// Raw table value (unscaled).
    pub value: f64,
    pub color: skia::Color,
}

/// Snapshot of one period, bars ascending by value.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<'a> {
    pub period: &'a str,
    pub bars: Vec<FrameBar<'a>>,
}

impl<'a> Frame<'a> {
    /// Sort the `period` column of `table` ascending. Ties keep table order.
    pub fn compute(table: &'a Table, colors: &[skia::Color], period: &str) -> Result<Self> {
        let col = table
            .period_index(period)
            .ok_or_else(|| RaceError::UnknownPeriod(period.to_string()))?;
        let mut bars = table
            .entities()
            .iter()
            .zip(table.column(col))
            .zip(colors.iter().copied())
            .map(|((entity, value), color)| FrameBar { entity: entity.as_str(), value, color })
            .collect::<Vec<_>>();
        bars.sort_by(|a, b| a.value.total_cmp(&b.value));
        Ok(Self { period: &table.periods()[col], bars })
    }

    pub fn len(&self) -> usize { self.bars.len() }

    pub fn is_empty(&self) -> bool { self.bars.is_empty() }

    /// Entity names bottom (index 0) to top.
    pub fn entities(&self) -> Vec<&'a str> {
        self.bars.iter().map(|b| b.entity).collect()
    }

    /// Value label for every bar, same order as `bars`.
    pub fn labels(&self, fmt: &ValueFormat) -> Vec<String> {
        self.bars.iter().map(|b| format_value_label(b.value, fmt)).collect()
    }
}

/// Bar annotation, two decimals plus suffix: `"50.00 $B"`.
pub fn format_value_label(raw: f64, fmt: &ValueFormat) -> String {
    format!("{:.2} {}", fmt.scaled(raw), fmt.suffix)
}

/// Value-axis tick text, one decimal.
pub fn format_tick(scaled: f64) -> String {
    format!("{:.1}", scaled)
}

/// Value-axis domain in scaled units: always includes zero, padded 5% past the extremes.
pub fn value_extent(frame: &Frame<'_>, fmt: &ValueFormat) -> (f64, f64) {
    let (lo, hi) = frame.bars.iter().fold((0.0f64, 0.0f64), |(lo, hi), b| {
        let v = fmt.scaled(b.value);
        (lo.min(v), hi.max(v))
    });
    let pad = (hi - lo) * 0.05;
    let lo = if lo < 0.0 { lo - pad } else { 0.0 };
    let hi = if hi > 0.0 { hi + pad } else { 0.0 };
    if (hi - lo).abs() < 1e-12 { (lo, lo + 1.0) } else { (lo, hi) }
}

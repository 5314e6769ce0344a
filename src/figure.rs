//! Chart datasets handed from the callbacks to the plot widgets.
//!
//! Figures own their data so the UI can keep the last one around between
//! frames without holding a borrow of the dataset.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use crate::data::aggregate::ScatterPoint;

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieFigure {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

/// Angular extent of one slice, in radians, clockwise from twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub start: f64,
    pub end: f64,
    pub fraction: f64,
}

impl PieFigure {
    pub fn new(title: impl Into<String>, slices: impl IntoIterator<Item = (String, u64)>) -> Self {
        PieFigure {
            title: title.into(),
            slices: slices
                .into_iter()
                .map(|(label, value)| PieSlice { label, value })
                .collect(),
        }
    }

    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// One wedge per slice, in slice order. Empty when the total is zero.
    pub fn wedges(&self) -> Vec<Wedge> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        let mut start = 0.0;
        self.slices
            .iter()
            .map(|s| {
                let fraction = s.value as f64 / total as f64;
                let end = start + fraction * TAU;
                let wedge = Wedge {
                    start,
                    end,
                    fraction,
                };
                start = end;
                wedge
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

/// Points sharing one booster version category (one colour in the chart).
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub category: String,
    /// `[payload_mass, class]` pairs in dataset order.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub title: String,
    /// Sorted by category name.
    pub series: Vec<ScatterSeries>,
}

impl ScatterFigure {
    /// Group scatter points by booster category, preserving point order
    /// within each category.
    pub fn from_points<'a>(
        title: impl Into<String>,
        points: impl IntoIterator<Item = ScatterPoint<'a>>,
    ) -> Self {
        let mut grouped: BTreeMap<&'a str, Vec<[f64; 2]>> = BTreeMap::new();
        for p in points {
            grouped
                .entry(p.booster_version_category)
                .or_default()
                .push([p.payload_mass, p.outcome.as_f64()]);
        }
        ScatterFigure {
            title: title.into(),
            series: grouped
                .into_iter()
                .map(|(category, points)| ScatterSeries {
                    category: category.to_string(),
                    points,
                })
                .collect(),
        }
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Figure
// ---------------------------------------------------------------------------

/// What a callback renders into its output target.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Pie(PieFigure),
    Scatter(ScatterFigure),
    /// Shown after a failed interaction.
    Empty { message: String },
}

impl Figure {
    pub fn empty(message: impl Into<String>) -> Self {
        Figure::Empty {
            message: message.into(),
        }
    }
}

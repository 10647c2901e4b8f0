//! Pie-chart geometry for the category breakdown.
//!
//! Angles are in degrees, measured counter-clockwise from the positive x
//! axis. The first slice starts at 90° (twelve o'clock) and slices follow
//! counter-clockwise in category order.

use crate::models::CategoryTotal;

pub const START_ANGLE: f64 = 90.0;

pub const EMPTY_PLACEHOLDER: &str = "No expenses recorded yet.";

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Number of expenses behind the slice.
    pub count: i64,
    /// Fraction of the chart total, in 0.0..=1.0.
    pub share: f64,
    pub start_deg: f64,
    pub sweep_deg: f64,
}

impl PieSlice {
    pub fn percent_label(&self) -> String {
        percent_label(self.share)
    }

    /// Point halfway along the slice's arc at the given radius.
    pub fn label_position(&self, radius: f64) -> (f64, f64) {
        let mid = (self.start_deg + self.sweep_deg / 2.0).to_radians();
        (radius * mid.cos(), radius * mid.sin())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PieChart {
    pub slices: Vec<PieSlice>,
    pub total: f64,
}

impl PieChart {
    /// Build slices from category totals. Categories whose total is not
    /// positive have no area and are left out.
    pub fn from_totals(totals: &[CategoryTotal]) -> Self {
        let positive: Vec<&CategoryTotal> = totals.iter().filter(|t| t.total > 0.0).collect();
        let total: f64 = positive.iter().map(|t| t.total).sum();
        if total <= 0.0 {
            return Self::default();
        }

        let mut start = START_ANGLE;
        let slices = positive
            .into_iter()
            .map(|t| {
                let share = t.total / total;
                let slice = PieSlice {
                    label: display_label(&t.category),
                    value: t.total,
                    count: t.count,
                    share,
                    start_deg: start,
                    sweep_deg: share * 360.0,
                };
                start += slice.sweep_deg;
                slice
            })
            .collect();

        Self { slices, total }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Index of the slice covering the given angle.
    pub fn slice_at(&self, angle_deg: f64) -> Option<usize> {
        if self.slices.is_empty() {
            return None;
        }
        let offset = (angle_deg - START_ANGLE).rem_euclid(360.0);
        let mut acc = 0.0;
        for (i, slice) in self.slices.iter().enumerate() {
            acc += slice.sweep_deg;
            if offset < acc {
                return Some(i);
            }
        }
        // Rounding can leave a sliver just under 360°
        Some(self.slices.len() - 1)
    }

    /// Sample the unit disc on a `steps` x `steps` grid and bucket each
    /// point by the slice it falls in. Used to paint the chart on a canvas.
    pub fn rasterize(&self, steps: usize) -> Vec<Vec<(f64, f64)>> {
        let mut buckets = vec![Vec::new(); self.slices.len()];
        if self.slices.is_empty() || steps < 2 {
            return buckets;
        }
        let step = 2.0 / (steps - 1) as f64;
        for yi in 0..steps {
            let y = -1.0 + yi as f64 * step;
            for xi in 0..steps {
                let x = -1.0 + xi as f64 * step;
                if x * x + y * y > 1.0 {
                    continue;
                }
                if let Some(i) = self.slice_at(y.atan2(x).to_degrees()) {
                    buckets[i].push((x, y));
                }
            }
        }
        buckets
    }
}

pub fn percent_label(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

fn display_label(category: &str) -> String {
    if category.is_empty() {
        "(none)".to_string()
    } else {
        category.to_string()
    }
}

//! Time-series projector: cumulative cost/benefit per month for charting.

use serde::{Deserialize, Serialize};

/// One month of the cumulative value chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    pub month: u32,
    /// Total investment; constant across the series.
    pub cost: f64,
    /// Cumulative benefit up to and including this month.
    pub benefit: f64,
    /// benefit - cost
    pub roi: f64,
}

/// A `horizon + 1` point series, months `0..=horizon`.
///
/// The timeline is a description, not a buffer: every call to `iter()`
/// restarts from month 0 and recomputes the points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    monthly_benefit: f64,
    total_cost: f64,
    horizon_months: u32,
}

impl Timeline {
    pub fn new(total_annual_benefit: f64, total_cost: f64, horizon_months: u32) -> Self {
        Self {
            monthly_benefit: total_annual_benefit / 12.0,
            total_cost,
            horizon_months,
        }
    }

    pub fn len(&self) -> usize {
        usize::try_from(u64::from(self.horizon_months) + 1).unwrap_or(usize::MAX)
    }

    /// Never true; month 0 always exists.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> TimelineIter {
        TimelineIter {
            timeline: *self,
            next_month: 0,
            cumulative: 0.0,
        }
    }

    pub fn to_vec(&self) -> Vec<ChartPoint> {
        self.iter().collect()
    }

    /// First month whose cumulative benefit covers the investment.
    pub fn break_even_month(&self) -> Option<u32> {
        self.iter().find(|p| p.roi >= 0.0).map(|p| p.month)
    }
}

impl IntoIterator for Timeline {
    type Item = ChartPoint;
    type IntoIter = TimelineIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &Timeline {
    type Item = ChartPoint;
    type IntoIter = TimelineIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over [`Timeline`] points.
#[derive(Debug, Clone)]
pub struct TimelineIter {
    timeline: Timeline,
    // Wide enough to step past `u32::MAX`.
    next_month: u64,
    cumulative: f64,
}

impl Iterator for TimelineIter {
    type Item = ChartPoint;

    fn next(&mut self) -> Option<ChartPoint> {
        let Ok(month) = u32::try_from(self.next_month) else {
            return None;
        };
        if month > self.timeline.horizon_months {
            return None;
        }
        if month > 0 {
            self.cumulative += self.timeline.monthly_benefit;
        }
        self.next_month += 1;

        Some(ChartPoint {
            month,
            cost: self.timeline.total_cost,
            benefit: self.cumulative,
            roi: self.cumulative - self.timeline.total_cost,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = u64::from(self.timeline.horizon_months) + 1;
        let remaining =
            usize::try_from(total.saturating_sub(self.next_month)).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TimelineIter {}

impl std::iter::FusedIterator for TimelineIter {}

/// Build the chart series for a benefit/cost pair.
pub fn project_timeline(total_annual_benefit: f64, total_cost: f64, horizon_months: u32) -> Timeline {
    Timeline::new(total_annual_benefit, total_cost, horizon_months)
}

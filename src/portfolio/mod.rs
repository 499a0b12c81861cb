//! Portfolio performance view: time-range window and summary figures.

use crate::error::TrackerError;
use crate::models::{AllocationSlice, Holding, PerformanceSample};
use chrono::{Days, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeRange {
    OneWeek,
    #[default]
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    All,
}

impl TimeRange {
    pub const ALL: [TimeRange; 6] = [
        TimeRange::OneWeek,
        TimeRange::OneMonth,
        TimeRange::ThreeMonths,
        TimeRange::SixMonths,
        TimeRange::OneYear,
        TimeRange::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::OneWeek => "1W",
            TimeRange::OneMonth => "1M",
            TimeRange::ThreeMonths => "3M",
            TimeRange::SixMonths => "6M",
            TimeRange::OneYear => "1Y",
            TimeRange::All => "ALL",
        }
    }

    /// First date inside the window ending at `latest`; `None` for `All`.
    pub fn start(&self, latest: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeRange::OneWeek => latest.checked_sub_days(Days::new(7)),
            TimeRange::OneMonth => latest.checked_sub_months(Months::new(1)),
            TimeRange::ThreeMonths => latest.checked_sub_months(Months::new(3)),
            TimeRange::SixMonths => latest.checked_sub_months(Months::new(6)),
            TimeRange::OneYear => latest.checked_sub_months(Months::new(12)),
            TimeRange::All => None,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TimeRange::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TrackerError::UnknownTimeRange(s.to_string()))
    }
}

/// Samples inside `range`, counted back from the latest sample.
pub fn window(samples: &[PerformanceSample], range: TimeRange) -> Vec<PerformanceSample> {
    let Some(latest) = samples.iter().map(|s| s.date).max() else {
        return Vec::new();
    };
    match range.start(latest) {
        Some(start) => samples.iter().filter(|s| s.date >= start).cloned().collect(),
        None => samples.to_vec(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSummary {
    pub total_value: f64,
    pub total_return: f64,
    pub total_return_pct: f64,
    pub last_change: f64,
    pub last_change_pct: f64,
    /// Portfolio return minus benchmark return, in percentage points.
    pub vs_benchmark_pct: f64,
}

fn pct(from: f64, to: f64) -> f64 {
    if from == 0.0 { 0.0 } else { (to - from) / from * 100.0 }
}

/// Summary over a chronological sample window; `None` when it is empty.
pub fn summarize(samples: &[PerformanceSample]) -> Option<PerformanceSummary> {
    let first = samples.first()?;
    let last = samples.last()?;
    let prev = samples.len().checked_sub(2).map_or(first, |i| &samples[i]);

    Some(PerformanceSummary {
        total_value: last.value,
        total_return: last.value - first.value,
        total_return_pct: pct(first.value, last.value),
        last_change: last.value - prev.value,
        last_change_pct: pct(prev.value, last.value),
        vs_benchmark_pct: pct(first.value, last.value) - pct(first.benchmark, last.benchmark),
    })
}

/// Portfolio view state.
#[derive(Debug, Clone)]
pub struct PortfolioView {
    samples: Vec<PerformanceSample>,
    pub allocation: Vec<AllocationSlice>,
    pub holdings: Vec<Holding>,
    pub range: TimeRange,
}

impl PortfolioView {
    pub fn new(
        mut samples: Vec<PerformanceSample>,
        allocation: Vec<AllocationSlice>,
        holdings: Vec<Holding>,
    ) -> Self {
        samples.sort_by_key(|s| s.date);
        Self {
            samples,
            allocation,
            holdings,
            range: TimeRange::default(),
        }
    }

    pub fn visible_samples(&self) -> Vec<PerformanceSample> {
        window(&self.samples, self.range)
    }

    pub fn summary(&self) -> Option<PerformanceSummary> {
        summarize(&self.visible_samples())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DataSource, SeedData};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn view(range: TimeRange) -> PortfolioView {
        let mut v = PortfolioView::new(
            SeedData.performance(),
            SeedData.allocation(),
            SeedData.holdings(),
        );
        v.range = range;
        v
    }

    #[test]
    fn test_range_parse() {
        assert_eq!("1w".parse::<TimeRange>().unwrap(), TimeRange::OneWeek);
        assert_eq!("ALL".parse::<TimeRange>().unwrap(), TimeRange::All);
        assert_eq!("all".parse::<TimeRange>().unwrap(), TimeRange::All);
        assert_eq!(
            "2W".parse::<TimeRange>(),
            Err(TrackerError::UnknownTimeRange("2W".into()))
        );
    }

    #[test]
    fn test_range_start() {
        let latest = d(2024, 8, 30);
        assert_eq!(TimeRange::OneWeek.start(latest), Some(d(2024, 8, 23)));
        assert_eq!(TimeRange::OneMonth.start(latest), Some(d(2024, 7, 30)));
        assert_eq!(TimeRange::OneYear.start(latest), Some(d(2023, 8, 30)));
        assert_eq!(TimeRange::All.start(latest), None);
    }

    #[test]
    fn test_window_sizes() {
        assert_eq!(view(TimeRange::OneWeek).visible_samples().len(), 2);
        assert_eq!(view(TimeRange::OneMonth).visible_samples().len(), 7);
        assert_eq!(view(TimeRange::All).visible_samples().len(), 7);
        assert!(window(&[], TimeRange::All).is_empty());
    }

    #[test]
    fn test_summary_over_month() {
        let s = view(TimeRange::OneMonth).summary().unwrap();
        assert_eq!(s.total_value, 847_392.0);
        assert_eq!(s.total_return, 65_392.0);
        assert!((s.total_return_pct - 8.362148).abs() < 1e-4);
        assert_eq!(s.last_change, 8_392.0);
        // benchmark moved 780k -> 815k, +4.487%
        assert!((s.vs_benchmark_pct - 3.875).abs() < 1e-2);
    }

    #[test]
    fn test_summary_single_sample() {
        let only = vec![PerformanceSample { date: d(2024, 1, 1), value: 10.0, benchmark: 5.0 }];
        let s = summarize(&only).unwrap();
        assert_eq!(s.total_return, 0.0);
        assert_eq!(s.last_change, 0.0);
        assert_eq!(s.vs_benchmark_pct, 0.0);
        assert!(summarize(&[]).is_none());
    }
}

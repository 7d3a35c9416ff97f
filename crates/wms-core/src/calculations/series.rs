use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::domain::{DailySample, DateRange};

/// Dense day-by-day series over `[start, end]` from sparse samples.
///
/// Days without a sample carry the previous day's value forward; before the
/// first known value the series is 0. Samples dated before `start` seed the
/// carried value. When two samples share a date, the later one in `samples`
/// wins. `start > end` yields an empty series.
pub fn build_daily_series(start: NaiveDate, end: NaiveDate, samples: &[DailySample]) -> Vec<DailySample> {
    if start > end {
        return Vec::new();
    }

    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for sample in samples.iter().filter(|s| s.date <= end) {
        by_date.insert(sample.date, sample.utilization_percent);
    }

    let mut carried = by_date
        .range(..start)
        .next_back()
        .map(|(_, value)| *value)
        .unwrap_or(0.0);

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| {
            if let Some(value) = by_date.get(&day) {
                carried = *value;
            }
            DailySample {
                date: day,
                utilization_percent: carried,
            }
        })
        .collect()
}

pub fn build_series_for_range(range: DateRange, samples: &[DailySample]) -> Vec<DailySample> {
    build_daily_series(range.start, range.end, samples)
}

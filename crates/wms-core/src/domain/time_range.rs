//! History time ranges

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive calendar-day range. `start > end` is allowed and means "empty".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn days(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() + 1
        }
    }
}

/// Dashboard time filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "range", rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Week,
    Month,
    Year,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl TimeRange {
    /// Resolve against `today`. Rolling ranges end today; custom ranges are
    /// reordered so the earlier date is the start.
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match *self {
            Self::Day => DateRange::new(today, today),
            Self::Week => DateRange::new(today - Days::new(6), today),
            Self::Month => DateRange::new(rolling_start(today, Months::new(1)), today),
            Self::Year => DateRange::new(rolling_start(today, Months::new(12)), today),
            Self::Custom { start, end } if start <= end => DateRange::new(start, end),
            Self::Custom { start, end } => DateRange::new(end, start),
        }
    }
}

fn rolling_start(today: NaiveDate, back: Months) -> NaiveDate {
    today
        .checked_sub_months(back)
        .and_then(|d| d.checked_add_days(Days::new(1)))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rolling_ranges() {
        let today = date(2024, 3, 15);
        assert_eq!(TimeRange::Day.resolve(today), DateRange::new(today, today));
        assert_eq!(TimeRange::Week.resolve(today).start, date(2024, 3, 9));
        assert_eq!(TimeRange::Week.resolve(today).days(), 7);
        assert_eq!(TimeRange::Month.resolve(today).start, date(2024, 2, 16));
        assert_eq!(TimeRange::Year.resolve(today).start, date(2023, 3, 16));
    }

    #[test]
    fn test_month_end_clamps() {
        // 2024-03-31 minus one month clamps to 2024-02-29
        let range = TimeRange::Month.resolve(date(2024, 3, 31));
        assert_eq!(range.start, date(2024, 3, 1));
    }

    #[test]
    fn test_custom_range_is_reordered() {
        let range = TimeRange::Custom {
            start: date(2024, 1, 10),
            end: date(2024, 1, 1),
        }
        .resolve(date(2024, 6, 1));
        assert_eq!(range, DateRange::new(date(2024, 1, 1), date(2024, 1, 10)));
    }

    #[test]
    fn test_empty_range() {
        let range = DateRange::new(date(2024, 1, 2), date(2024, 1, 1));
        assert!(range.is_empty());
        assert_eq!(range.days(), 0);
    }
}

//! Nominal sampling intervals for time series.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Nominal spacing between consecutive observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    /// Daily observations
    Daily,
    /// Weekly observations
    Weekly,
    /// Monthly observations
    Monthly,
}

impl Interval {
    /// Inclusive range of day gaps accepted as one step of this interval.
    pub fn spacing_bounds(&self) -> (i64, i64) {
        match self {
            Interval::Daily => (1, 1),
            Interval::Weekly => (7, 7),
            Interval::Monthly => (27, 32),
        }
    }

    /// Whether a gap of `days` between two observations is one step.
    pub fn accepts_gap(&self, days: i64) -> bool {
        let (min, max) = self.spacing_bounds();
        (min..=max).contains(&days)
    }

    /// Timestamp `steps` intervals after `from`.
    ///
    /// Monthly steps keep month ends anchored to the end of the month
    /// (Jan 31 → Feb 29 → Mar 31); any other day of month is kept and
    /// clamped to the length of the target month. Returns `None` when the
    /// result is out of the representable range.
    pub fn advance(&self, from: NaiveDateTime, steps: u32) -> Option<NaiveDateTime> {
        match self {
            Interval::Daily => from.checked_add_signed(Duration::days(steps as i64)),
            Interval::Weekly => from.checked_add_signed(Duration::weeks(steps as i64)),
            Interval::Monthly => {
                let date = from.date();
                let month_end = date.day() == days_in_month(date.year(), date.month());

                let months = date.year() as i64 * 12 + date.month0() as i64 + steps as i64;
                let year = i32::try_from(months.div_euclid(12)).ok()?;
                let month = months.rem_euclid(12) as u32 + 1;

                let last = days_in_month(year, month);
                let day = if month_end { last } else { date.day().min(last) };
                NaiveDate::from_ymd_opt(year, month, day).map(|d| d.and_time(from.time()))
            }
        }
    }
}

/// Number of days in `month` of `year`.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Interval::Daily => "Daily",
            Interval::Weekly => "Weekly",
            Interval::Monthly => "Monthly",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_interval_display() {
        assert_eq!(format!("{}", Interval::Monthly), "Monthly");
        assert_eq!(format!("{}", Interval::Daily), "Daily");
    }

    #[test]
    fn test_monthly_gap_bounds() {
        assert!(Interval::Monthly.accepts_gap(28));
        assert!(Interval::Monthly.accepts_gap(31));
        assert!(!Interval::Monthly.accepts_gap(7));
        assert!(!Interval::Monthly.accepts_gap(61));
        assert!(Interval::Weekly.accepts_gap(7));
        assert!(!Interval::Daily.accepts_gap(2));
    }

    #[test]
    fn test_advance_monthly_same_day() {
        assert_eq!(Interval::Monthly.advance(at(2024, 1, 15), 1), Some(at(2024, 2, 15)));
        assert_eq!(Interval::Monthly.advance(at(2024, 11, 1), 3), Some(at(2025, 2, 1)));
    }

    #[test]
    fn test_advance_monthly_month_end_anchored() {
        assert_eq!(Interval::Monthly.advance(at(2024, 1, 31), 1), Some(at(2024, 2, 29)));
        assert_eq!(Interval::Monthly.advance(at(2024, 2, 29), 1), Some(at(2024, 3, 31)));
        assert_eq!(Interval::Monthly.advance(at(2023, 4, 30), 2), Some(at(2023, 6, 30)));
    }

    #[test]
    fn test_advance_monthly_clamps_mid_month_day() {
        // The 30th is not a month end in January
        assert_eq!(Interval::Monthly.advance(at(2023, 1, 30), 1), Some(at(2023, 2, 28)));
    }

    #[test]
    fn test_advance_keeps_time_of_day() {
        let from = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let next = Interval::Monthly.advance(from, 1).unwrap();
        assert_eq!(next.time(), from.time());
    }

    #[test]
    fn test_advance_daily_and_weekly() {
        assert_eq!(Interval::Daily.advance(at(2024, 2, 28), 2), Some(at(2024, 3, 1)));
        assert_eq!(Interval::Weekly.advance(at(2024, 1, 1), 2), Some(at(2024, 1, 15)));
    }

    #[test]
    fn test_interval_serialization() {
        let json = serde_json::to_string(&Interval::Monthly).unwrap();
        assert_eq!(json, "\"Monthly\"");
        let parsed: Interval = serde_json::from_str("\"Weekly\"").unwrap();
        assert_eq!(parsed, Interval::Weekly);
    }
}

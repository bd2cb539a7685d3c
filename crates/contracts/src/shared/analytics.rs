//! Aggregation math shared by the server-side services and the browser.
//!
//! Everything here is pure: sums, percentages, period arithmetic and the
//! "all or one" dimension filter used by every dashboard.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Rounds to 2 decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of `part` in `total`, in percent with 2 decimals. Zero when `total <= 0`.
pub fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        round2(part / total * 100.0)
    } else {
        0.0
    }
}

/// Unpaid and not yet overdue portion of a contract sum. Never negative.
pub fn remaining(total: f64, paid: f64, overdue: f64) -> f64 {
    (total - paid - overdue).max(0.0)
}

/// Paid / overdue / remaining split of a contract sum, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentShares {
    pub paid: f64,
    pub overdue: f64,
    pub remaining: f64,
}

impl PaymentShares {
    pub fn is_empty(&self) -> bool {
        self.paid == 0.0 && self.overdue == 0.0 && self.remaining == 0.0
    }

    /// Distance of the three shares from 100%. Zero for an empty split.
    pub fn drift(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        round2((self.paid + self.overdue + self.remaining - 100.0).abs())
    }
}

/// Splits a contract sum into paid / overdue / remaining percentages.
///
/// Shares are taken against `paid + overdue + remaining`, so an overpaid
/// aggregate (paid + overdue above total) still yields a 100% split.
/// Rounding leftovers are handed out in hundredths by the largest-remainder
/// method, which makes the result sum to exactly 100.00.
pub fn payment_shares(total: f64, paid: f64, overdue: f64) -> PaymentShares {
    let parts = [
        paid.max(0.0),
        overdue.max(0.0),
        remaining(total, paid.max(0.0), overdue.max(0.0)),
    ];
    let sum: f64 = parts.iter().sum();
    if sum <= 0.0 {
        return PaymentShares::default();
    }

    let raw: Vec<f64> = parts.iter().map(|p| p / sum * 10_000.0).collect();
    let mut hundredths: Vec<i64> = raw.iter().map(|r| r.floor() as i64).collect();
    let mut deficit = 10_000 - hundredths.iter().sum::<i64>();

    let mut order: Vec<usize> = (0..parts.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = raw[a] - raw[a].floor();
        let rb = raw[b] - raw[b].floor();
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
    });
    for idx in order.into_iter().cycle() {
        if deficit <= 0 {
            break;
        }
        hundredths[idx] += 1;
        deficit -= 1;
    }

    PaymentShares {
        paid: hundredths[0] as f64 / 100.0,
        overdue: hundredths[1] as f64 / 100.0,
        remaining: hundredths[2] as f64 / 100.0,
    }
}

/// `(start_year, start_month)` does not come after `(end_year, end_month)`.
pub fn is_period_valid(start_year: i32, start_month: u32, end_year: i32, end_month: u32) -> bool {
    start_year < end_year || (start_year == end_year && start_month <= end_month)
}

/// Calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// Years accepted from requests; every date generator works inside this window.
    pub const MIN_YEAR: i32 = 1900;
    pub const MAX_YEAR: i32 = 9999;

    pub fn check_year(year: i32) -> Result<i32, PeriodError> {
        if (Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            Ok(year)
        } else {
            Err(PeriodError::InvalidYear(year))
        }
    }

    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        Self::check_year(year)?;
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Parses `"YYYY-MM"`.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split('-');
        let year = parts.next()?.parse::<i32>().ok()?;
        let month = parts.next()?.parse::<u32>().ok()?;
        Self::new(year, month).ok()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("year {0} is outside {min}..={max}", min = Period::MIN_YEAR, max = Period::MAX_YEAR)]
    InvalidYear(i32),
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u32),
    #[error("period start {start} is after period end {end}")]
    Inverted { start: Period, end: Period },
}

/// Inclusive range of calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRange {
    pub start: Period,
    pub end: Period,
}

impl PeriodRange {
    pub fn new(start: Period, end: Period) -> Result<Self, PeriodError> {
        if !is_period_valid(start.year, start.month, end.year, end.month) {
            return Err(PeriodError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn from_parts(
        start_year: i32,
        start_month: u32,
        end_year: i32,
        end_month: u32,
    ) -> Result<Self, PeriodError> {
        Self::new(
            Period::new(start_year, start_month)?,
            Period::new(end_year, end_month)?,
        )
    }

    pub fn contains(&self, period: Period) -> bool {
        self.start <= period && period <= self.end
    }

    /// Every month of the range, in order.
    pub fn months(&self) -> Vec<Period> {
        let mut out = Vec::new();
        let mut cur = self.start;
        while cur <= self.end {
            out.push(cur);
            cur = cur.next();
        }
        out
    }
}

/// A dimension filter value: everything, or one id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub const ALL: &'static str = "all";

    /// `None`, empty and `"all"` select everything.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Selection::All,
            Some(v) if v.eq_ignore_ascii_case(Self::ALL) => Selection::All,
            Some(v) => Selection::Only(v.to_string()),
        }
    }

    pub fn matches(&self, id: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == id,
        }
    }

    pub fn as_query_value(&self) -> &str {
        match self {
            Selection::All => Self::ALL,
            Selection::Only(id) => id,
        }
    }
}

/// Filters `records` with `predicate`, then sums `field` over what is left.
pub fn filter_then_sum<T>(
    records: &[T],
    predicate: impl Fn(&T) -> bool,
    field: impl Fn(&T) -> f64,
) -> f64 {
    records.iter().filter(|r| predicate(r)).map(field).sum()
}

/// Number of days in the month; 0 when `month` or `year` has no calendar date.
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1.0, 3.0), 33.33);
        assert_eq!(percentage(2.0, 3.0), 66.67);
        assert_eq!(percentage(50.0, 200.0), 25.0);
        assert_eq!(percentage(200.0, 200.0), 100.0);
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(10.0, 0.0), 0.0);
        assert_eq!(percentage(0.0, 0.0), 0.0);
        assert_eq!(percentage(5.0, -1.0), 0.0);
    }

    #[test]
    fn test_percentage_stays_in_bounds() {
        let total = 987_654.321;
        for step in 0..=100 {
            let part = total * step as f64 / 100.0;
            let p = percentage(part, total);
            assert!((0.0..=100.0).contains(&p), "{p} out of bounds");
            assert_eq!(p, round2(p));
        }
    }

    #[test]
    fn test_remaining_never_negative() {
        assert_eq!(remaining(100.0, 30.0, 20.0), 50.0);
        assert_eq!(remaining(100.0, 90.0, 20.0), 0.0);
        assert_eq!(remaining(0.0, 5.0, 0.0), 0.0);
    }

    #[test]
    fn test_payment_shares_sum_to_hundred() {
        let shares = payment_shares(3.0, 1.0, 1.0);
        assert_eq!(shares.paid, 33.34);
        assert_eq!(round2(shares.paid + shares.overdue + shares.remaining), 100.0);
        assert_eq!(shares.drift(), 0.0);

        let shares = payment_shares(7.0, 1.0, 3.0);
        let sum = round2(shares.paid + shares.overdue + shares.remaining);
        assert_eq!(sum, 100.0);
    }

    #[test]
    fn test_payment_shares_overpaid() {
        let shares = payment_shares(100.0, 80.0, 40.0);
        assert_eq!(shares.remaining, 0.0);
        assert_eq!(shares.paid, 66.67);
        assert_eq!(shares.overdue, 33.33);
    }

    #[test]
    fn test_payment_shares_empty() {
        let shares = payment_shares(0.0, 0.0, 0.0);
        assert!(shares.is_empty());
        assert_eq!(shares.drift(), 0.0);
    }

    #[test]
    fn test_is_period_valid() {
        assert!(is_period_valid(2024, 1, 2024, 12));
        assert!(!is_period_valid(2024, 6, 2024, 3));
        assert!(is_period_valid(2023, 12, 2024, 1));
        assert!(is_period_valid(2024, 5, 2024, 5));
    }

    #[test]
    fn test_period_range() {
        let range = PeriodRange::from_parts(2023, 11, 2024, 2).unwrap();
        let months: Vec<String> = range.months().iter().map(|p| p.to_string()).collect();
        assert_eq!(months, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
        assert!(range.contains(Period { year: 2024, month: 1 }));
        assert!(!range.contains(Period { year: 2024, month: 3 }));

        assert!(matches!(
            PeriodRange::from_parts(2024, 6, 2024, 3),
            Err(PeriodError::Inverted { .. })
        ));
        assert_eq!(
            PeriodRange::from_parts(2024, 13, 2024, 3),
            Err(PeriodError::InvalidMonth(13))
        );
    }

    #[test]
    fn test_period_parse() {
        assert_eq!(Period::parse("2025-03"), Some(Period { year: 2025, month: 3 }));
        assert_eq!(Period::parse("2025-00"), None);
        assert_eq!(Period::parse("garbage"), None);
    }

    #[test]
    fn test_selection() {
        assert_eq!(Selection::parse(None), Selection::All);
        assert_eq!(Selection::parse(Some("all")), Selection::All);
        assert_eq!(Selection::parse(Some(" ALL ")), Selection::All);
        assert_eq!(Selection::parse(Some("")), Selection::All);
        assert_eq!(
            Selection::parse(Some("tashkent")),
            Selection::Only("tashkent".into())
        );
        assert!(Selection::All.matches("anything"));
        assert!(!Selection::Only("a".into()).matches("b"));
    }

    #[test]
    fn test_filter_then_sum() {
        let rows = [("a", 1.0), ("b", 2.0), ("a", 3.5)];
        let only_a = Selection::Only("a".into());
        assert_eq!(filter_then_sum(&rows, |r| only_a.matches(r.0), |r| r.1), 4.5);
        assert_eq!(filter_then_sum(&rows, |r| Selection::All.matches(r.0), |r| r.1), 6.5);
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2024, 2), 29);
        assert_eq!(last_day_of_month(2023, 2), 28);
        assert_eq!(last_day_of_month(1900, 2), 28);
        assert_eq!(last_day_of_month(2000, 2), 29);
        assert_eq!(last_day_of_month(2024, 4), 30);
        assert_eq!(last_day_of_month(2024, 12), 31);
    }

    #[test]
    fn test_last_day_of_invalid_month() {
        assert_eq!(last_day_of_month(2024, 0), 0);
        assert_eq!(last_day_of_month(2024, 13), 0);
        assert_eq!(last_day_of_month(300_000, 5), 0);
    }

    #[test]
    fn test_period_year_bounds() {
        assert_eq!(Period::new(300_000, 5), Err(PeriodError::InvalidYear(300_000)));
        assert_eq!(Period::new(-262_143, 1), Err(PeriodError::InvalidYear(-262_143)));
        assert!(Period::new(Period::MIN_YEAR, 1).is_ok());
        assert!(Period::new(Period::MAX_YEAR, 12).is_ok());
        assert_eq!(
            PeriodRange::from_parts(2024, 1, 10_000, 1),
            Err(PeriodError::InvalidYear(10_000))
        );
        assert_eq!(Period::parse("0099-01"), None);
    }
}

//! Mock production plan/actual and warehouse stock.

use chrono::{Datelike, NaiveDate, Weekday};
use contracts::dashboards::d403_production::{
    DailyProductionRecord, MonthlyProductionRecord, WarehouseStock,
};
use contracts::shared::analytics::{last_day_of_month, Period};
use rand::Rng;

use crate::shared::mock::seeded_rng;

const DAILY_BASE_PLAN: u32 = 420;
const MONTHLY_BASE_PLAN: u32 = 10_500;

const MODELS: [&str; 8] = [
    "Cobalt", "Nexia 3", "Spark", "Damas", "Labo", "Tracker", "Onix", "Malibu",
];

fn round_to_ten(value: f64) -> u32 {
    ((value / 10.0).round() * 10.0).max(0.0) as u32
}

/// Plan and output of every day of `period` as seen on `today`.
/// Sundays have no plan; days after `today` have no output yet.
pub fn generate_daily(seed: u64, period: Period, today: NaiveDate) -> Vec<DailyProductionRecord> {
    let mut rng = seeded_rng(seed, &[period.year as u64, period.month as u64, 403]);

    (1..=last_day_of_month(period.year, period.month))
        .filter_map(|day| NaiveDate::from_ymd_opt(period.year, period.month, day))
        .map(|date| {
            let planned = if date.weekday() == Weekday::Sun {
                0
            } else {
                round_to_ten(DAILY_BASE_PLAN as f64 * rng.gen_range(0.9..1.1))
            };
            let performance: f64 = rng.gen_range(0.82..1.08);
            let is_future = date > today;
            let actual = if is_future {
                0
            } else {
                (planned as f64 * performance).round() as u32
            };

            DailyProductionRecord {
                day: date.day(),
                planned,
                actual,
                is_future,
                is_today: date == today,
            }
        })
        .collect()
}

/// Share of the month of `today` that has passed, `today` included.
pub fn month_elapsed(today: NaiveDate) -> f64 {
    today.day() as f64 / last_day_of_month(today.year(), today.month()).max(1) as f64
}

/// Plan and output of every month of `year` as seen on `today`.
/// The current month's output is pro-rated by the elapsed days.
pub fn generate_monthly(seed: u64, year: i32, today: NaiveDate) -> Vec<MonthlyProductionRecord> {
    let mut rng = seeded_rng(seed, &[year as u64, 4031]);
    let current = Period {
        year: today.year(),
        month: today.month(),
    };

    (1..=12u32)
        .map(|month| {
            let period = Period { year, month };
            let planned = round_to_ten(MONTHLY_BASE_PLAN as f64 * rng.gen_range(0.88..1.12));
            let performance: f64 = rng.gen_range(0.85..1.06);

            let is_future = period > current;
            let is_current = period == current;
            let actual = if is_future {
                0
            } else if is_current {
                (planned as f64 * performance * month_elapsed(today)).round() as u32
            } else {
                (planned as f64 * performance).round() as u32
            };

            MonthlyProductionRecord {
                month,
                planned,
                actual,
                is_future,
                is_current,
            }
        })
        .collect()
}

pub fn generate_warehouse(seed: u64) -> Vec<WarehouseStock> {
    let mut rng = seeded_rng(seed, &[4032]);
    MODELS
        .iter()
        .map(|model| {
            let in_stock = rng.gen_range(120..2_400);
            WarehouseStock {
                model_name: model.to_string(),
                in_stock,
                reserved: rng.gen_range(0..=in_stock / 2),
                in_transit: rng.gen_range(0..600),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_flags() {
        let today = date(2024, 9, 12);
        let records = generate_daily(1, Period { year: 2024, month: 9 }, today);
        assert_eq!(records.len(), 30);
        assert!(records.iter().filter(|r| r.is_today).all(|r| r.day == 12));
        assert_eq!(records.iter().filter(|r| r.is_today).count(), 1);
        assert!(records.iter().filter(|r| r.day > 12).all(|r| r.is_future && r.actual == 0));
        assert!(records.iter().filter(|r| r.day <= 12).all(|r| !r.is_future));
    }

    #[test]
    fn test_sundays_have_no_plan() {
        // 2024-09-01 is a Sunday
        let records = generate_daily(1, Period { year: 2024, month: 9 }, date(2024, 9, 30));
        assert_eq!(records[0].planned, 0);
        assert_eq!(records[0].actual, 0);
        assert!(records[1].planned > 0);
    }

    #[test]
    fn test_monthly_flags() {
        let records = generate_monthly(1, 2024, date(2024, 4, 15));
        assert_eq!(records.len(), 12);
        assert!(records[3].is_current);
        assert!(records[4..].iter().all(|r| r.is_future && r.actual == 0));
        assert!(records[..3].iter().all(|r| !r.is_future && r.actual > 0));
    }

    #[test]
    fn test_past_year_fully_closed() {
        let records = generate_monthly(1, 2023, date(2024, 4, 15));
        assert!(records.iter().all(|r| !r.is_future && !r.is_current));
    }

    #[test]
    fn test_warehouse_reserved_within_stock() {
        let stock = generate_warehouse(3);
        assert_eq!(stock.len(), MODELS.len());
        assert!(stock.iter().all(|s| s.reserved <= s.in_stock));
    }
}

use anyhow::Result;
use chrono::{Local, NaiveDate};
use contracts::dashboards::d403_production::{
    DailyProductionRecord, DailyProductionResponse, MonthlyProductionRecord,
    MonthlyProductionResponse, ProductionSummary, WarehouseResponse, WarehouseRow, WarehouseStock,
};
use contracts::shared::analytics::{percentage, Period};

use super::generator;
use crate::shared::config::get_config;
use crate::shared::mock::simulate_latency;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub async fn get_daily(period: Period) -> Result<DailyProductionResponse> {
    simulate_latency().await;

    let records = generator::generate_daily(get_config().mock.seed, period, today());
    Ok(DailyProductionResponse {
        period: period.to_string(),
        summary: summarize_daily(&records),
        records,
    })
}

pub async fn get_monthly(year: i32) -> Result<MonthlyProductionResponse> {
    simulate_latency().await;

    let today = today();
    let records = generator::generate_monthly(get_config().mock.seed, year, today);
    Ok(MonthlyProductionResponse {
        year,
        summary: summarize_monthly(&records, today),
        records,
    })
}

pub async fn get_warehouse() -> Result<WarehouseResponse> {
    simulate_latency().await;

    Ok(warehouse_report(generator::generate_warehouse(
        get_config().mock.seed,
    )))
}

pub fn summarize_daily(records: &[DailyProductionRecord]) -> ProductionSummary {
    summarize(
        records
            .iter()
            .filter(|r| !r.is_future)
            .map(|r| (r.day, r.planned, r.actual)),
    )
}

/// The current month only counts the part of its plan due by `today`.
pub fn summarize_monthly(records: &[MonthlyProductionRecord], today: NaiveDate) -> ProductionSummary {
    let elapsed = generator::month_elapsed(today);
    summarize(records.iter().filter(|r| !r.is_future).map(|r| {
        let planned = if r.is_current {
            (r.planned as f64 * elapsed).round() as u32
        } else {
            r.planned
        };
        (r.month, planned, r.actual)
    }))
}

/// `points` are (period index, planned, actual) of elapsed periods
fn summarize(points: impl Iterator<Item = (u32, u32, u32)>) -> ProductionSummary {
    let mut summary = ProductionSummary::default();
    let mut best: Option<(u32, u32)> = None;

    for (idx, planned, actual) in points {
        summary.planned_to_date += u64::from(planned);
        summary.actual_to_date += u64::from(actual);
        if actual < planned {
            summary.periods_below_plan += 1;
        }
        if best.map_or(true, |(_, top)| actual > top) {
            best = Some((idx, actual));
        }
    }

    summary.completion_percent = percentage(
        summary.actual_to_date as f64,
        summary.planned_to_date as f64,
    );
    summary.deviation = summary.actual_to_date as i64 - summary.planned_to_date as i64;
    summary.best_period = best.map(|(idx, _)| idx);
    summary
}

/// Stock rows, largest first, with each model's share of the units in stock
pub fn warehouse_report(stock: Vec<WarehouseStock>) -> WarehouseResponse {
    let total_in_stock: u64 = stock.iter().map(|s| u64::from(s.in_stock)).sum();
    let total_reserved: u64 = stock.iter().map(|s| u64::from(s.reserved)).sum();
    let total_in_transit: u64 = stock.iter().map(|s| u64::from(s.in_transit)).sum();

    let mut rows: Vec<WarehouseRow> = stock
        .into_iter()
        .map(|s| WarehouseRow {
            share_percent: percentage(s.in_stock as f64, total_in_stock as f64),
            stock: s,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.stock
            .in_stock
            .cmp(&a.stock.in_stock)
            .then_with(|| a.stock.model_name.cmp(&b.stock.model_name))
    });

    WarehouseResponse {
        rows,
        total_in_stock,
        total_reserved,
        total_in_transit,
        reserved_percent: percentage(total_reserved as f64, total_in_stock as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(day: u32, planned: u32, actual: u32, is_future: bool) -> DailyProductionRecord {
        DailyProductionRecord {
            day,
            planned,
            actual,
            is_future,
            is_today: false,
        }
    }

    #[test]
    fn test_summary_skips_future() {
        let records = vec![
            day(1, 400, 380, false),
            day(2, 400, 420, false),
            day(3, 400, 0, true),
        ];
        let summary = summarize_daily(&records);
        assert_eq!(summary.planned_to_date, 800);
        assert_eq!(summary.actual_to_date, 800);
        assert_eq!(summary.completion_percent, 100.0);
        assert_eq!(summary.deviation, 0);
        assert_eq!(summary.best_period, Some(2));
        assert_eq!(summary.periods_below_plan, 1);
    }

    #[test]
    fn test_summary_of_future_only() {
        let summary = summarize_daily(&[day(1, 400, 0, true)]);
        assert_eq!(summary, ProductionSummary::default());
    }

    #[test]
    fn test_monthly_summary_behind_plan() {
        let records = vec![
            MonthlyProductionRecord {
                month: 1,
                planned: 10_000,
                actual: 9_000,
                is_future: false,
                is_current: false,
            },
            MonthlyProductionRecord {
                month: 2,
                planned: 10_000,
                actual: 0,
                is_future: true,
                is_current: false,
            },
        ];
        let summary = summarize_monthly(&records, date(2024, 2, 10));
        assert_eq!(summary.completion_percent, 90.0);
        assert_eq!(summary.deviation, -1_000);
        assert_eq!(summary.best_period, Some(1));
    }

    #[test]
    fn test_current_month_plan_is_pro_rated() {
        let records = vec![
            MonthlyProductionRecord {
                month: 3,
                planned: 10_000,
                actual: 9_500,
                is_future: false,
                is_current: false,
            },
            MonthlyProductionRecord {
                month: 4,
                planned: 9_000,
                actual: 285,
                is_future: false,
                is_current: true,
            },
        ];
        // April 1st: 1 of 30 days is due
        let summary = summarize_monthly(&records, date(2024, 4, 1));
        assert_eq!(summary.planned_to_date, 10_300);
        assert_eq!(summary.actual_to_date, 9_785);
        assert_eq!(summary.periods_below_plan, 2);
        assert_eq!(summary.completion_percent, 95.0);
    }

    #[test]
    fn test_first_day_of_month_keeps_completion_steady() {
        let today = date(2024, 4, 1);
        let records = generator::generate_monthly(7, 2024, today);
        let closed: Vec<MonthlyProductionRecord> =
            records.iter().filter(|r| r.month < 4).cloned().collect();

        let with_current = summarize_monthly(&records, today);
        let closed_only = summarize_monthly(&closed, today);
        assert!(
            (with_current.completion_percent - closed_only.completion_percent).abs() < 2.0,
            "{} vs {}",
            with_current.completion_percent,
            closed_only.completion_percent
        );
    }

    #[test]
    fn test_warehouse_report() {
        let stock = vec![
            WarehouseStock {
                model_name: "Spark".into(),
                in_stock: 100,
                reserved: 10,
                in_transit: 5,
            },
            WarehouseStock {
                model_name: "Cobalt".into(),
                in_stock: 300,
                reserved: 90,
                in_transit: 0,
            },
        ];
        let report = warehouse_report(stock);
        assert_eq!(report.rows[0].stock.model_name, "Cobalt");
        assert_eq!(report.rows[0].share_percent, 75.0);
        assert_eq!(report.rows[1].share_percent, 25.0);
        assert_eq!(report.total_in_stock, 400);
        assert_eq!(report.total_in_transit, 5);
        assert_eq!(report.reserved_percent, 25.0);
    }

    #[test]
    fn test_empty_warehouse() {
        let report = warehouse_report(Vec::new());
        assert!(report.rows.is_empty());
        assert_eq!(report.reserved_percent, 0.0);
    }
}

use anyhow::Result;
use chrono::{Local, NaiveDate};
use contracts::dashboards::d401_financial_analytics::{
    CategoryShares, CategoryTotals, FinancialAnalyticsResponse, MonthlyFinancialRecord,
    YearSummary,
};
use contracts::shared::analytics::{percentage, round2, PeriodRange};

use super::generator::{generate_history, FinancialHistory};
use crate::shared::config::get_config;
use crate::shared::mock::simulate_latency;

fn load_history(today: NaiveDate) -> FinancialHistory {
    let mock = &get_config().mock;
    generate_history(mock.seed, mock.first_year, today)
}

/// Get financial analytics for a validated period range
pub async fn get_financial_analytics(range: PeriodRange) -> Result<FinancialAnalyticsResponse> {
    simulate_latency().await;

    let history = load_history(Local::now().date_naive());
    Ok(analyze(&history, range))
}

/// Years that have at least one record
pub async fn get_available_years() -> Result<Vec<i32>> {
    let history = load_history(Local::now().date_naive());
    Ok(history
        .iter()
        .filter(|(_, records)| !records.is_empty())
        .map(|(year, _)| *year)
        .collect())
}

pub fn analyze(history: &FinancialHistory, range: PeriodRange) -> FinancialAnalyticsResponse {
    let mut records: Vec<MonthlyFinancialRecord> = history
        .range(range.start.year..=range.end.year)
        .flat_map(|(_, records)| records.iter())
        .filter(|r| range.contains(r.period()))
        .cloned()
        .collect();
    records.sort_by_key(|r| r.period());

    let totals = sum_categories(&records);
    let shares = CategoryShares {
        retail: percentage(totals.retail, totals.total),
        wholesale: percentage(totals.wholesale, totals.total),
        promo: percentage(totals.promo, totals.total),
    };

    let best_month = records
        .iter()
        .max_by(|a, b| a.total.total_cmp(&b.total))
        .map(|r| r.period());

    let average_monthly = if records.is_empty() {
        0.0
    } else {
        round2(totals.total / records.len() as f64)
    };

    FinancialAnalyticsResponse {
        yearly: yearly_summaries(&records),
        records,
        totals,
        shares,
        best_month,
        average_monthly,
    }
}

pub fn sum_categories(records: &[MonthlyFinancialRecord]) -> CategoryTotals {
    records.iter().fold(CategoryTotals::default(), |acc, r| CategoryTotals {
        retail: acc.retail + r.retail,
        wholesale: acc.wholesale + r.wholesale,
        promo: acc.promo + r.promo,
        total: acc.total + r.total,
    })
}

/// Per-year totals of chronologically sorted records, growth vs. the previous year
pub fn yearly_summaries(records: &[MonthlyFinancialRecord]) -> Vec<YearSummary> {
    let mut out: Vec<YearSummary> = Vec::new();
    let mut prev: Option<&[MonthlyFinancialRecord]> = None;

    for chunk in records.chunk_by(|a, b| a.year == b.year) {
        out.push(YearSummary {
            year: chunk[0].year,
            months: chunk.len(),
            totals: sum_categories(chunk),
            growth_percent: prev.and_then(|prev| like_for_like_growth(prev, chunk)),
        });
        prev = Some(chunk);
    }

    out
}

/// Growth of `current` over `previous` counting only months present in both.
/// `None` unless `previous` is the year right before and the common base is positive.
fn like_for_like_growth(
    previous: &[MonthlyFinancialRecord],
    current: &[MonthlyFinancialRecord],
) -> Option<f64> {
    if previous.first()?.year + 1 != current.first()?.year {
        return None;
    }
    let common_total = |side: &[MonthlyFinancialRecord], other: &[MonthlyFinancialRecord]| -> f64 {
        side.iter()
            .filter(|r| other.iter().any(|o| o.month == r.month))
            .map(|r| r.total)
            .sum()
    };

    let base = common_total(previous, current);
    let now = common_total(current, previous);
    (base > 0.0).then(|| round2((now - base) / base * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn history() -> FinancialHistory {
        let mut history = BTreeMap::new();
        history.insert(
            2023,
            vec![
                MonthlyFinancialRecord::new(2023, 11, 60.0, 30.0, 10.0),
                MonthlyFinancialRecord::new(2023, 12, 120.0, 60.0, 20.0),
            ],
        );
        history.insert(
            2024,
            vec![
                MonthlyFinancialRecord::new(2024, 1, 90.0, 45.0, 15.0),
                MonthlyFinancialRecord::new(2024, 2, 150.0, 30.0, 20.0),
                MonthlyFinancialRecord::new(2024, 3, 100.0, 50.0, 50.0),
            ],
        );
        history
    }

    #[test]
    fn test_range_filters_records() {
        let range = PeriodRange::from_parts(2023, 12, 2024, 2).unwrap();
        let response = analyze(&history(), range);
        let months: Vec<String> = response.records.iter().map(|r| r.period().to_string()).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);
        assert_eq!(response.totals.total, 550.0);
        assert_eq!(response.totals.retail, 360.0);
    }

    #[test]
    fn test_shares_and_average() {
        let range = PeriodRange::from_parts(2023, 11, 2023, 12).unwrap();
        let response = analyze(&history(), range);
        assert_eq!(response.shares.retail, 60.0);
        assert_eq!(response.shares.wholesale, 30.0);
        assert_eq!(response.shares.promo, 10.0);
        assert_eq!(response.average_monthly, 150.0);
        assert_eq!(response.best_month.unwrap().month, 12);
    }

    #[test]
    fn test_yearly_growth() {
        let range = PeriodRange::from_parts(2023, 1, 2024, 12).unwrap();
        let response = analyze(&history(), range);
        assert_eq!(response.yearly.len(), 2);
        assert_eq!(response.yearly[0].growth_percent, None);
        assert_eq!(response.yearly[0].totals.total, 300.0);
        assert_eq!(response.yearly[1].totals.total, 550.0);
        // Nov-Dec vs Jan-Mar share no month
        assert_eq!(response.yearly[1].growth_percent, None);
    }

    #[test]
    fn test_partial_year_growth_compares_same_months() {
        let mut records: Vec<MonthlyFinancialRecord> = (1..=12)
            .map(|m| MonthlyFinancialRecord::new(2023, m, 100.0, 0.0, 0.0))
            .collect();
        records.push(MonthlyFinancialRecord::new(2024, 1, 110.0, 0.0, 0.0));
        records.push(MonthlyFinancialRecord::new(2024, 2, 130.0, 0.0, 0.0));

        let yearly = yearly_summaries(&records);
        assert_eq!(yearly[0].growth_percent, None);
        assert_eq!(yearly[1].months, 2);
        assert_eq!(yearly[1].totals.total, 240.0);
        assert_eq!(yearly[1].growth_percent, Some(20.0));
    }

    #[test]
    fn test_growth_needs_consecutive_years_and_a_base() {
        let records = vec![
            MonthlyFinancialRecord::new(2021, 5, 100.0, 0.0, 0.0),
            MonthlyFinancialRecord::new(2023, 5, 150.0, 0.0, 0.0),
            MonthlyFinancialRecord::new(2024, 5, 0.0, 0.0, 0.0),
            MonthlyFinancialRecord::new(2025, 5, 80.0, 0.0, 0.0),
        ];
        let yearly = yearly_summaries(&records);
        assert_eq!(yearly[1].growth_percent, None);
        assert_eq!(yearly[2].growth_percent, Some(-100.0));
        assert_eq!(yearly[3].growth_percent, None);
    }

    #[test]
    fn test_empty_range() {
        let range = PeriodRange::from_parts(2020, 1, 2020, 6).unwrap();
        let response = analyze(&history(), range);
        assert!(response.records.is_empty());
        assert_eq!(response.shares, CategoryShares::default());
        assert_eq!(response.average_monthly, 0.0);
        assert!(response.best_month.is_none());
    }
}

//! Mock monthly sales history.

use chrono::{Datelike, NaiveDate};
use contracts::dashboards::d401_financial_analytics::MonthlyFinancialRecord;
use rand::Rng;
use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::shared::mock::seeded_rng;

/// Monthly base amounts of the first year, UZS
const BASE_RETAIL: f64 = 42_000_000_000.0;
const BASE_WHOLESALE: f64 = 28_000_000_000.0;
const BASE_PROMO: f64 = 6_500_000_000.0;
const YEARLY_GROWTH: f64 = 0.08;

pub type FinancialHistory = BTreeMap<i32, Vec<MonthlyFinancialRecord>>;

/// One record per month from January of `first_year` up to the month of `today`.
pub fn generate_history(seed: u64, first_year: i32, today: NaiveDate) -> FinancialHistory {
    let mut history = FinancialHistory::new();

    for year in first_year..=today.year() {
        let mut rng = seeded_rng(seed, &[year as u64, 401]);
        let last_month = if year == today.year() { today.month() } else { 12 };
        let growth = (1.0 + YEARLY_GROWTH).powi(year - first_year);

        let records = (1..=last_month)
            .map(|month| {
                // peak in early summer, trough around New Year
                let season = 1.0 + 0.25 * (((month as f64) - 3.0) / 12.0 * 2.0 * PI).sin();
                let mut amount = |base: f64| {
                    let noise: f64 = rng.gen_range(0.9..1.1);
                    (base * growth * season * noise).round()
                };
                let retail = amount(BASE_RETAIL);
                let wholesale = amount(BASE_WHOLESALE);
                let promo = amount(BASE_PROMO);
                MonthlyFinancialRecord::new(year, month, retail, wholesale, promo)
            })
            .collect();

        history.insert(year, records);
    }

    history
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn test_years_and_months() {
        let history = generate_history(1, 2022, today());
        assert_eq!(history.keys().copied().collect::<Vec<_>>(), vec![2022, 2023, 2024]);
        assert_eq!(history[&2022].len(), 12);
        assert_eq!(history[&2024].len(), 5);
        assert_eq!(history[&2024].last().unwrap().month, 5);
    }

    #[test]
    fn test_total_is_sum_of_categories() {
        for record in generate_history(1, 2023, today()).values().flatten() {
            assert_eq!(record.total, record.retail + record.wholesale + record.promo);
            assert!(record.retail > 0.0 && record.wholesale > 0.0 && record.promo > 0.0);
        }
    }

    #[test]
    fn test_first_year_after_today_is_empty() {
        assert!(generate_history(1, 2030, today()).is_empty());
    }
}

use serde::{Deserialize, Serialize};

use crate::shared::analytics::Period;

/// Sales of one month split by channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFinancialRecord {
    pub year: i32,
    pub month: u32,
    pub retail: f64,
    pub wholesale: f64,
    pub promo: f64,
    /// retail + wholesale + promo
    pub total: f64,
}

impl MonthlyFinancialRecord {
    pub fn new(year: i32, month: u32, retail: f64, wholesale: f64, promo: f64) -> Self {
        Self {
            year,
            month,
            retail,
            wholesale,
            promo,
            total: retail + wholesale + promo,
        }
    }

    pub fn period(&self) -> Period {
        Period {
            year: self.year,
            month: self.month,
        }
    }
}

/// GET /api/d401/financial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialAnalyticsRequest {
    pub start_year: i32,
    pub start_month: u32,
    pub end_year: i32,
    pub end_month: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub retail: f64,
    pub wholesale: f64,
    pub promo: f64,
    pub total: f64,
}

/// Category share of the period total, percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryShares {
    pub retail: f64,
    pub wholesale: f64,
    pub promo: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: i32,
    pub months: usize,
    pub totals: CategoryTotals,
    /// Change of total vs. the same months of the previous year, percent
    pub growth_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialAnalyticsResponse {
    pub records: Vec<MonthlyFinancialRecord>,
    pub totals: CategoryTotals,
    pub shares: CategoryShares,
    pub yearly: Vec<YearSummary>,
    pub best_month: Option<Period>,
    pub average_monthly: f64,
}

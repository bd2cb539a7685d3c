use contracts::dashboards::d401_financial_analytics::FinancialAnalyticsResponse;
use contracts::shared::analytics::PeriodRange;

use crate::shared::api_utils::{get_json, query_string};

const API_BASE: &str = "/api/d401";

/// Годы, за которые есть данные продаж
pub async fn get_years() -> Result<Vec<i32>, String> {
    get_json(&format!("{}/years", API_BASE)).await
}

/// Продажи по каналам за период
pub async fn get_financial(range: PeriodRange) -> Result<FinancialAnalyticsResponse, String> {
    let params = [
        ("start_year", range.start.year.to_string()),
        ("start_month", range.start.month.to_string()),
        ("end_year", range.end.year.to_string()),
        ("end_month", range.end.month.to_string()),
    ];

    get_json(&format!("{}/financial{}", API_BASE, query_string(&params))).await
}

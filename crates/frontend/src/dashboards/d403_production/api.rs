use contracts::dashboards::d403_production::{
    DailyProductionResponse, MonthlyProductionResponse, WarehouseResponse,
};

use crate::shared::api_utils::{get_json, query_string};

const API_BASE: &str = "/api/d403";

/// План и факт выпуска по дням месяца
pub async fn get_daily(year: i32, month: u32) -> Result<DailyProductionResponse, String> {
    let params = [("year", year.to_string()), ("month", month.to_string())];
    get_json(&format!("{}/production/daily{}", API_BASE, query_string(&params))).await
}

/// План и факт выпуска по месяцам года
pub async fn get_monthly(year: i32) -> Result<MonthlyProductionResponse, String> {
    let params = [("year", year.to_string())];
    get_json(&format!("{}/production/monthly{}", API_BASE, query_string(&params))).await
}

/// Остатки готовой продукции на складе
pub async fn get_warehouse() -> Result<WarehouseResponse, String> {
    get_json(&format!("{}/warehouse", API_BASE)).await
}

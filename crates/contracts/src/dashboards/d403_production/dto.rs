use serde::{Deserialize, Serialize};

/// Plan vs. actual output of one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProductionRecord {
    pub day: u32,
    pub planned: u32,
    /// Always 0 for future days
    pub actual: u32,
    pub is_future: bool,
    pub is_today: bool,
}

/// Plan vs. actual output of one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyProductionRecord {
    pub month: u32,
    pub planned: u32,
    pub actual: u32,
    pub is_future: bool,
    pub is_current: bool,
}

/// Plan completion over the records that are not in the future
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionSummary {
    pub planned_to_date: u64,
    pub actual_to_date: u64,
    pub completion_percent: f64,
    /// actual - planned
    pub deviation: i64,
    /// Day or month index with the highest actual output
    pub best_period: Option<u32>,
    pub periods_below_plan: usize,
}

/// GET /api/d403/production/daily
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyProductionRequest {
    pub year: i32,
    pub month: u32,
}

/// GET /api/d403/production/monthly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyProductionRequest {
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyProductionResponse {
    /// "YYYY-MM"
    pub period: String,
    pub records: Vec<DailyProductionRecord>,
    pub summary: ProductionSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyProductionResponse {
    pub year: i32,
    pub records: Vec<MonthlyProductionRecord>,
    pub summary: ProductionSummary,
}

/// Finished cars of one model held at the warehouse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseStock {
    pub model_name: String,
    pub in_stock: u32,
    pub reserved: u32,
    pub in_transit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseRow {
    pub stock: WarehouseStock,
    /// Model share of all units in stock, percent
    pub share_percent: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarehouseResponse {
    pub rows: Vec<WarehouseRow>,
    pub total_in_stock: u64,
    pub total_reserved: u64,
    pub total_in_transit: u64,
    /// reserved / in_stock, percent
    pub reserved_percent: f64,
}

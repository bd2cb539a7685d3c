use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d403_production::{
    DailyProductionRequest, DailyProductionResponse, MonthlyProductionRequest,
    MonthlyProductionResponse, WarehouseResponse,
};
use contracts::shared::analytics::Period;

use crate::dashboards::d403_production::service;

/// GET /api/d403/production/daily?year=2024&month=9
pub async fn get_daily(
    Query(request): Query<DailyProductionRequest>,
) -> Result<Json<DailyProductionResponse>, StatusCode> {
    let period = Period::new(request.year, request.month).map_err(|e| {
        tracing::warn!("D403 Dashboard: Invalid period: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    tracing::info!("D403 Dashboard: Getting daily production for {}", period);

    match service::get_daily(period).await {
        Ok(response) => {
            tracing::info!(
                "D403 Dashboard: Returning {} days, completion {:.2}%",
                response.records.len(),
                response.summary.completion_percent
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("D403 Dashboard: Failed to get daily production: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/d403/production/monthly?year=2024
pub async fn get_monthly(
    Query(request): Query<MonthlyProductionRequest>,
) -> Result<Json<MonthlyProductionResponse>, StatusCode> {
    let year = Period::check_year(request.year).map_err(|e| {
        tracing::warn!("D403 Dashboard: Invalid year: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    tracing::info!("D403 Dashboard: Getting monthly production for {}", year);

    match service::get_monthly(year).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("D403 Dashboard: Failed to get monthly production: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/d403/warehouse
pub async fn get_warehouse() -> Result<Json<WarehouseResponse>, StatusCode> {
    match service::get_warehouse().await {
        Ok(response) => {
            tracing::info!(
                "D403 Dashboard: Returning stock of {} models",
                response.rows.len()
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("D403 Dashboard: Failed to get warehouse stock: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

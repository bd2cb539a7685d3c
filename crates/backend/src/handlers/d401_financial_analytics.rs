use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d401_financial_analytics::{
    FinancialAnalyticsRequest, FinancialAnalyticsResponse,
};
use contracts::shared::analytics::PeriodRange;

use crate::dashboards::d401_financial_analytics::service;

/// GET /api/d401/financial?start_year=2023&start_month=1&end_year=2024&end_month=6
pub async fn get_financial_analytics(
    Query(request): Query<FinancialAnalyticsRequest>,
) -> Result<Json<FinancialAnalyticsResponse>, StatusCode> {
    let range = PeriodRange::from_parts(
        request.start_year,
        request.start_month,
        request.end_year,
        request.end_month,
    )
    .map_err(|e| {
        tracing::warn!("D401 Dashboard: Rejecting period: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    tracing::info!(
        "D401 Dashboard: Getting financial analytics for {}..{}",
        range.start,
        range.end
    );

    match service::get_financial_analytics(range).await {
        Ok(response) => {
            tracing::info!(
                "D401 Dashboard: Returning {} months, total {:.2}",
                response.records.len(),
                response.totals.total
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("D401 Dashboard: Failed to get financial analytics: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/d401/years
pub async fn get_available_years() -> Result<Json<Vec<i32>>, StatusCode> {
    match service::get_available_years().await {
        Ok(years) => {
            tracing::info!("D401 Dashboard: Returning {} available years", years.len());
            Ok(Json(years))
        }
        Err(e) => {
            tracing::error!("D401 Dashboard: Failed to get years: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

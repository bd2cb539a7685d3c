use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d400_closing_tracker::{
    ClosingTrackerRequest, ClosingTrackerResponse, Department,
};
use contracts::shared::analytics::{Period, Selection};

use crate::dashboards::d400_closing_tracker::service::{self, TaskQuery};

/// GET /api/d400/closing_tracker?year=2024&month=12&department=tax&status=problems
pub async fn get_closing_tracker(
    Query(request): Query<ClosingTrackerRequest>,
) -> Result<Json<ClosingTrackerResponse>, StatusCode> {
    let period = Period::new(request.year, request.month).map_err(|e| {
        tracing::warn!("D400 Dashboard: Invalid period: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    tracing::info!(
        "D400 Dashboard: Getting closing tracker for {} (department: {}, status: {:?})",
        period,
        request.department.as_deref().unwrap_or(Selection::ALL),
        request.status
    );

    let query = TaskQuery {
        department: Selection::parse(request.department.as_deref()),
        status: request.status,
        sort: request.sort.unwrap_or_default(),
        ascending: request.asc.unwrap_or(true),
    };

    match service::get_closing_tracker(period, query).await {
        Ok(response) => {
            tracing::info!(
                "D400 Dashboard: Returning {} of {} tasks",
                response.tasks.len(),
                response.summary.total
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("D400 Dashboard: Failed to get closing tracker: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/d400/departments
pub async fn get_departments() -> Result<Json<Vec<Department>>, StatusCode> {
    match service::get_departments().await {
        Ok(departments) => {
            tracing::info!(
                "D400 Dashboard: Returning {} departments",
                departments.len()
            );
            Ok(Json(departments))
        }
        Err(e) => {
            tracing::error!("D400 Dashboard: Failed to get departments: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

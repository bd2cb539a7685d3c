use axum::{extract::Query, Json};
use contracts::dashboards::d402_installments::{InstallmentsRequest, InstallmentsResponse};
use contracts::shared::analytics::Selection;

use crate::dashboards::d402_installments::service;

/// GET /api/d402/installments?region=all&model=all
///
/// Upstream failures are reported in the body (`fetch_failed`), not as an HTTP error.
pub async fn get_installments(Query(request): Query<InstallmentsRequest>) -> Json<InstallmentsResponse> {
    let region = Selection::parse(request.region.as_deref());
    let model = Selection::parse(request.model.as_deref());

    tracing::info!(
        "D402 Dashboard: Getting installments (region: {}, model: {})",
        region.as_query_value(),
        model.as_query_value()
    );

    let response = match service::http_source() {
        Ok(source) => service::get_installments(source, &region, &model).await,
        Err(e) => {
            tracing::error!("D402 Dashboard: Installment client unavailable: {}", e);
            service::failed_response()
        }
    };

    Json(response)
}

use axum::{routing::get, Router};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // D400 Closing Tracker
        .route(
            "/api/d400/closing_tracker",
            get(handlers::d400_closing_tracker::get_closing_tracker),
        )
        .route(
            "/api/d400/departments",
            get(handlers::d400_closing_tracker::get_departments),
        )
        // D401 Financial Analytics
        .route(
            "/api/d401/financial",
            get(handlers::d401_financial_analytics::get_financial_analytics),
        )
        .route(
            "/api/d401/years",
            get(handlers::d401_financial_analytics::get_available_years),
        )
        // D402 Installments
        .route(
            "/api/d402/installments",
            get(handlers::d402_installments::get_installments),
        )
        // D403 Production
        .route(
            "/api/d403/production/daily",
            get(handlers::d403_production::get_daily),
        )
        .route(
            "/api/d403/production/monthly",
            get(handlers::d403_production::get_monthly),
        )
        .route(
            "/api/d403/warehouse",
            get(handlers::d403_production::get_warehouse),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn call(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = configure_routes()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn test_inverted_period_is_rejected() {
        let (status, _) =
            call("/api/d401/financial?start_year=2024&start_month=5&end_year=2024&end_month=1")
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_month_is_rejected() {
        let (status, _) = call("/api/d400/closing_tracker?year=2024&month=13").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_out_of_range_year_is_rejected() {
        let (status, _) = call("/api/d400/closing_tracker?year=-262143&month=1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = call("/api/d403/production/monthly?year=300000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) =
            call("/api/d401/financial?start_year=2024&start_month=1&end_year=10000&end_month=1")
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_departments() {
        let (status, body) = call("/api/d400/departments").await;
        assert_eq!(status, StatusCode::OK);
        let departments: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(departments.len(), 6);
    }
}

use contracts::dashboards::d402_installments::InstallmentsResponse;
use contracts::shared::analytics::Selection;

use crate::shared::api_utils::{get_json, query_string};

const API_BASE: &str = "/api/d402";

/// Сводка по рассрочке с фильтрами региона и модели
pub async fn get_installments(
    region: &Selection,
    model: &Selection,
) -> Result<InstallmentsResponse, String> {
    let params = [
        ("region", region.as_query_value().to_string()),
        ("model", model.as_query_value().to_string()),
    ];

    get_json(&format!("{}/installments{}", API_BASE, query_string(&params))).await
}

use contracts::dashboards::d400_closing_tracker::{
    ClosingTrackerResponse, Department, TaskSortField, TaskStatus,
};
use contracts::shared::analytics::Selection;

use crate::shared::api_utils::{get_json, query_string};

const API_BASE: &str = "/api/d400";

/// Получить справочник отделов
pub async fn get_departments() -> Result<Vec<Department>, String> {
    get_json(&format!("{}/departments", API_BASE)).await
}

/// Получить задачи закрытия месяца с фильтрами и сортировкой
pub async fn get_closing_tracker(
    year: i32,
    month: u32,
    department: &Selection,
    status: Option<TaskStatus>,
    sort: TaskSortField,
    ascending: bool,
) -> Result<ClosingTrackerResponse, String> {
    let mut params = vec![
        ("year", year.to_string()),
        ("month", month.to_string()),
        ("department", department.as_query_value().to_string()),
        ("sort", sort.code().to_string()),
        ("asc", ascending.to_string()),
    ];
    if let Some(status) = status {
        params.push(("status", status.code().to_string()));
    }

    get_json(&format!("{}/closing_tracker{}", API_BASE, query_string(&params))).await
}

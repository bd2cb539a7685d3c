use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closing task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Completed,
    InProgress,
    Waiting,
    Problems,
}

impl TaskStatus {
    pub fn all() -> [TaskStatus; 4] {
        [
            TaskStatus::Completed,
            TaskStatus::InProgress,
            TaskStatus::Waiting,
            TaskStatus::Problems,
        ]
    }

    /// Wire code, also the suffix of the `status.*` translation key
    pub fn code(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "completed",
            TaskStatus::InProgress => "inProgress",
            TaskStatus::Waiting => "waiting",
            TaskStatus::Problems => "problems",
        }
    }

    pub fn i18n_key(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "status.completed",
            TaskStatus::InProgress => "status.inProgress",
            TaskStatus::Waiting => "status.waiting",
            TaskStatus::Problems => "status.problems",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Priority::High => "priority.high",
            Priority::Medium => "priority.medium",
            Priority::Low => "priority.low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
}

/// One month-closing task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub name: String,
    pub department_id: String,
    pub executor: String,
    pub planned_date: NaiveDate,
    pub actual_date: Option<NaiveDate>,
    pub status: TaskStatus,
    /// 0..=100
    pub progress: u8,
    /// Actual minus planned completion time, hours. Positive means late.
    pub deviation_hours: i32,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskSortField {
    #[default]
    Id,
    Name,
    Department,
    PlannedDate,
    Progress,
    Deviation,
}

impl TaskSortField {
    pub fn code(&self) -> &'static str {
        match self {
            TaskSortField::Id => "id",
            TaskSortField::Name => "name",
            TaskSortField::Department => "department",
            TaskSortField::PlannedDate => "plannedDate",
            TaskSortField::Progress => "progress",
            TaskSortField::Deviation => "deviation",
        }
    }
}

/// GET /api/d400/closing_tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosingTrackerRequest {
    pub year: i32,
    pub month: u32,
    /// Department id or "all"
    pub department: Option<String>,
    pub status: Option<TaskStatus>,
    pub sort: Option<TaskSortField>,
    pub asc: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClosingSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub waiting: usize,
    pub problems: usize,
    /// completed / total, percent
    pub completion_rate: f64,
    pub average_progress: f64,
    pub total_deviation_hours: i64,
    /// Not completed and already behind plan
    pub delayed: usize,
}

impl ClosingSummary {
    pub fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Completed => self.completed,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Waiting => self.waiting,
            TaskStatus::Problems => self.problems,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentProgress {
    pub department_id: String,
    pub department_name: String,
    pub total: usize,
    pub completed: usize,
    pub completion_rate: f64,
    pub average_progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosingTrackerResponse {
    /// "YYYY-MM"
    pub period: String,
    pub tasks: Vec<Task>,
    pub summary: ClosingSummary,
    pub departments: Vec<DepartmentProgress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_roundtrip_through_serde() {
        for status in TaskStatus::all() {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.code()));
            assert_eq!(TaskStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(TaskStatus::from_code("unknown"), None);
    }
}

use anyhow::Result;
use contracts::dashboards::d400_closing_tracker::{
    ClosingSummary, ClosingTrackerResponse, Department, DepartmentProgress, Task, TaskSortField,
    TaskStatus,
};
use contracts::shared::analytics::{percentage, round2, Period, Selection};
use std::cmp::Ordering;

use super::generator;
use crate::shared::config::get_config;
use crate::shared::mock::simulate_latency;

/// Filter and sort options of the task table
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub department: Selection,
    pub status: Option<TaskStatus>,
    pub sort: TaskSortField,
    pub ascending: bool,
}

/// Get closing tracker data for a period
pub async fn get_closing_tracker(period: Period, query: TaskQuery) -> Result<ClosingTrackerResponse> {
    simulate_latency().await;

    let tasks = generator::generate_tasks(get_config().mock.seed, period);
    Ok(build_response(period, tasks, &generator::departments(), &query))
}

pub async fn get_departments() -> Result<Vec<Department>> {
    Ok(generator::departments())
}

/// Department filter first, summary over that subset, then the status
/// filter and sort for the table. Department progress always spans every task.
pub fn build_response(
    period: Period,
    tasks: Vec<Task>,
    departments: &[Department],
    query: &TaskQuery,
) -> ClosingTrackerResponse {
    let department_progress = department_progress(&tasks, departments);

    let in_department: Vec<Task> = tasks
        .into_iter()
        .filter(|t| query.department.matches(&t.department_id))
        .collect();
    let summary = summarize(&in_department);

    let mut visible: Vec<Task> = in_department
        .into_iter()
        .filter(|t| query.status.map_or(true, |s| t.status == s))
        .collect();
    sort_tasks(&mut visible, query.sort, query.ascending);

    ClosingTrackerResponse {
        period: period.to_string(),
        tasks: visible,
        summary,
        departments: department_progress,
    }
}

pub fn summarize(tasks: &[Task]) -> ClosingSummary {
    let mut summary = ClosingSummary {
        total: tasks.len(),
        ..Default::default()
    };

    let mut progress_sum = 0u64;
    for task in tasks {
        match task.status {
            TaskStatus::Completed => summary.completed += 1,
            TaskStatus::InProgress => summary.in_progress += 1,
            TaskStatus::Waiting => summary.waiting += 1,
            TaskStatus::Problems => summary.problems += 1,
        }
        if task.status != TaskStatus::Completed && task.deviation_hours > 0 {
            summary.delayed += 1;
        }
        progress_sum += u64::from(task.progress);
        summary.total_deviation_hours += i64::from(task.deviation_hours);
    }

    summary.completion_rate = percentage(summary.completed as f64, summary.total as f64);
    summary.average_progress = if tasks.is_empty() {
        0.0
    } else {
        round2(progress_sum as f64 / tasks.len() as f64)
    };
    summary
}

/// Completion per department, in catalog order
pub fn department_progress(tasks: &[Task], departments: &[Department]) -> Vec<DepartmentProgress> {
    departments
        .iter()
        .map(|dep| {
            let own: Vec<&Task> = tasks.iter().filter(|t| t.department_id == dep.id).collect();
            let completed = own
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count();
            let progress_sum: u64 = own.iter().map(|t| u64::from(t.progress)).sum();

            DepartmentProgress {
                department_id: dep.id.clone(),
                department_name: dep.name.clone(),
                total: own.len(),
                completed,
                completion_rate: percentage(completed as f64, own.len() as f64),
                average_progress: if own.is_empty() {
                    0.0
                } else {
                    round2(progress_sum as f64 / own.len() as f64)
                },
            }
        })
        .collect()
}

/// Stable sort; ties keep id order
pub fn sort_tasks(tasks: &mut [Task], field: TaskSortField, ascending: bool) {
    tasks.sort_by(|a, b| {
        let ord = compare_by_field(a, b, field).then_with(|| a.id.cmp(&b.id));
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}

fn compare_by_field(a: &Task, b: &Task, field: TaskSortField) -> Ordering {
    match field {
        TaskSortField::Id => a.id.cmp(&b.id),
        TaskSortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        TaskSortField::Department => a.department_id.cmp(&b.department_id),
        TaskSortField::PlannedDate => a.planned_date.cmp(&b.planned_date),
        TaskSortField::Progress => a.progress.cmp(&b.progress),
        TaskSortField::Deviation => a.deviation_hours.cmp(&b.deviation_hours),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_closing_tracker::generator::{departments, generate_tasks};

    fn period() -> Period {
        Period {
            year: 2025,
            month: 3,
        }
    }

    #[test]
    fn test_summary_over_all_tasks() {
        let tasks = generate_tasks(11, period());
        let summary = summarize(&tasks);
        assert_eq!(summary.total, 100);
        assert_eq!(summary.completed, 35);
        assert_eq!(summary.in_progress, 25);
        assert_eq!(summary.waiting, 20);
        assert_eq!(summary.problems, 20);
        assert_eq!(summary.completion_rate, 35.0);
        assert!(summary.delayed >= 20);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.completion_rate, 0.0);
        assert_eq!(summary.average_progress, 0.0);
    }

    #[test]
    fn test_all_department_bypasses_filter() {
        let tasks = generate_tasks(11, period());
        let response = build_response(period(), tasks, &departments(), &TaskQuery::default());
        assert_eq!(response.tasks.len(), 100);
        assert_eq!(response.period, "2025-03");
    }

    #[test]
    fn test_department_filter_sums_to_all() {
        let tasks = generate_tasks(11, period());
        let total: usize = departments()
            .iter()
            .map(|dep| {
                let query = TaskQuery {
                    department: Selection::Only(dep.id.clone()),
                    ..Default::default()
                };
                build_response(period(), tasks.clone(), &departments(), &query)
                    .summary
                    .total
            })
            .sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_status_filter_keeps_summary_counts() {
        let tasks = generate_tasks(11, period());
        let query = TaskQuery {
            status: Some(TaskStatus::Problems),
            ..Default::default()
        };
        let response = build_response(period(), tasks, &departments(), &query);
        assert_eq!(response.tasks.len(), 20);
        assert!(response.tasks.iter().all(|t| t.status == TaskStatus::Problems));
        assert_eq!(response.summary.total, 100);
    }

    #[test]
    fn test_department_progress_covers_catalog() {
        let tasks = generate_tasks(11, period());
        let progress = department_progress(&tasks, &departments());
        assert_eq!(progress.len(), departments().len());
        assert_eq!(progress.iter().map(|p| p.total).sum::<usize>(), 100);
        assert_eq!(progress.iter().map(|p| p.completed).sum::<usize>(), 35);
    }

    #[test]
    fn test_sort_by_deviation_descending() {
        let mut tasks = generate_tasks(11, period());
        sort_tasks(&mut tasks, TaskSortField::Deviation, false);
        assert!(tasks
            .windows(2)
            .all(|w| w[0].deviation_hours >= w[1].deviation_hours));
    }
}

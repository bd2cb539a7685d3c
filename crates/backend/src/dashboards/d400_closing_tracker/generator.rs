//! Mock month-closing tasks.

use chrono::{Datelike, Duration, NaiveDate};
use contracts::dashboards::d400_closing_tracker::{Department, Priority, Task, TaskStatus};
use contracts::shared::analytics::{last_day_of_month, Period};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::shared::mock::seeded_rng;

/// How many tasks of each status one closing period has
pub const STATUS_QUOTAS: [(TaskStatus, usize); 4] = [
    (TaskStatus::Completed, 35),
    (TaskStatus::InProgress, 25),
    (TaskStatus::Waiting, 20),
    (TaskStatus::Problems, 20),
];

const DEPARTMENTS: [(&str, &str); 6] = [
    ("accounting", "Бухгалтерия"),
    ("treasury", "Казначейство"),
    ("tax", "Налоговый учёт"),
    ("logistics", "Логистика"),
    ("sales", "Отдел продаж"),
    ("production", "Производство"),
];

const TASK_NAMES: [(&str, &[&str]); 6] = [
    (
        "accounting",
        &[
            "Закрытие периода ГК",
            "Начисление амортизации",
            "Сверка дебиторской задолженности",
            "Переоценка валютных позиций",
            "Формирование оборотно-сальдовой ведомости",
        ],
    ),
    (
        "treasury",
        &[
            "Сверка банковских выписок",
            "Закрытие кассовых книг",
            "Начисление процентов по кредитам",
        ],
    ),
    (
        "tax",
        &[
            "Расчёт НДС",
            "Резерв по налогу на прибыль",
            "Сверка с налоговым органом",
        ],
    ),
    (
        "logistics",
        &[
            "Инвентаризация транзитных запасов",
            "Закрытие заказов на поставку",
            "Распределение транспортных затрат",
        ],
    ),
    (
        "sales",
        &[
            "Сверка реализации по дилерам",
            "Начисление бонусов дилерам",
            "Закрытие заказов клиентов",
        ],
    ),
    (
        "production",
        &[
            "Расчёт себестоимости автомобилей",
            "Закрытие производственных заказов",
            "Списание отклонений по материалам",
        ],
    ),
];

const EXECUTORS: [&str; 10] = [
    "Азизов Б.",
    "Каримова Н.",
    "Юсупов Ш.",
    "Петрова Е.",
    "Рахимов Д.",
    "Ибрагимова М.",
    "Ким А.",
    "Назаров О.",
    "Султанова Г.",
    "Турсунов Ж.",
];

pub fn departments() -> Vec<Department> {
    DEPARTMENTS
        .iter()
        .map(|(id, name)| Department {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

pub fn total_quota() -> usize {
    STATUS_QUOTAS.iter().map(|(_, n)| n).sum()
}

/// Generates the closing task list of `period`.
///
/// The same `seed` and period always produce the same tasks; each status
/// bucket holds exactly its quota from `STATUS_QUOTAS`. A month without
/// calendar dates yields no tasks.
pub fn generate_tasks(seed: u64, period: Period) -> Vec<Task> {
    let mut rng = seeded_rng(seed, &[period.year as u64, period.month as u64]);
    let Some(first_day) = NaiveDate::from_ymd_opt(period.year, period.month, 1) else {
        tracing::warn!("D400 generator: {} has no calendar dates", period);
        return Vec::new();
    };
    let last_day = last_day_of_month(period.year, period.month);

    let mut statuses: Vec<TaskStatus> = STATUS_QUOTAS
        .iter()
        .flat_map(|(status, count)| std::iter::repeat(*status).take(*count))
        .collect();
    statuses.shuffle(&mut rng);

    statuses
        .into_iter()
        .enumerate()
        .map(|(idx, status)| {
            let (department_id, names) = TASK_NAMES[rng.gen_range(0..TASK_NAMES.len())];
            let name = names[rng.gen_range(0..names.len())];
            let executor = EXECUTORS[rng.gen_range(0..EXECUTORS.len())];

            let day = rng.gen_range(1..=last_day);
            let planned_date = first_day.with_day(day).unwrap_or(first_day);

            let (progress, deviation_hours) = match status {
                TaskStatus::Completed => (100, rng.gen_range(-8..=16)),
                TaskStatus::InProgress => (rng.gen_range(10..=90), rng.gen_range(-4..=12)),
                TaskStatus::Waiting => (0, 0),
                TaskStatus::Problems => (rng.gen_range(5..=60), rng.gen_range(4..=72)),
            };

            let actual_date = (status == TaskStatus::Completed)
                .then(|| {
                    planned_date
                        .checked_add_signed(Duration::days(i64::from(deviation_hours).div_euclid(24)))
                })
                .flatten();

            let priority = match (status, rng.gen_range(0..10)) {
                (TaskStatus::Problems, 0..=5) => Priority::High,
                (_, 0..=2) => Priority::High,
                (_, 3..=6) => Priority::Medium,
                _ => Priority::Low,
            };

            Task {
                id: idx as u32 + 1,
                name: name.to_string(),
                department_id: department_id.to_string(),
                executor: executor.to_string(),
                planned_date,
                actual_date,
                status,
                progress,
                deviation_hours,
                priority,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period() -> Period {
        Period {
            year: 2024,
            month: 2,
        }
    }

    #[test]
    fn test_total_is_one_hundred() {
        assert_eq!(total_quota(), 100);
        assert_eq!(generate_tasks(1, period()).len(), 100);
    }

    #[test]
    fn test_status_buckets_match_quotas() {
        let tasks = generate_tasks(42, period());
        for (status, quota) in STATUS_QUOTAS {
            let count = tasks.iter().filter(|t| t.status == status).count();
            assert_eq!(count, quota, "{:?}", status);
        }
    }

    #[test]
    fn test_generation_is_repeatable() {
        assert_eq!(generate_tasks(5, period()), generate_tasks(5, period()));
        assert_ne!(generate_tasks(5, period()), generate_tasks(6, period()));
    }

    #[test]
    fn test_task_shape_follows_status() {
        for task in generate_tasks(9, period()) {
            assert!(task.progress <= 100);
            assert_eq!(task.planned_date.format("%Y-%m").to_string(), "2024-02");
            match task.status {
                TaskStatus::Completed => {
                    assert_eq!(task.progress, 100);
                    assert!(task.actual_date.is_some());
                }
                TaskStatus::Waiting => {
                    assert_eq!(task.progress, 0);
                    assert_eq!(task.deviation_hours, 0);
                    assert!(task.actual_date.is_none());
                }
                TaskStatus::Problems => assert!(task.deviation_hours > 0),
                TaskStatus::InProgress => assert!(task.actual_date.is_none()),
            }
        }
    }

    #[test]
    fn test_out_of_calendar_year_has_no_tasks() {
        assert!(generate_tasks(1, Period { year: 300_000, month: 5 }).is_empty());
    }

    #[test]
    fn test_earliest_calendar_month_does_not_overflow() {
        let min = NaiveDate::MIN;
        let period = Period {
            year: min.year(),
            month: min.month(),
        };
        let tasks = generate_tasks(1, period);
        assert_eq!(tasks.len(), 100);
        for task in tasks {
            assert_eq!(task.planned_date.year(), min.year());
            assert_eq!(task.planned_date.month(), min.month());
            if let Some(actual) = task.actual_date {
                assert!(actual >= min);
            }
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let ids: Vec<u32> = generate_tasks(3, period()).iter().map(|t| t.id).collect();
        assert_eq!(ids, (1..=100).collect::<Vec<_>>());
    }
}

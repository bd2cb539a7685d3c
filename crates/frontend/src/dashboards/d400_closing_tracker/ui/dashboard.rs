use chrono::{Datelike, Local};
use contracts::dashboards::d400_closing_tracker::{
    ClosingTrackerResponse, Department, TaskSortField, TaskStatus,
};
use contracts::shared::analytics::Selection;
use contracts::shared::i18n::t;
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use thaw::*;

use crate::dashboards::d400_closing_tracker::api;
use crate::shared::components::card_animated::CardAnimated;
use crate::shared::components::charts::{BarChart, ChartPoint, DonutChart, DonutSlice, Unit, PALETTE};
use crate::shared::components::period_picker::MonthYearSelect;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::states::{ErrorBanner, LoadingState, NoData};
use crate::shared::components::ui::{Badge as StatusBadge, BadgeVariant};
use crate::shared::list_utils::{get_sort_indicator, toggle_sort};
use crate::shared::locale::use_locale;
use crate::shared::page_frame::PageFrame;

fn status_color(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Completed => "var(--color-success)",
        TaskStatus::InProgress => "var(--color-primary)",
        TaskStatus::Waiting => "var(--color-neutral)",
        TaskStatus::Problems => "var(--color-error)",
    }
}

/// Clickable header cell toggling server-side sort
#[component]
fn SortHeader(
    label_key: &'static str,
    field: TaskSortField,
    sort_field: RwSignal<TaskSortField>,
    sort_ascending: RwSignal<bool>,
    #[prop(default = 100.0)] min_width: f64,
) -> impl IntoView {
    let locale = use_locale();
    view! {
        <TableHeaderCell resizable=true min_width=min_width>
            <div
                class="sortable-header"
                on:click=move |_| toggle_sort(field, sort_field, sort_ascending)
            >
                {move || t(locale.get(), label_key)}
                {move || get_sort_indicator(&sort_field.get(), &field, sort_ascending.get())}
            </div>
        </TableHeaderCell>
    }
}

/// SAP month-closing tracker
#[component]
pub fn ClosingTrackerDashboard() -> impl IntoView {
    let locale = use_locale();
    let now = Local::now().date_naive();

    // Filters
    let year = RwSignal::new(now.year());
    let month = RwSignal::new(now.month());
    let department = RwSignal::new(Selection::All);
    let status = RwSignal::new(None::<TaskStatus>);
    let sort_field = RwSignal::new(TaskSortField::Id);
    let sort_ascending = RwSignal::new(true);
    let years = Signal::derive(move || ((now.year() - 2)..=now.year()).rev().collect::<Vec<_>>());

    // Data state
    let departments = RwSignal::new(Vec::<Department>::new());
    let (data, set_data) = signal(None::<ClosingTrackerResponse>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    // Load department catalog on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match api::get_departments().await {
                Ok(list) => departments.set(list),
                Err(err) => log::error!("Failed to load D400 departments: {}", err),
            }
        });
    });

    // Load data when any filter changes
    Effect::new(move |_| {
        let year = year.get();
        let month = month.get();
        let department = department.get();
        let status = status.get();
        let sort = sort_field.get();
        let ascending = sort_ascending.get();
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::get_closing_tracker(year, month, &department, status, sort, ascending).await {
                Ok(response) => set_data.set(Some(response)),
                Err(e) => {
                    log::error!("Failed to load D400 closing tracker: {}", e);
                    set_data.set(None);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    });

    let department_names = Memo::new(move |_| {
        departments
            .get()
            .into_iter()
            .map(|d| (d.id, d.name))
            .collect::<HashMap<String, String>>()
    });

    let summary = move || data.get().map(|d| d.summary);

    let status_chips = move || {
        let counts = summary();
        let active = status.get();
        let all_chip = view! {
            <button
                class=move || if status.get().is_none() { "chip chip--active" } else { "chip" }
                on:click=move |_| status.set(None)
            >
                {move || t(locale.get(), "common.all")}
                {counts.as_ref().map(|s| format!(" · {}", s.total))}
            </button>
        };
        let chips = TaskStatus::all()
            .into_iter()
            .map(|s| {
                let count = counts.as_ref().map(|c| c.count(s)).unwrap_or(0);
                let class = if active == Some(s) { "chip chip--active" } else { "chip" };
                view! {
                    <button class=class on:click=move |_| status.set(Some(s))>
                        <span class="chip__dot" style=format!("background: {};", status_color(s))></span>
                        {move || t(locale.get(), s.i18n_key())}
                        {format!(" · {}", count)}
                    </button>
                }
            })
            .collect_view();
        view! { <div class="chips">{all_chip}{chips}</div> }
    };

    let charts = move || {
        data.get().map(|d| {
            let department_points: Vec<ChartPoint> = d
                .departments
                .iter()
                .map(|p| ChartPoint {
                    label: p.department_name.clone(),
                    value: p.completion_rate,
                })
                .collect();
            let status_slices: Vec<DonutSlice> = TaskStatus::all()
                .into_iter()
                .map(|s| DonutSlice {
                    label: t(locale.get(), s.i18n_key()).to_string(),
                    value: d.summary.count(s) as f64,
                    color: status_color(s),
                })
                .collect();
            let total = d.summary.total;

            view! {
                <div class="dashboard-grid dashboard-grid--2-1">
                    <CardAnimated title=Signal::derive(move || t(locale.get(), "closing.by_department"))>
                        <BarChart points=department_points color=PALETTE[0] unit=Unit::Percent />
                    </CardAnimated>
                    <CardAnimated delay_ms=80 title=Signal::derive(move || t(locale.get(), "closing.by_status"))>
                        <DonutChart slices=status_slices center_label=total.to_string() unit=Unit::Count />
                    </CardAnimated>
                </div>
            }
        })
    };

    let table = move || {
        let Some(d) = data.get() else {
            return view! { <></> }.into_any();
        };
        if d.tasks.is_empty() {
            return view! { <NoData /> }.into_any();
        }
        let names = department_names.get();

        view! {
            <Table>
                <TableHeader>
                    <TableRow>
                        <SortHeader label_key="#" field=TaskSortField::Id sort_field=sort_field sort_ascending=sort_ascending min_width=60.0 />
                        <SortHeader label_key="closing.task" field=TaskSortField::Name sort_field=sort_field sort_ascending=sort_ascending min_width=240.0 />
                        <SortHeader label_key="closing.department" field=TaskSortField::Department sort_field=sort_field sort_ascending=sort_ascending min_width=140.0 />
                        <TableHeaderCell resizable=true min_width=140.0>
                            {move || t(locale.get(), "closing.executor")}
                        </TableHeaderCell>
                        <SortHeader label_key="closing.planned_date" field=TaskSortField::PlannedDate sort_field=sort_field sort_ascending=sort_ascending />
                        <TableHeaderCell min_width=100.0>
                            {move || t(locale.get(), "closing.actual_date")}
                        </TableHeaderCell>
                        <TableHeaderCell min_width=110.0>
                            {move || t(locale.get(), "closing.status")}
                        </TableHeaderCell>
                        <SortHeader label_key="closing.progress" field=TaskSortField::Progress sort_field=sort_field sort_ascending=sort_ascending />
                        <SortHeader label_key="closing.deviation" field=TaskSortField::Deviation sort_field=sort_field sort_ascending=sort_ascending />
                        <TableHeaderCell min_width=100.0>
                            {move || t(locale.get(), "closing.priority")}
                        </TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {d.tasks.into_iter().map(|task| {
                        let department_name = names
                            .get(&task.department_id)
                            .cloned()
                            .unwrap_or_else(|| task.department_id.clone());
                        let status = task.status;
                        let priority = task.priority;
                        let deviation_class = if task.deviation_hours > 0 {
                            "cell-number cell-number--negative"
                        } else {
                            "cell-number"
                        };
                        view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{task.id}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout truncate=true>{task.name}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{department_name}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{task.executor}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{task.planned_date.format("%d.%m.%Y").to_string()}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {task.actual_date.map(|d| d.format("%d.%m.%Y").to_string()).unwrap_or_else(|| "—".into())}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <StatusBadge variant=BadgeVariant::for_status(status)>
                                            {move || t(locale.get(), status.i18n_key())}
                                        </StatusBadge>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <div class="progress">
                                            <div class="progress__bar" style=format!("width: {}%;", task.progress)></div>
                                            <span class="progress__label">{format!("{}%", task.progress)}</span>
                                        </div>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <span class=deviation_class>{format!("{:+}", task.deviation_hours)}</span>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <StatusBadge variant=BadgeVariant::for_priority(priority)>
                                            {move || t(locale.get(), priority.i18n_key())}
                                        </StatusBadge>
                                    </TableCellLayout>
                                </TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>
        }
        .into_any()
    };

    view! {
        <PageFrame page_id="d400_closing_tracker--dashboard">
            <div class="page__header">
                <h2 class="page__title">{move || t(locale.get(), "closing.title")}</h2>
                <div class="page__filters">
                    <MonthYearSelect year=year month=month years=years />
                    <div class="filter-group">
                        <label class="filter-label">{move || t(locale.get(), "closing.department")}</label>
                        <select
                            class="filter-select"
                            on:change=move |ev| department.set(Selection::parse(Some(event_target_value(&ev).as_str())))
                        >
                            <option value=Selection::ALL selected=move || department.get() == Selection::All>
                                {move || t(locale.get(), "common.all")}
                            </option>
                            {move || departments.get().into_iter().map(|d| {
                                let id = d.id.clone();
                                view! {
                                    <option
                                        value=d.id
                                        selected=move || department.get().as_query_value() == id
                                    >
                                        {d.name}
                                    </option>
                                }
                            }).collect_view()}
                        </select>
                    </div>
                </div>
            </div>

            {move || error.get().map(|msg| view! { <ErrorBanner message=msg /> })}

            <Show when=move || loading.get() && data.get().is_none()>
                <LoadingState />
            </Show>

            <div class="stat-grid">
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "common.total"))
                    value=Signal::derive(move || summary().map(|s| s.total as f64))
                    format=ValueFormat::Integer
                />
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "closing.completion_rate"))
                    value=Signal::derive(move || summary().map(|s| s.completion_rate))
                    format=ValueFormat::Percent { decimals: 1 }
                    status=Signal::derive(move || {
                        summary()
                            .map(|s| IndicatorStatus::from_completion(s.completion_rate))
                            .unwrap_or_default()
                    })
                />
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "closing.average_progress"))
                    value=Signal::derive(move || summary().map(|s| s.average_progress))
                    format=ValueFormat::Percent { decimals: 1 }
                />
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "closing.delayed"))
                    value=Signal::derive(move || summary().map(|s| s.delayed as f64))
                    format=ValueFormat::Integer
                    status=Signal::derive(move || match summary() {
                        Some(s) if s.delayed > 0 => IndicatorStatus::Warning,
                        Some(_) => IndicatorStatus::Good,
                        None => IndicatorStatus::Neutral,
                    })
                    subtitle=Signal::derive(move || {
                        summary().map(|s| format!("{:+} h", s.total_deviation_hours))
                    })
                />
            </div>

            {status_chips}
            {charts}

            <CardAnimated delay_ms=160>
                {table}
            </CardAnimated>
        </PageFrame>
    }
}

use chrono::{Datelike, Local};
use contracts::dashboards::d403_production::{
    DailyProductionRecord, DailyProductionResponse, MonthlyProductionRecord,
    MonthlyProductionResponse, ProductionSummary, WarehouseResponse,
};
use contracts::shared::i18n::{month_name, month_short, t, Locale};
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use contracts::shared::number_format::format_number_int;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d403_production::api;
use crate::shared::components::card_animated::CardAnimated;
use crate::shared::components::charts::{
    ChartSeries, DonutChart, DonutSlice, GroupedBarChart, LineChart, Unit, PALETTE,
};
use crate::shared::components::period_picker::{MonthYearSelect, YearSelect};
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::states::{ErrorBanner, LoadingState, NoData};
use crate::shared::locale::use_locale;
use crate::shared::page_frame::PageFrame;

const PLAN_COLOR: &str = PALETTE[4];
const ACTUAL_COLOR: &str = PALETTE[0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Granularity {
    Daily,
    Monthly,
}

#[derive(Debug, Clone)]
enum ProductionData {
    Daily(DailyProductionResponse),
    Monthly(MonthlyProductionResponse),
}

impl ProductionData {
    fn summary(&self) -> &ProductionSummary {
        match self {
            ProductionData::Daily(d) => &d.summary,
            ProductionData::Monthly(m) => &m.summary,
        }
    }
}

/// Plan and actual series; future days have no actual point.
fn daily_series(locale: Locale, records: &[DailyProductionRecord]) -> Vec<ChartSeries> {
    vec![
        ChartSeries {
            name: t(locale, "production.planned").to_string(),
            color: PLAN_COLOR,
            values: records.iter().map(|r| Some(r.planned as f64)).collect(),
        },
        ChartSeries {
            name: t(locale, "production.actual").to_string(),
            color: ACTUAL_COLOR,
            values: records
                .iter()
                .map(|r| (!r.is_future).then_some(r.actual as f64))
                .collect(),
        },
    ]
}

fn monthly_series(locale: Locale, records: &[MonthlyProductionRecord]) -> Vec<ChartSeries> {
    vec![
        ChartSeries {
            name: t(locale, "production.planned").to_string(),
            color: PLAN_COLOR,
            values: records.iter().map(|r| Some(r.planned as f64)).collect(),
        },
        ChartSeries {
            name: t(locale, "production.actual").to_string(),
            color: ACTUAL_COLOR,
            values: records
                .iter()
                .map(|r| (!r.is_future).then_some(r.actual as f64))
                .collect(),
        },
    ]
}

/// Human name of the best day or month
fn best_period_label(locale: Locale, data: &ProductionData) -> Option<String> {
    let idx = data.summary().best_period?;
    Some(match data {
        ProductionData::Daily(d) => format!("{} ({})", idx, d.period),
        ProductionData::Monthly(m) => format!("{} {}", month_name(locale, idx), m.year),
    })
}

fn best_period_output(data: &ProductionData) -> Option<f64> {
    let idx = data.summary().best_period?;
    match data {
        ProductionData::Daily(d) => d.records.iter().find(|r| r.day == idx).map(|r| r.actual as f64),
        ProductionData::Monthly(m) => m
            .records
            .iter()
            .find(|r| r.month == idx)
            .map(|r| r.actual as f64),
    }
}

#[component]
fn WarehouseSection(report: WarehouseResponse) -> impl IntoView {
    let locale = use_locale();

    if report.rows.is_empty() {
        return view! { <NoData /> }.into_any();
    }

    let slices: Vec<DonutSlice> = report
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| DonutSlice {
            label: row.stock.model_name.clone(),
            value: row.stock.in_stock as f64,
            color: PALETTE[i % PALETTE.len()],
        })
        .collect();
    let center = format_number_int(report.total_in_stock as f64);
    let reserved_subtitle = format!("{:.1}%", report.reserved_percent);

    view! {
        <div class="dashboard-grid dashboard-grid--2-1">
            <CardAnimated delay_ms=160 title=Signal::derive(move || t(locale.get(), "production.warehouse"))>
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell resizable=true min_width=140.0>{move || t(locale.get(), "installments.model")}</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>{move || t(locale.get(), "production.in_stock")}</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>{move || t(locale.get(), "production.reserved")}</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>{move || t(locale.get(), "production.in_transit")}</TableHeaderCell>
                            <TableHeaderCell min_width=80.0>{move || t(locale.get(), "production.share")}</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {report.rows.into_iter().map(|row| view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{row.stock.model_name}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout><span class="cell-number">{format_number_int(row.stock.in_stock as f64)}</span></TableCellLayout></TableCell>
                                <TableCell><TableCellLayout><span class="cell-number">{format_number_int(row.stock.reserved as f64)}</span></TableCellLayout></TableCell>
                                <TableCell><TableCellLayout><span class="cell-number">{format_number_int(row.stock.in_transit as f64)}</span></TableCellLayout></TableCell>
                                <TableCell><TableCellLayout><span class="cell-number">{format!("{:.1}%", row.share_percent)}</span></TableCellLayout></TableCell>
                            </TableRow>
                        }).collect_view()}
                        <TableRow>
                            <TableCell><TableCellLayout><strong>{move || t(locale.get(), "common.total")}</strong></TableCellLayout></TableCell>
                            <TableCell><TableCellLayout><strong class="cell-number">{format_number_int(report.total_in_stock as f64)}</strong></TableCellLayout></TableCell>
                            <TableCell><TableCellLayout><strong class="cell-number" title=reserved_subtitle>{format_number_int(report.total_reserved as f64)}</strong></TableCellLayout></TableCell>
                            <TableCell><TableCellLayout><strong class="cell-number">{format_number_int(report.total_in_transit as f64)}</strong></TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>"100%"</TableCellLayout></TableCell>
                        </TableRow>
                    </TableBody>
                </Table>
            </CardAnimated>
            <CardAnimated delay_ms=200 title=Signal::derive(move || t(locale.get(), "production.in_stock"))>
                <DonutChart slices=slices center_label=center unit=Unit::Count />
            </CardAnimated>
        </div>
    }
    .into_any()
}

#[component]
pub fn ProductionDashboard() -> impl IntoView {
    let locale = use_locale();
    let now = Local::now().date_naive();

    let granularity = RwSignal::new(Granularity::Daily);
    let year = RwSignal::new(now.year());
    let month = RwSignal::new(now.month());
    let years = Signal::derive(move || ((now.year() - 2)..=now.year()).rev().collect::<Vec<_>>());

    let (data, set_data) = signal(None::<ProductionData>);
    let (warehouse, set_warehouse) = signal(None::<WarehouseResponse>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    Effect::new(move |_| {
        spawn_local(async move {
            match api::get_warehouse().await {
                Ok(report) => set_warehouse.set(Some(report)),
                Err(e) => log::error!("Failed to load D403 warehouse: {}", e),
            }
        });
    });

    Effect::new(move |_| {
        let granularity = granularity.get();
        let year = year.get();
        let month = month.get();
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let result = match granularity {
                Granularity::Daily => api::get_daily(year, month).await.map(ProductionData::Daily),
                Granularity::Monthly => api::get_monthly(year).await.map(ProductionData::Monthly),
            };
            match result {
                Ok(response) => set_data.set(Some(response)),
                Err(e) => {
                    log::error!("Failed to load D403 production: {}", e);
                    set_data.set(None);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    });

    let summary = move || data.get().map(|d| d.summary().clone());

    let chart = move || {
        let Some(d) = data.get() else {
            return view! { <></> }.into_any();
        };
        let loc = locale.get();
        let chart = match d {
            ProductionData::Daily(daily) => {
                let labels: Vec<String> = daily.records.iter().map(|r| r.day.to_string()).collect();
                let highlight = daily.records.iter().position(|r| r.is_today);
                let series = daily_series(loc, &daily.records);
                view! {
                    <LineChart labels=labels series=series unit=Unit::Count highlight=highlight />
                }
                .into_any()
            }
            ProductionData::Monthly(monthly) => {
                let labels: Vec<String> = monthly
                    .records
                    .iter()
                    .map(|r| month_short(loc, r.month))
                    .collect();
                let series = monthly_series(loc, &monthly.records);
                view! { <GroupedBarChart labels=labels series=series unit=Unit::Count /> }.into_any()
            }
        };

        view! {
            <CardAnimated title=Signal::derive(move || t(locale.get(), "production.title"))>
                {chart}
            </CardAnimated>
        }
        .into_any()
    };

    let mode_button = move |mode: Granularity, key: &'static str| {
        view! {
            <button
                class=move || if granularity.get() == mode { "chip chip--active" } else { "chip" }
                on:click=move |_| granularity.set(mode)
            >
                {move || t(locale.get(), key)}
            </button>
        }
    };

    view! {
        <PageFrame page_id="d403_production--dashboard">
            <div class="page__header">
                <h2 class="page__title">{move || t(locale.get(), "production.title")}</h2>
                <div class="page__filters">
                    <div class="chips">
                        {mode_button(Granularity::Daily, "production.daily")}
                        {mode_button(Granularity::Monthly, "production.monthly")}
                    </div>
                    {move || match granularity.get() {
                        Granularity::Daily => view! {
                            <MonthYearSelect year=year month=month years=years />
                        }
                        .into_any(),
                        Granularity::Monthly => view! {
                            <div class="filter-group">
                                <label class="filter-label">{move || t(locale.get(), "common.year")}</label>
                                <YearSelect value=year years=years />
                            </div>
                        }
                        .into_any(),
                    }}
                </div>
            </div>

            {move || error.get().map(|msg| view! { <ErrorBanner message=msg /> })}

            <Show when=move || loading.get() && data.get().is_none()>
                <LoadingState />
            </Show>

            <div class="stat-grid">
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "production.completion"))
                    value=Signal::derive(move || summary().map(|s| s.completion_percent))
                    format=ValueFormat::Percent { decimals: 1 }
                    status=Signal::derive(move || {
                        summary()
                            .filter(|s| s.planned_to_date > 0)
                            .map(|s| IndicatorStatus::from_completion(s.completion_percent))
                            .unwrap_or_default()
                    })
                />
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "production.actual"))
                    value=Signal::derive(move || summary().map(|s| s.actual_to_date as f64))
                    format=ValueFormat::Integer
                    subtitle=Signal::derive(move || {
                        summary().map(|s| {
                            format!(
                                "{}: {}",
                                t(locale.get(), "production.planned"),
                                format_number_int(s.planned_to_date as f64)
                            )
                        })
                    })
                />
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "production.deviation"))
                    value=Signal::derive(move || summary().map(|s| s.deviation as f64))
                    format=ValueFormat::Integer
                    status=Signal::derive(move || match summary() {
                        Some(s) if s.deviation < 0 => IndicatorStatus::Bad,
                        Some(s) if s.planned_to_date > 0 => IndicatorStatus::Good,
                        _ => IndicatorStatus::Neutral,
                    })
                />
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "production.best"))
                    value=Signal::derive(move || data.get().as_ref().and_then(best_period_output))
                    format=ValueFormat::Integer
                    subtitle=Signal::derive(move || {
                        data.get().and_then(|d| best_period_label(locale.get(), &d))
                    })
                />
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "production.below_plan"))
                    value=Signal::derive(move || summary().map(|s| s.periods_below_plan as f64))
                    format=ValueFormat::Integer
                    status=Signal::derive(move || match summary() {
                        Some(s) if s.periods_below_plan > 0 => IndicatorStatus::Warning,
                        _ => IndicatorStatus::Neutral,
                    })
                />
            </div>

            {chart}

            {move || warehouse.get().map(|report| view! { <WarehouseSection report=report /> })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(day: u32, planned: u32, actual: u32, is_future: bool) -> DailyProductionRecord {
        DailyProductionRecord {
            day,
            planned,
            actual,
            is_future,
            is_today: false,
        }
    }

    #[test]
    fn test_future_days_have_no_actual_point() {
        let records = vec![day(1, 400, 390, false), day(2, 400, 0, true)];
        let series = daily_series(Locale::En, &records);
        assert_eq!(series[0].values, vec![Some(400.0), Some(400.0)]);
        assert_eq!(series[1].values, vec![Some(390.0), None]);
        assert_eq!(series[1].name, "Actual");
    }

    #[test]
    fn test_best_period_of_monthly_data() {
        let data = ProductionData::Monthly(MonthlyProductionResponse {
            year: 2024,
            records: vec![MonthlyProductionRecord {
                month: 3,
                planned: 10_000,
                actual: 10_400,
                is_future: false,
                is_current: false,
            }],
            summary: ProductionSummary {
                best_period: Some(3),
                ..Default::default()
            },
        });
        assert_eq!(best_period_label(Locale::En, &data).as_deref(), Some("March 2024"));
        assert_eq!(best_period_output(&data), Some(10_400.0));
    }
}

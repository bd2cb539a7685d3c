use chrono::{Datelike, Local};
use contracts::dashboards::d401_financial_analytics::FinancialAnalyticsResponse;
use contracts::shared::analytics::{Period, PeriodRange};
use contracts::shared::i18n::{month_name, month_short, t, Locale};
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use contracts::shared::number_format::format_money;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d401_financial_analytics::api;
use crate::shared::components::card_animated::CardAnimated;
use crate::shared::components::charts::{
    ChartSeries, DonutChart, DonutSlice, GroupedBarChart, Unit, PALETTE,
};
use crate::shared::components::period_picker::PeriodPicker;
use crate::shared::components::stat_card::{money, StatCard};
use crate::shared::components::states::{ErrorBanner, LoadingState, NoData};
use crate::shared::locale::use_locale;
use crate::shared::page_frame::PageFrame;

const RETAIL_COLOR: &str = PALETTE[0];
const WHOLESALE_COLOR: &str = PALETTE[1];
const PROMO_COLOR: &str = PALETTE[2];

/// Axis label of a month; the year is added when the range spans several years
fn axis_label(locale: Locale, period: Period, multi_year: bool) -> String {
    if multi_year {
        format!("{} {:02}", month_short(locale, period.month), period.year % 100)
    } else {
        month_short(locale, period.month)
    }
}

/// Year-over-year growth status
fn growth_status(growth: Option<f64>) -> IndicatorStatus {
    match growth {
        Some(g) if g > 0.0 => IndicatorStatus::Good,
        Some(g) if g < 0.0 => IndicatorStatus::Bad,
        _ => IndicatorStatus::Neutral,
    }
}

#[component]
pub fn FinancialAnalyticsDashboard() -> impl IntoView {
    let locale = use_locale();
    let now = Local::now().date_naive();

    let range = RwSignal::new(PeriodRange {
        start: Period {
            year: now.year(),
            month: 1,
        },
        end: Period {
            year: now.year(),
            month: now.month(),
        },
    });
    let years = RwSignal::new(vec![now.year()]);

    let (data, set_data) = signal(None::<FinancialAnalyticsResponse>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    Effect::new(move |_| {
        spawn_local(async move {
            match api::get_years().await {
                Ok(list) if !list.is_empty() => years.set(list),
                Ok(_) => {}
                Err(e) => log::error!("Failed to load D401 years: {}", e),
            }
        });
    });

    Effect::new(move |_| {
        let range = range.get();
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::get_financial(range).await {
                Ok(response) => set_data.set(Some(response)),
                Err(e) => {
                    log::error!("Failed to load D401 financial analytics: {}", e);
                    set_data.set(None);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    });

    let on_apply = Callback::new(move |selected: PeriodRange| range.set(selected));

    let best_month_total = move || {
        data.get().and_then(|d| {
            let best = d.best_month?;
            d.records
                .iter()
                .find(|r| r.period() == best)
                .map(|r| r.total)
        })
    };
    let best_month_label = move || {
        data.get()
            .and_then(|d| d.best_month)
            .map(|p| format!("{} {}", month_name(locale.get(), p.month), p.year))
    };
    let latest_growth = move || {
        data.get()
            .and_then(|d| d.yearly.last().and_then(|y| y.growth_percent))
    };

    let charts = move || {
        let Some(d) = data.get() else {
            return view! { <></> }.into_any();
        };
        if d.records.is_empty() {
            return view! { <NoData /> }.into_any();
        }
        let loc = locale.get();
        let multi_year = d.yearly.len() > 1;

        let labels: Vec<String> = d
            .records
            .iter()
            .map(|r| axis_label(loc, r.period(), multi_year))
            .collect();
        let series = vec![
            ChartSeries {
                name: t(loc, "financial.retail").to_string(),
                color: RETAIL_COLOR,
                values: d.records.iter().map(|r| Some(r.retail)).collect(),
            },
            ChartSeries {
                name: t(loc, "financial.wholesale").to_string(),
                color: WHOLESALE_COLOR,
                values: d.records.iter().map(|r| Some(r.wholesale)).collect(),
            },
            ChartSeries {
                name: t(loc, "financial.promo").to_string(),
                color: PROMO_COLOR,
                values: d.records.iter().map(|r| Some(r.promo)).collect(),
            },
        ];
        let slices = vec![
            DonutSlice {
                label: t(loc, "financial.retail").to_string(),
                value: d.totals.retail,
                color: RETAIL_COLOR,
            },
            DonutSlice {
                label: t(loc, "financial.wholesale").to_string(),
                value: d.totals.wholesale,
                color: WHOLESALE_COLOR,
            },
            DonutSlice {
                label: t(loc, "financial.promo").to_string(),
                value: d.totals.promo,
                color: PROMO_COLOR,
            },
        ];
        let center = format!("{:.1}%", d.shares.retail);

        view! {
            <div class="dashboard-grid dashboard-grid--2-1">
                <CardAnimated title=Signal::derive(move || t(locale.get(), "financial.by_month"))>
                    <GroupedBarChart labels=labels series=series unit=Unit::Amount />
                </CardAnimated>
                <CardAnimated delay_ms=80 title=Signal::derive(move || t(locale.get(), "financial.structure"))>
                    <DonutChart slices=slices center_label=center unit=Unit::Amount />
                </CardAnimated>
            </div>
        }
        .into_any()
    };

    let yearly_table = move || {
        data.get().filter(|d| !d.yearly.is_empty()).map(|d| {
            view! {
                <CardAnimated delay_ms=160 title=Signal::derive(move || t(locale.get(), "financial.by_year"))>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=80.0>{move || t(locale.get(), "common.year")}</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>{move || t(locale.get(), "financial.retail")}</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>{move || t(locale.get(), "financial.wholesale")}</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>{move || t(locale.get(), "financial.promo")}</TableHeaderCell>
                                <TableHeaderCell min_width=160.0>{move || t(locale.get(), "common.total")}</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>{move || t(locale.get(), "financial.growth")}</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {d.yearly.into_iter().map(|y| {
                                let (growth_text, growth_class) = match y.growth_percent {
                                    Some(g) if g < 0.0 => (format!("{:.1}%", g), "cell-number cell-number--negative"),
                                    Some(g) => (format!("+{:.1}%", g), "cell-number cell-number--positive"),
                                    None => ("—".to_string(), "cell-number"),
                                };
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{y.year}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout><span class="cell-number">{format_money(y.totals.retail)}</span></TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout><span class="cell-number">{format_money(y.totals.wholesale)}</span></TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout><span class="cell-number">{format_money(y.totals.promo)}</span></TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout><strong class="cell-number">{format_money(y.totals.total)}</strong></TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout><span class=growth_class>{growth_text}</span></TableCellLayout></TableCell>
                                    </TableRow>
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                </CardAnimated>
            }
        })
    };

    view! {
        <PageFrame page_id="d401_financial_analytics--dashboard">
            <div class="page__header">
                <h2 class="page__title">{move || t(locale.get(), "financial.title")}</h2>
                <div class="page__filters">
                    <PeriodPicker
                        years=Signal::derive(move || years.get())
                        initial=range.get_untracked()
                        on_apply=on_apply
                    />
                </div>
            </div>

            {move || error.get().map(|msg| view! { <ErrorBanner message=msg /> })}

            <Show when=move || loading.get() && data.get().is_none()>
                <LoadingState />
            </Show>

            <div class="stat-grid">
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "common.total"))
                    value=Signal::derive(move || data.get().map(|d| d.totals.total))
                    format=money()
                />
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "financial.average"))
                    value=Signal::derive(move || data.get().map(|d| d.average_monthly))
                    format=money()
                />
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "financial.best_month"))
                    value=Signal::derive(best_month_total)
                    format=money()
                    subtitle=Signal::derive(best_month_label)
                />
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "financial.growth"))
                    value=Signal::derive(latest_growth)
                    format=ValueFormat::Percent { decimals: 1 }
                    status=Signal::derive(move || growth_status(latest_growth()))
                />
            </div>

            {charts}
            {yearly_table}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_label() {
        let p = Period { year: 2024, month: 3 };
        assert_eq!(axis_label(Locale::En, p, false), "Mar");
        assert_eq!(axis_label(Locale::En, p, true), "Mar 24");
    }

    #[test]
    fn test_growth_status() {
        assert_eq!(growth_status(Some(4.2)), IndicatorStatus::Good);
        assert_eq!(growth_status(Some(-0.1)), IndicatorStatus::Bad);
        assert_eq!(growth_status(None), IndicatorStatus::Neutral);
    }
}

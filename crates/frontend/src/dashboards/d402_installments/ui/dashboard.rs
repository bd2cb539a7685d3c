use contracts::dashboards::d402_installments::{InstallmentTotals, InstallmentsResponse, NamedRef};
use contracts::shared::analytics::Selection;
use contracts::shared::i18n::{t, Locale};
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use contracts::shared::number_format::{format_money, format_number_int};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d402_installments::api;
use crate::shared::components::card_animated::CardAnimated;
use crate::shared::components::charts::{BarChart, ChartPoint, DonutChart, DonutSlice, Unit, PALETTE};
use crate::shared::components::stat_card::{money, StatCard};
use crate::shared::components::states::{ErrorBanner, LoadingState, NoData};
use crate::shared::locale::use_locale;
use crate::shared::page_frame::PageFrame;

const PAID_COLOR: &str = "var(--color-success)";
const OVERDUE_COLOR: &str = "var(--color-error)";
const REMAINING_COLOR: &str = "var(--color-neutral)";

/// Paid / overdue / remaining slices of a total
fn share_slices(locale: Locale, totals: &InstallmentTotals) -> Vec<DonutSlice> {
    vec![
        DonutSlice {
            label: t(locale, "installments.paid").to_string(),
            value: totals.shares.paid,
            color: PAID_COLOR,
        },
        DonutSlice {
            label: t(locale, "installments.overdue").to_string(),
            value: totals.shares.overdue,
            color: OVERDUE_COLOR,
        },
        DonutSlice {
            label: t(locale, "installments.remaining").to_string(),
            value: totals.shares.remaining,
            color: REMAINING_COLOR,
        },
    ]
}

/// Dimension filter fed by the catalog of the last successful response
#[component]
fn RefSelect(
    label_key: &'static str,
    value: RwSignal<Selection>,
    #[prop(into)] options: Signal<Vec<NamedRef>>,
) -> impl IntoView {
    let locale = use_locale();

    view! {
        <div class="filter-group">
            <label class="filter-label">{move || t(locale.get(), label_key)}</label>
            <select
                class="filter-select"
                on:change=move |ev| value.set(Selection::parse(Some(event_target_value(&ev).as_str())))
            >
                <option value=Selection::ALL selected=move || value.get() == Selection::All>
                    {move || t(locale.get(), "common.all")}
                </option>
                {move || options.get().into_iter().map(|r| {
                    let id = r.id.clone();
                    view! {
                        <option value=r.id selected=move || value.get().as_query_value() == id>
                            {r.name}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}

/// Breakdown rows by model or by region
#[component]
fn BreakdownTable(name_key: &'static str, rows: Vec<(String, InstallmentTotals)>) -> impl IntoView {
    let locale = use_locale();

    if rows.is_empty() {
        return view! { <NoData /> }.into_any();
    }

    view! {
        <Table>
            <TableHeader>
                <TableRow>
                    <TableHeaderCell resizable=true min_width=160.0>{move || t(locale.get(), name_key)}</TableHeaderCell>
                    <TableHeaderCell min_width=90.0>{move || t(locale.get(), "installments.contracts")}</TableHeaderCell>
                    <TableHeaderCell min_width=140.0>{move || t(locale.get(), "installments.total_price")}</TableHeaderCell>
                    <TableHeaderCell min_width=140.0>{move || t(locale.get(), "installments.paid")}</TableHeaderCell>
                    <TableHeaderCell min_width=140.0>{move || t(locale.get(), "installments.overdue")}</TableHeaderCell>
                    <TableHeaderCell min_width=140.0>{move || t(locale.get(), "installments.remaining")}</TableHeaderCell>
                    <TableHeaderCell min_width=80.0>"%"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                {rows.into_iter().map(|(name, totals)| {
                    let overdue_class = if totals.total_overdue > 0.0 {
                        "cell-number cell-number--negative"
                    } else {
                        "cell-number"
                    };
                    view! {
                        <TableRow>
                            <TableCell><TableCellLayout truncate=true>{name}</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout><span class="cell-number">{format_number_int(totals.contract_count)}</span></TableCellLayout></TableCell>
                            <TableCell><TableCellLayout><span class="cell-number">{format_money(totals.total_price)}</span></TableCellLayout></TableCell>
                            <TableCell><TableCellLayout><span class="cell-number">{format_money(totals.total_paid)}</span></TableCellLayout></TableCell>
                            <TableCell><TableCellLayout><span class=overdue_class>{format_money(totals.total_overdue)}</span></TableCellLayout></TableCell>
                            <TableCell><TableCellLayout><span class="cell-number">{format_money(totals.remaining)}</span></TableCellLayout></TableCell>
                            <TableCell><TableCellLayout><span class="cell-number">{format!("{:.1}%", totals.paid_percent)}</span></TableCellLayout></TableCell>
                        </TableRow>
                    }
                }).collect_view()}
            </TableBody>
        </Table>
    }
    .into_any()
}

#[component]
pub fn InstallmentsDashboard() -> impl IntoView {
    let locale = use_locale();

    let region = RwSignal::new(Selection::All);
    let model = RwSignal::new(Selection::All);
    let regions = RwSignal::new(Vec::<NamedRef>::new());
    let models = RwSignal::new(Vec::<NamedRef>::new());

    let (data, set_data) = signal(None::<InstallmentsResponse>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    Effect::new(move |_| {
        let region_sel = region.get();
        let model_sel = model.get();
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::get_installments(&region_sel, &model_sel).await {
                Ok(response) => {
                    if !response.regions.is_empty() {
                        regions.set(response.regions.clone());
                    }
                    if !response.models.is_empty() {
                        models.set(response.models.clone());
                    }
                    if response.fetch_failed {
                        log::warn!("D402: upstream installment source is unavailable");
                    }
                    set_data.set(Some(response));
                }
                Err(e) => {
                    log::error!("Failed to load D402 installments: {}", e);
                    set_data.set(None);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    });

    let totals = move || data.get().map(|d| d.totals);
    let fetch_failed = move || data.get().map(|d| d.fetch_failed).unwrap_or(false);

    let charts = move || {
        let Some(d) = data.get() else {
            return view! { <></> }.into_any();
        };
        if d.fetch_failed {
            return view! { <></> }.into_any();
        }
        let loc = locale.get();
        let slices = share_slices(loc, &d.totals);
        let center = format!("{:.1}%", d.totals.shares.paid);
        let region_points: Vec<ChartPoint> = d
            .by_region
            .iter()
            .map(|r| ChartPoint {
                label: r.region_name.clone(),
                value: r.totals.total_price,
            })
            .collect();
        let model_points: Vec<ChartPoint> = d
            .by_model
            .iter()
            .map(|m| ChartPoint {
                label: m.model_name.clone(),
                value: m.totals.total_price,
            })
            .collect();

        view! {
            <div class="dashboard-grid dashboard-grid--1-2">
                <CardAnimated title=Signal::derive(move || t(locale.get(), "installments.structure"))>
                    <DonutChart slices=slices center_label=center unit=Unit::Percent />
                </CardAnimated>
                <CardAnimated delay_ms=80 title=Signal::derive(move || t(locale.get(), "installments.by_region"))>
                    <BarChart points=region_points color=PALETTE[0] unit=Unit::Amount />
                </CardAnimated>
            </div>
            <CardAnimated delay_ms=120 title=Signal::derive(move || t(locale.get(), "installments.by_model"))>
                <BarChart points=model_points color=PALETTE[3] unit=Unit::Amount />
            </CardAnimated>
        }
        .into_any()
    };

    let tables = move || {
        data.get().filter(|d| !d.fetch_failed).map(|d| {
            let model_rows: Vec<(String, InstallmentTotals)> = d
                .by_model
                .into_iter()
                .map(|m| (m.model_name, m.totals))
                .collect();
            let region_rows: Vec<(String, InstallmentTotals)> = d
                .by_region
                .into_iter()
                .map(|r| (r.region_name, r.totals))
                .collect();
            view! {
                <div class="dashboard-grid dashboard-grid--2">
                    <CardAnimated delay_ms=160 title=Signal::derive(move || t(locale.get(), "installments.by_model"))>
                        <BreakdownTable name_key="installments.model" rows=model_rows />
                    </CardAnimated>
                    <CardAnimated delay_ms=200 title=Signal::derive(move || t(locale.get(), "installments.by_region"))>
                        <BreakdownTable name_key="installments.region" rows=region_rows />
                    </CardAnimated>
                </div>
            }
        })
    };

    view! {
        <PageFrame page_id="d402_installments--dashboard">
            <div class="page__header">
                <h2 class="page__title">{move || t(locale.get(), "installments.title")}</h2>
                <div class="page__filters">
                    <RefSelect label_key="installments.region" value=region options=regions />
                    <RefSelect label_key="installments.model" value=model options=models />
                </div>
            </div>

            {move || error.get().map(|msg| view! { <ErrorBanner message=msg /> })}
            {move || fetch_failed().then(|| view! {
                <ErrorBanner message=t(locale.get(), "installments.fetch_failed") />
            })}

            <Show when=move || loading.get() && data.get().is_none()>
                <LoadingState />
            </Show>

            <div class="stat-grid">
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "installments.contracts"))
                    value=Signal::derive(move || totals().map(|s| s.contract_count))
                    format=ValueFormat::Integer
                />
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "installments.total_price"))
                    value=Signal::derive(move || totals().map(|s| s.total_price))
                    format=money()
                />
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "installments.paid"))
                    value=Signal::derive(move || totals().map(|s| s.total_paid))
                    format=money()
                    status=IndicatorStatus::Good
                    subtitle=Signal::derive(move || totals().map(|s| format!("{:.1}%", s.paid_percent)))
                />
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "installments.prepayment"))
                    value=Signal::derive(move || totals().map(|s| s.total_prepayment))
                    format=money()
                    subtitle=Signal::derive(move || totals().map(|s| format!("{:.1}%", s.prepayment_percent)))
                />
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "installments.overdue"))
                    value=Signal::derive(move || totals().map(|s| s.total_overdue))
                    format=money()
                    status=Signal::derive(move || match totals() {
                        Some(s) if s.total_overdue > 0.0 => IndicatorStatus::Bad,
                        _ => IndicatorStatus::Neutral,
                    })
                    subtitle=Signal::derive(move || totals().map(|s| format!("{:.1}%", s.overdue_percent)))
                />
                <StatCard
                    label=Signal::derive(move || t(locale.get(), "installments.remaining"))
                    value=Signal::derive(move || totals().map(|s| s.remaining))
                    format=money()
                />
            </div>

            {charts}
            {tables}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::analytics::payment_shares;

    #[test]
    fn test_share_slices_follow_payment_shares() {
        let totals = InstallmentTotals {
            shares: payment_shares(1_000.0, 600.0, 100.0),
            ..Default::default()
        };
        let slices = share_slices(Locale::En, &totals);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].label, "Paid");
        let sum: f64 = slices.iter().map(|s| s.value).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }
}

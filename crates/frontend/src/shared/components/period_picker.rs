//! Month/year selectors and the start-end period picker of the financial page.

use contracts::shared::analytics::{is_period_valid, PeriodRange};
use contracts::shared::i18n::{month_name, t};
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance};

use crate::shared::locale::use_locale;

#[component]
pub fn YearSelect(value: RwSignal<i32>, #[prop(into)] years: Signal<Vec<i32>>) -> impl IntoView {
    view! {
        <select
            class="filter-select"
            on:change=move |ev| {
                if let Ok(year) = event_target_value(&ev).parse::<i32>() {
                    value.set(year);
                }
            }
        >
            {move || years.get().into_iter().map(|year| view! {
                <option value=year.to_string() selected=move || value.get() == year>
                    {year.to_string()}
                </option>
            }).collect_view()}
        </select>
    }
}

#[component]
fn MonthSelect(value: RwSignal<u32>) -> impl IntoView {
    let locale = use_locale();
    view! {
        <select
            class="filter-select"
            on:change=move |ev| {
                if let Ok(month) = event_target_value(&ev).parse::<u32>() {
                    value.set(month);
                }
            }
        >
            {(1..=12u32).map(|month| view! {
                <option value=month.to_string() selected=move || value.get() == month>
                    {move || month_name(locale.get(), month)}
                </option>
            }).collect_view()}
        </select>
    }
}

/// Year and month of a single-month dashboard; changes apply immediately.
#[component]
pub fn MonthYearSelect(
    year: RwSignal<i32>,
    month: RwSignal<u32>,
    #[prop(into)] years: Signal<Vec<i32>>,
) -> impl IntoView {
    let locale = use_locale();
    view! {
        <div class="filter-group">
            <label class="filter-label">{move || t(locale.get(), "common.month")}</label>
            <MonthSelect value=month />
            <YearSelect value=year years=years />
        </div>
    }
}

/// Start and end month. Apply stays disabled while the start is after the end.
#[component]
pub fn PeriodPicker(
    #[prop(into)] years: Signal<Vec<i32>>,
    initial: PeriodRange,
    on_apply: Callback<PeriodRange>,
) -> impl IntoView {
    let locale = use_locale();

    let start_year = RwSignal::new(initial.start.year);
    let start_month = RwSignal::new(initial.start.month);
    let end_year = RwSignal::new(initial.end.year);
    let end_month = RwSignal::new(initial.end.month);

    let valid = Memo::new(move |_| {
        is_period_valid(
            start_year.get(),
            start_month.get(),
            end_year.get(),
            end_month.get(),
        )
    });

    let apply = move |_| {
        match PeriodRange::from_parts(
            start_year.get_untracked(),
            start_month.get_untracked(),
            end_year.get_untracked(),
            end_month.get_untracked(),
        ) {
            Ok(range) => on_apply.run(range),
            Err(e) => log::warn!("Period rejected: {}", e),
        }
    };

    view! {
        <div class="period-picker">
            <div class="filter-group">
                <label class="filter-label">{move || t(locale.get(), "common.from")}</label>
                <MonthSelect value=start_month />
                <YearSelect value=start_year years=years />
            </div>
            <div class="filter-group">
                <label class="filter-label">{move || t(locale.get(), "common.to")}</label>
                <MonthSelect value=end_month />
                <YearSelect value=end_year years=years />
            </div>
            <Button
                appearance=ButtonAppearance::Primary
                disabled=Signal::derive(move || !valid.get())
                on_click=apply
            >
                {move || t(locale.get(), "common.apply")}
            </Button>
            <Show when=move || !valid.get()>
                <span class="period-picker__error">
                    {move || t(locale.get(), "common.invalid_period")}
                </span>
            </Show>
        </div>
    }
}

use contracts::shared::i18n::Locale;
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use contracts::shared::number_format::{
    compact_number, format_money, format_number_int, format_number_with_decimals,
};
use leptos::prelude::*;

use crate::shared::locale::use_locale;

pub const CURRENCY: &str = "UZS";

pub fn money() -> ValueFormat {
    ValueFormat::Money {
        currency: CURRENCY.to_string(),
    }
}

/// Short text for the card face
fn format_value(val: f64, fmt: &ValueFormat, locale: Locale) -> String {
    match fmt {
        ValueFormat::Money { currency } => format!("{} {}", compact_number(val, locale), currency),
        ValueFormat::Number { decimals } => format_number_with_decimals(val, *decimals),
        ValueFormat::Percent { decimals } => {
            format!("{:.prec$}%", val, prec = *decimals as usize)
        }
        ValueFormat::Integer => format_number_int(val),
    }
}

/// Full precision for the tooltip
fn format_exact(val: f64, fmt: &ValueFormat) -> String {
    match fmt {
        ValueFormat::Money { currency } => format!("{} {}", format_money(val), currency),
        ValueFormat::Number { decimals } => format_number_with_decimals(val, *decimals),
        ValueFormat::Percent { .. } => format!("{:.2}%", val),
        ValueFormat::Integer => format_number_int(val),
    }
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: Signal<&'static str>,
    /// Primary numeric value (None = loading/error)
    #[prop(into)]
    value: Signal<Option<f64>>,
    /// How to format the value
    format: ValueFormat,
    /// Visual status
    #[prop(into, optional)]
    status: Signal<IndicatorStatus>,
    /// Change % relative to previous period
    #[prop(into, optional)]
    change_percent: Signal<Option<f64>>,
    /// Optional subtitle below the value
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let locale = use_locale();
    let format_exact_clone = format.clone();

    let status_class = move || match status.get() {
        IndicatorStatus::Good => "stat-card stat-card--success",
        IndicatorStatus::Bad => "stat-card stat-card--error",
        IndicatorStatus::Warning => "stat-card stat-card--warning",
        IndicatorStatus::Neutral => "stat-card",
    };

    let formatted = move || match value.get() {
        Some(v) => format_value(v, &format, locale.get()),
        None => "—".to_string(),
    };

    let exact = move || {
        value
            .get()
            .map(|v| format_exact(v, &format_exact_clone))
            .unwrap_or_default()
    };

    let change_view = move || {
        change_percent.get().map(|pct| {
            let (arrow, cls) = if pct > 0.5 {
                ("\u{2191}", "stat-card__change stat-card__change--up")
            } else if pct < -0.5 {
                ("\u{2193}", "stat-card__change stat-card__change--down")
            } else {
                ("", "stat-card__change stat-card__change--flat")
            };
            let text = format!("{}{:.1}%", arrow, pct.abs());
            view! { <span class=cls>{text}</span> }
        })
    };

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class=status_class>
            <div class="stat-card__content">
                <div class="stat-card__label">{move || label.get()}</div>
                <div class="stat-card__value" title=exact>
                    {formatted}
                    {change_view}
                </div>
                {subtitle_view}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_is_compact_on_face_and_exact_in_tooltip() {
        let fmt = money();
        assert_eq!(format_value(1_234_567.0, &fmt, Locale::En), "1.2M UZS");
        assert_eq!(format_exact(1_234_567.0, &fmt), "1 234 567.00 UZS");
    }

    #[test]
    fn test_percent_and_integer() {
        let pct = ValueFormat::Percent { decimals: 1 };
        assert_eq!(format_value(87.456, &pct, Locale::Ru), "87.5%");
        assert_eq!(format_exact(87.456, &pct), "87.46%");
        assert_eq!(format_value(12500.0, &ValueFormat::Integer, Locale::Ru), "12 500");
    }
}

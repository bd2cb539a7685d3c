//! SVG Chart Components
//!
//! Bar, grouped bar, donut and line charts drawn from already aggregated arrays.
//! Bars and labels show compact numbers; full precision lives in `<title>` tooltips.
//! Entrance animations are CSS keyframes (`chart-grow`, `chart-draw`, `chart-fade`).

pub mod geometry;

use contracts::shared::analytics::percentage;
use contracts::shared::i18n::Locale;
use contracts::shared::number_format::{
    compact_number, format_money, format_number_int, format_percent,
};
use leptos::prelude::*;

use self::geometry::{arc_path, line_path, nice_max, slice_angles, ticks, Frame};
use crate::shared::components::states::NoData;
use crate::shared::locale::use_locale;

pub const CHART_WIDTH: f64 = 720.0;

pub const PALETTE: [&str; 8] = [
    "var(--chart-1)",
    "var(--chart-2)",
    "var(--chart-3)",
    "var(--chart-4)",
    "var(--chart-5)",
    "var(--chart-6)",
    "var(--chart-7)",
    "var(--chart-8)",
];

/// What the plotted numbers are, for label and tooltip formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Amount,
    Count,
    Percent,
}

impl Unit {
    pub fn short(self, value: f64, locale: Locale) -> String {
        match self {
            Unit::Amount | Unit::Count => compact_number(value, locale),
            Unit::Percent => format!("{:.0}%", value),
        }
    }

    pub fn exact(self, value: f64) -> String {
        match self {
            Unit::Amount => format_money(value),
            Unit::Count => format_number_int(value),
            Unit::Percent => format_percent(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// One named series over shared x labels; `None` leaves a gap
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub color: &'static str,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonutSlice {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

fn n(v: f64) -> String {
    format!("{:.2}", v)
}

fn delay_style(index: usize) -> String {
    format!("animation-delay: {}ms;", (index * 25).min(600))
}

/// Every k-th x label so that at most ~12 are printed
fn label_step(count: usize) -> usize {
    count.div_ceil(12).max(1)
}

fn series_max(series: &[ChartSeries]) -> f64 {
    series
        .iter()
        .flat_map(|s| s.values.iter().flatten())
        .fold(0.0, |acc: f64, v| acc.max(*v))
}

/// Grid lines and tick labels
#[component]
fn YAxis(frame: Frame, max: f64, unit: Unit) -> impl IntoView {
    let locale = use_locale();

    ticks(max, 4)
        .into_iter()
        .map(|tick| {
            let y = frame.y_of(tick, max);
            view! {
                <g class="chart-grid">
                    <line
                        x1=n(frame.left)
                        x2=n(frame.width - frame.right)
                        y1=n(y)
                        y2=n(y)
                        stroke="var(--chart-grid)"
                        stroke-dasharray="4,4"
                    />
                    <text class="chart-axis-label" x=n(frame.left - 8.0) y=n(y + 4.0) text-anchor="end">
                        {move || unit.short(tick, locale.get())}
                    </text>
                </g>
            }
        })
        .collect_view()
}

/// Labels under each slot, thinned out for long axes
#[component]
fn XLabels(frame: Frame, labels: Vec<String>) -> impl IntoView {
    let count = labels.len();
    let step = label_step(count);

    labels
        .into_iter()
        .enumerate()
        .filter(|(i, _)| i % step == 0)
        .map(|(i, label)| {
            let (x, w) = frame.slot(i, count);
            view! {
                <text
                    class="chart-axis-label"
                    x=n(x + w / 2.0)
                    y=n(frame.baseline() + 18.0)
                    text-anchor="middle"
                >
                    {label}
                </text>
            }
        })
        .collect_view()
}

#[component]
pub fn ChartLegend(items: Vec<(String, &'static str)>) -> impl IntoView {
    view! {
        <div class="chart-legend">
            {items.into_iter().map(|(name, color)| view! {
                <span class="chart-legend__item">
                    <span class="chart-legend__swatch" style=format!("background: {};", color)></span>
                    {name}
                </span>
            }).collect_view()}
        </div>
    }
}

/// Single-series vertical bar chart
#[component]
pub fn BarChart(
    points: Vec<ChartPoint>,
    #[prop(default = PALETTE[0])] color: &'static str,
    #[prop(optional)] unit: Unit,
    #[prop(default = 260.0)] height: f64,
) -> impl IntoView {
    let locale = use_locale();

    if points.is_empty() {
        return view! { <NoData /> }.into_any();
    }

    let frame = Frame::new(CHART_WIDTH, height);
    let max = nice_max(points.iter().fold(0.0, |acc: f64, p| acc.max(p.value)));
    let count = points.len();
    let show_values = count <= 12;
    let labels: Vec<String> = points.iter().map(|p| p.label.clone()).collect();

    let bars = points
        .into_iter()
        .enumerate()
        .map(|(i, point)| {
            let (x, w) = frame.slot(i, count);
            let bar_width = w * 0.7;
            let bar_x = x + (w - bar_width) / 2.0;
            let y = frame.y_of(point.value, max);
            let tooltip = format!("{}: {}", point.label, unit.exact(point.value));
            let value = point.value;

            view! {
                <g>
                    <rect
                        class="chart-bar"
                        x=n(bar_x)
                        y=n(y)
                        width=n(bar_width)
                        height=n(frame.baseline() - y)
                        rx="3"
                        fill=color
                        style=delay_style(i)
                    >
                        <title>{tooltip}</title>
                    </rect>
                    {show_values.then(|| view! {
                        <text class="chart-value" x=n(bar_x + bar_width / 2.0) y=n(y - 4.0) text-anchor="middle">
                            {move || unit.short(value, locale.get())}
                        </text>
                    })}
                </g>
            }
        })
        .collect_view();

    view! {
        <svg
            class="chart chart--bar"
            viewBox=format!("0 0 {} {}", CHART_WIDTH, height)
            preserveAspectRatio="xMidYMid meet"
        >
            <YAxis frame=frame max=max unit=unit />
            {bars}
            <XLabels frame=frame labels=labels />
        </svg>
    }
    .into_any()
}

/// Several series side by side in each x slot
#[component]
pub fn GroupedBarChart(
    labels: Vec<String>,
    series: Vec<ChartSeries>,
    #[prop(optional)] unit: Unit,
    #[prop(default = 280.0)] height: f64,
) -> impl IntoView {
    if labels.is_empty() || series.is_empty() {
        return view! { <NoData /> }.into_any();
    }

    let frame = Frame::new(CHART_WIDTH, height);
    let max = nice_max(series_max(&series));
    let count = labels.len();
    let group_size = series.len();
    let legend: Vec<(String, &'static str)> =
        series.iter().map(|s| (s.name.clone(), s.color)).collect();

    let bars = labels
        .iter()
        .enumerate()
        .flat_map(|(i, label)| {
            let (x, w) = frame.slot(i, count);
            let group_width = w * 0.8;
            let bar_width = group_width / group_size as f64;
            let group_x = x + (w - group_width) / 2.0;

            series
                .iter()
                .enumerate()
                .filter_map(move |(j, s)| {
                    let value = s.values.get(i).copied().flatten()?;
                    let y = frame.y_of(value, max);
                    let tooltip = format!("{} · {}: {}", label, s.name, unit.exact(value));
                    Some(view! {
                        <rect
                            class="chart-bar"
                            x=n(group_x + bar_width * j as f64)
                            y=n(y)
                            width=n((bar_width - 1.0).max(1.0))
                            height=n(frame.baseline() - y)
                            rx="2"
                            fill=s.color
                            style=delay_style(i)
                        >
                            <title>{tooltip}</title>
                        </rect>
                    })
                })
                .collect::<Vec<_>>()
        })
        .collect_view();

    view! {
        <div class="chart-wrapper">
            <svg
                class="chart chart--grouped"
                viewBox=format!("0 0 {} {}", CHART_WIDTH, height)
                preserveAspectRatio="xMidYMid meet"
            >
                <YAxis frame=frame max=max unit=unit />
                {bars}
                <XLabels frame=frame labels=labels.clone() />
            </svg>
            <ChartLegend items=legend />
        </div>
    }
    .into_any()
}

/// Lines over shared x labels; `highlight` marks one slot (e.g. today)
#[component]
pub fn LineChart(
    labels: Vec<String>,
    series: Vec<ChartSeries>,
    #[prop(optional)] unit: Unit,
    #[prop(default = None)] highlight: Option<usize>,
    #[prop(default = 280.0)] height: f64,
) -> impl IntoView {
    if labels.is_empty() || series.is_empty() {
        return view! { <NoData /> }.into_any();
    }

    let frame = Frame::new(CHART_WIDTH, height);
    let max = nice_max(series_max(&series));
    let count = labels.len();
    let center_x = move |i: usize| {
        let (x, w) = frame.slot(i, count);
        x + w / 2.0
    };
    let legend: Vec<(String, &'static str)> =
        series.iter().map(|s| (s.name.clone(), s.color)).collect();

    let marker = highlight.filter(|i| *i < count).map(|i| {
        view! {
            <line
                class="chart-marker"
                x1=n(center_x(i))
                x2=n(center_x(i))
                y1=n(frame.top)
                y2=n(frame.baseline())
                stroke="var(--color-accent)"
                stroke-dasharray="3,3"
            />
        }
    });

    let lines = series
        .iter()
        .map(|s| {
            let points: Vec<(usize, f64)> = s
                .values
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.map(|v| (i, v)))
                .collect();
            let coords: Vec<(f64, f64)> = points
                .iter()
                .map(|(i, v)| (center_x(*i), frame.y_of(*v, max)))
                .collect();

            let dots = points
                .iter()
                .zip(coords.iter())
                .map(|((i, v), (x, y))| {
                    let tooltip = format!("{} · {}: {}", labels[*i], s.name, unit.exact(*v));
                    view! {
                        <circle class="chart-dot" cx=n(*x) cy=n(*y) r="3.5" fill=s.color>
                            <title>{tooltip}</title>
                        </circle>
                    }
                })
                .collect_view();

            view! {
                <g class="chart-series">
                    <path
                        class="chart-line"
                        d=line_path(&coords)
                        fill="none"
                        stroke=s.color
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                    />
                    {dots}
                </g>
            }
        })
        .collect_view();

    view! {
        <div class="chart-wrapper">
            <svg
                class="chart chart--line"
                viewBox=format!("0 0 {} {}", CHART_WIDTH, height)
                preserveAspectRatio="xMidYMid meet"
            >
                <YAxis frame=frame max=max unit=unit />
                {marker}
                {lines}
                <XLabels frame=frame labels=labels.clone() />
            </svg>
            <ChartLegend items=legend />
        </div>
    }
    .into_any()
}

/// Ring of slices with a caption in the middle
#[component]
pub fn DonutChart(
    slices: Vec<DonutSlice>,
    #[prop(into)] center_label: Signal<String>,
    #[prop(optional)] unit: Unit,
    #[prop(default = 220.0)] size: f64,
) -> impl IntoView {
    let total: f64 = slices.iter().filter(|s| s.value > 0.0).map(|s| s.value).sum();
    if total <= 0.0 {
        return view! { <NoData /> }.into_any();
    }

    let center = size / 2.0;
    let thickness = size * 0.14;
    let radius = center - thickness / 2.0 - 4.0;
    let angles = slice_angles(&slices.iter().map(|s| s.value).collect::<Vec<_>>());

    let legend: Vec<(String, &'static str)> = slices
        .iter()
        .map(|s| {
            (
                format!("{} · {}", s.label, format_percent(percentage(s.value.max(0.0), total))),
                s.color,
            )
        })
        .collect();

    let arcs = slices
        .into_iter()
        .zip(angles)
        .enumerate()
        .filter(|(_, (_, (start, end)))| end > start)
        .map(|(i, (slice, (start, end)))| {
            let tooltip = format!(
                "{}: {} ({})",
                slice.label,
                unit.exact(slice.value),
                format_percent(percentage(slice.value, total))
            );
            view! {
                <path
                    class="chart-slice"
                    d=arc_path(center, center, radius, start, end)
                    fill="none"
                    stroke=slice.color
                    stroke-width=n(thickness)
                    style=delay_style(i * 4)
                >
                    <title>{tooltip}</title>
                </path>
            }
        })
        .collect_view();

    view! {
        <div class="chart-wrapper chart-wrapper--donut">
            <svg
                class="chart chart--donut"
                viewBox=format!("0 0 {} {}", size, size)
                preserveAspectRatio="xMidYMid meet"
            >
                {arcs}
                <text
                    class="chart-donut-center"
                    x=n(center)
                    y=n(center)
                    text-anchor="middle"
                    dominant-baseline="middle"
                >
                    {move || center_label.get()}
                </text>
            </svg>
            <ChartLegend items=legend />
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_step() {
        assert_eq!(label_step(0), 1);
        assert_eq!(label_step(12), 1);
        assert_eq!(label_step(31), 3);
    }

    #[test]
    fn test_series_max_skips_gaps() {
        let series = vec![
            ChartSeries {
                name: "plan".into(),
                color: PALETTE[0],
                values: vec![Some(3.0), None, Some(7.5)],
            },
            ChartSeries {
                name: "fact".into(),
                color: PALETTE[1],
                values: vec![None, Some(5.0)],
            },
        ];
        assert_eq!(series_max(&series), 7.5);
    }

    #[test]
    fn test_unit_formatting() {
        assert_eq!(Unit::Amount.short(2_500_000.0, Locale::En), "2.5M");
        assert_eq!(Unit::Amount.exact(2_500_000.0), "2 500 000.00");
        assert_eq!(Unit::Percent.short(42.4, Locale::Ru), "42%");
        assert_eq!(Unit::Count.exact(1234.0), "1 234");
    }
}

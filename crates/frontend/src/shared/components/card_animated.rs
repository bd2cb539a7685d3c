//! Thaw `Card` that fades in on mount (`@keyframes card-appear` in `styles.css`).
//! Neighbouring cards get growing `delay_ms` for a stagger effect.

use leptos::prelude::*;
use thaw::Card;

/// Inline style carrying the stagger delay into `.card-animated`
fn delay_style(delay_ms: u32) -> String {
    format!("--card-delay: {}ms;", delay_ms)
}

#[component]
pub fn CardAnimated(
    /// Задержка появления, мс
    #[prop(optional)]
    delay_ms: u32,
    /// Заголовок; пустой не выводится
    #[prop(optional, into)]
    title: Signal<&'static str>,
    children: Children,
) -> impl IntoView {
    let heading = move || {
        let text = title.get();
        (!text.is_empty()).then(|| view! { <h3 class="card__title">{text}</h3> })
    };

    view! {
        <Card class="card-animated" attr:style=delay_style(delay_ms)>
            {heading}
            {children()}
        </Card>
    }
}

//! Loading, error and empty placeholders shared by every dashboard.

use contracts::shared::i18n::t;
use leptos::prelude::*;
use thaw::Spinner;

use crate::shared::locale::use_locale;

#[component]
pub fn LoadingState() -> impl IntoView {
    let locale = use_locale();
    view! {
        <div class="state state--loading">
            <Spinner />
            <span>{move || t(locale.get(), "common.loading")}</span>
        </div>
    }
}

#[component]
pub fn ErrorBanner(#[prop(into)] message: String) -> impl IntoView {
    let locale = use_locale();
    view! {
        <div class="alert alert--error">
            <strong>"⚠ "{move || t(locale.get(), "common.error")}": "</strong>
            {message}
        </div>
    }
}

#[component]
pub fn NoData() -> impl IntoView {
    let locale = use_locale();
    view! {
        <div class="state state--empty">{move || t(locale.get(), "common.no_data")}</div>
    }
}

//! Root element of every dashboard page.
//!
//! `id` is `"{tab key}--dashboard"`, for example `"d401_financial_analytics--dashboard"`,
//! and `data-page-category` is always `dashboard`, so styles and browser tests can
//! address a page without knowing its markup.

use leptos::prelude::*;

pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Tab key part of a page id: `"d403_production--dashboard"` -> `"d403_production"`
pub fn tab_key_of(page_id: &str) -> &str {
    page_id.split("--").next().unwrap_or(page_id)
}

#[component]
pub fn PageFrame(page_id: &'static str, children: Children) -> impl IntoView {
    view! {
        <section
            id=page_id
            class="page page--dashboard"
            data-page-category=PAGE_CAT_DASHBOARD
            data-tab=tab_key_of(page_id)
        >
            {children()}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_key_of() {
        assert_eq!(tab_key_of("d403_production--dashboard"), "d403_production");
        assert_eq!(tab_key_of("plain"), "plain");
    }
}

//! Tab content registry - единственный источник правды для маппинга tab.key → View

use leptos::prelude::*;

use crate::dashboards::{
    ClosingTrackerDashboard, FinancialAnalyticsDashboard, InstallmentsDashboard,
    ProductionDashboard,
};

pub struct TabDef {
    pub key: &'static str,
    /// Translation key of the tab title
    pub title_key: &'static str,
}

pub const TABS: [TabDef; 4] = [
    TabDef {
        key: "d400_closing_tracker",
        title_key: "tab.closing",
    },
    TabDef {
        key: "d401_financial_analytics",
        title_key: "tab.financial",
    },
    TabDef {
        key: "d402_installments",
        title_key: "tab.installments",
    },
    TabDef {
        key: "d403_production",
        title_key: "tab.production",
    },
];

pub const DEFAULT_TAB: &str = "d400_closing_tracker";

pub fn is_known_tab(key: &str) -> bool {
    TABS.iter().any(|tab| tab.key == key)
}

/// Рендерит контент таба по его ключу.
pub fn render_tab_content(key: &str) -> AnyView {
    match key {
        "d400_closing_tracker" => view! { <ClosingTrackerDashboard /> }.into_any(),
        "d401_financial_analytics" => view! { <FinancialAnalyticsDashboard /> }.into_any(),
        "d402_installments" => view! { <InstallmentsDashboard /> }.into_any(),
        "d403_production" => view! { <ProductionDashboard /> }.into_any(),
        _ => {
            log::warn!("Unknown tab key: {}", key);
            view! { <div class="placeholder">{format!("Unknown tab: {}", key)}</div> }.into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry() {
        assert!(is_known_tab(DEFAULT_TAB));
        assert!(is_known_tab("d403_production"));
        assert!(!is_known_tab("a001_connection_1c"));
    }
}

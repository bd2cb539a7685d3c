use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use crate::layout::tabs::registry::{is_known_tab, DEFAULT_TAB};

/// Reads `active` from a location search string (`?active=...`)
pub fn parse_active(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").cloned()
}

/// `?active=key`
pub fn active_query(key: &str) -> String {
    let query = serde_qs::to_string(&HashMap::from([("active".to_string(), key.to_string())]))
        .unwrap_or_default();
    format!("?{}", query)
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<String>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(DEFAULT_TAB.to_string()),
        }
    }

    /// Restores the active tab from `?active=` and keeps the URL in sync afterwards.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        match parse_active(&search) {
            Some(key) if is_known_tab(&key) => self.activate_tab(&key),
            Some(key) => log::warn!("Unknown tab in URL: '{}'", key),
            None => {}
        }

        let this = *self;
        Effect::new(move |_| {
            let new_url = active_query(&this.active.get());

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            // Only update URL if it actually changed
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn activate_tab(&self, key: &str) {
        log::debug!("activate_tab: key='{}'", key);
        self.active.set(key.to_string());
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_round_trip() {
        assert_eq!(active_query("d402_installments"), "?active=d402_installments");
        assert_eq!(
            parse_active("?active=d402_installments").as_deref(),
            Some("d402_installments")
        );
        assert_eq!(parse_active(""), None);
        assert_eq!(parse_active("?other=1"), None);
    }
}

//! UI language store.
//!
//! The chosen locale lives in localStorage under `app-locale`. On the very first
//! visit it is detected from `navigator.language`.

use contracts::shared::i18n::{t, Locale};
use leptos::prelude::*;
use web_sys::window;

const LOCALE_STORAGE_KEY: &str = "app-locale";

fn load_locale() -> Locale {
    let stored = window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(LOCALE_STORAGE_KEY).ok().flatten())
        .and_then(|code| Locale::from_code(&code));

    stored.unwrap_or_else(|| {
        let detected = window()
            .and_then(|w| w.navigator().language())
            .map(|tag| Locale::detect(&tag))
            .unwrap_or_default();
        log::debug!("Locale detected from browser: {}", detected.as_str());
        detected
    })
}

fn save_locale(locale: Locale) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(LOCALE_STORAGE_KEY, locale.as_str());
    }
}

#[derive(Clone, Copy)]
pub struct LocaleContext {
    pub locale: RwSignal<Locale>,
}

impl LocaleContext {
    pub fn set_locale(&self, locale: Locale) {
        self.locale.set(locale);
        save_locale(locale);
        if let Some(html) = window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = html.set_attribute("lang", locale.as_str());
        }
    }

    /// Reactive translation of `key`
    pub fn tr(&self, key: &'static str) -> &'static str {
        t(self.locale.get(), key)
    }
}

#[component]
pub fn LocaleProvider(children: Children) -> impl IntoView {
    let ctx = LocaleContext {
        locale: RwSignal::new(load_locale()),
    };
    ctx.set_locale(ctx.locale.get_untracked());
    provide_context(ctx);

    children()
}

pub fn use_locale_context() -> LocaleContext {
    use_context::<LocaleContext>().expect("LocaleContext not found. Wrap your app with LocaleProvider.")
}

/// Current locale signal
pub fn use_locale() -> RwSignal<Locale> {
    use_locale_context().locale
}

/// Language dropdown for the header.
#[component]
pub fn LocaleSelect() -> impl IntoView {
    let ctx = use_locale_context();

    view! {
        <select
            class="locale-select"
            on:change=move |ev| {
                if let Some(locale) = Locale::from_code(&event_target_value(&ev)) {
                    ctx.set_locale(locale);
                }
            }
        >
            {Locale::all().into_iter().map(|locale| {
                view! {
                    <option
                        value=locale.as_str()
                        selected=move || ctx.locale.get() == locale
                    >
                        {locale.display_name()}
                    </option>
                }
            }).collect_view()}
        </select>
    }
}

use contracts::shared::i18n::t;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::registry::TABS;
use crate::shared::locale::{use_locale, LocaleSelect};
use crate::shared::theme::ThemeToggle;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let locale = use_locale();

    view! {
        <header data-zone="header" class="header">
            <div class="header__content">
                <span class="header__title">{move || t(locale.get(), "app.title")}</span>
                <nav class="header__tabs">
                    {TABS.iter().map(|tab| {
                        let key = tab.key;
                        let title_key = tab.title_key;
                        view! {
                            <button
                                class=move || if ctx.active.get() == key {
                                    "tab-button tab-button--active"
                                } else {
                                    "tab-button"
                                }
                                on:click=move |_| ctx.activate_tab(key)
                            >
                                {move || t(locale.get(), title_key)}
                            </button>
                        }
                    }).collect_view()}
                </nav>
                <div class="header__actions">
                    <LocaleSelect />
                    <ThemeToggle />
                </div>
            </div>
        </header>
    }
}

use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::registry::render_tab_content;

#[component]
pub fn Center() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <main data-zone="center" class="app-tabs">
            {move || render_tab_content(&tabs_store.active.get())}
        </main>
    }
}

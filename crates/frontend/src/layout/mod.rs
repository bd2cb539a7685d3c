pub mod center;
pub mod global_context;
pub mod header;
pub mod tabs;

use leptos::prelude::*;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |  Header (tabs, language, theme)          |
/// +------------------------------------------+
/// |  Active dashboard                        |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <div class="app-layout">
            <header::Header />
            <center::Center />
        </div>
    }
}

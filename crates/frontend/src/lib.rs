pub mod app;
pub mod dashboards;
pub mod layout;
pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;

/// Browser entry point: logging to the console, readable panics, then mount.
#[wasm_bindgen(start)]
pub fn start() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    _ = console_log::init_with_level(level);
    console_error_panic_hook::set_once();

    log::info!("Mounting dashboard app");
    leptos::mount::mount_to_body(app::App);
}

#![allow(warnings)]
//! Wukong Frontend Entry Point

mod models;
mod config;
mod storage;
mod timers;
mod theme;
mod tiles;
mod countdown;
mod cloud;
mod sync;
mod context;
mod store;
mod components;
mod app;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load();
    if let Err(e) = console_log::init_with_level(config.log_level()) {
        web_sys::console::error_1(&format!("[APP] Logger init failed: {}", e).into());
    }

    // The sign-in popup only hands its URL fragment back to the opener
    if cloud::is_auth_popup() {
        log::debug!("[APP] Sign-in popup, not mounting");
        return;
    }

    log::info!(
        "[APP] Starting, cloud sync {}",
        if config.is_cloud_configured() { "enabled" } else { "disabled" }
    );
    mount_to_body(move || view! { <App config=config /> });
}

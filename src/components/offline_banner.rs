//! Offline Banner Component
//!
//! Shown while the widget works from local data only. The last failure is
//! in the tooltip; "reconnect" reloads the page.

use leptos::prelude::*;
use two_tier_cache::SyncStatus;
use crate::context::use_app_context;

fn reload_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().reload() {
            log::warn!("[APP] Reload failed: {:?}", e);
        }
    }
}

#[component]
pub fn OfflineBanner() -> impl IntoView {
    let ctx = use_app_context();
    let status = ctx.sync_state.status;
    let last_error = ctx.sync_state.last_error;

    view! {
        <Show when=move || status.get() == SyncStatus::Offline>
            <div class="offline-banner" title=move || last_error.get().unwrap_or_default()>
                <span>"离线模式：修改仅保存在本机"</span>
                <button class="offline-retry" on:click=move |_| reload_page()>"重新连接"</button>
            </div>
        </Show>
    }
}

//! Sync Bar Component
//!
//! Sync status dot, current user and the Google sign-in / sign-out action.

use leptos::prelude::*;
use two_tier_cache::SyncStatus;
use crate::context::use_app_context;

fn status_label(status: SyncStatus) -> &'static str {
    match status {
        SyncStatus::Loading => "连接中",
        SyncStatus::Online => "已同步",
        SyncStatus::Offline => "离线",
    }
}

#[component]
pub fn SyncBar() -> impl IntoView {
    let ctx = use_app_context();
    let status = ctx.sync_state.status;
    let user = ctx.sync_state.user;

    let dot_class = move || format!("sync-dot {}", status.get().as_str());

    view! {
        <div class="sync-bar">
            <span class=dot_class></span>
            <span class="sync-label">{move || status_label(status.get())}</span>
            {move || match user.get() {
                Some(profile) if !profile.is_anonymous => view! {
                    <span class="sync-user">{profile.label()}</span>
                    <button class="sync-btn" on:click=move |_| ctx.sign_out()>"退出登录"</button>
                }.into_any(),
                _ => view! {
                    <button class="sync-btn" on:click=move |_| ctx.sign_in()>"Google 登录"</button>
                }.into_any(),
            }}
        </div>
    }
}

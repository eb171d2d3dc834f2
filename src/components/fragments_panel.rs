//! Time Fragments Panel
//!
//! Topic and date inputs, the derived day counts and a progress bar.
//! Every edit goes through `AppContext::update_settings`.

use leptos::prelude::*;
use crate::components::{OfflineBanner, SyncBar};
use crate::context::use_app_context;
use crate::countdown::{day_stats, format_date_input, parse_date_input};

#[component]
pub fn FragmentsPanel() -> impl IntoView {
    let ctx = use_app_context();
    let settings = ctx.sync_state.settings;

    let stats = Memo::new(move |_| {
        let s = settings.get();
        day_stats(s.start_date, s.target_date, ctx.today.get())
    });

    let on_topic = move |ev: web_sys::Event| {
        let topic = event_target_value(&ev);
        ctx.update_settings(move |s| s.topic = topic);
    };
    // Cleared or half-typed dates keep the previous value
    let on_start = move |ev: web_sys::Event| {
        if let Some(date) = parse_date_input(&event_target_value(&ev)) {
            ctx.update_settings(move |s| s.start_date = date);
        }
    };
    let on_target = move |ev: web_sys::Event| {
        if let Some(date) = parse_date_input(&event_target_value(&ev)) {
            ctx.update_settings(move |s| s.target_date = date);
        }
    };

    let progress_style = move || format!("width: {:.1}%", stats.get().progress_percent());

    view! {
        <section class="fragments">
            <SyncBar />
            <OfflineBanner />

            <input
                class="fragments-topic"
                type="text"
                placeholder="主题"
                prop:value=move || settings.get().topic
                on:input=on_topic
            />

            <div class="fragments-dates">
                <label>
                    <span>"开始日期"</span>
                    <input
                        type="date"
                        prop:value=move || format_date_input(settings.get().start_date)
                        on:change=on_start
                    />
                </label>
                <label>
                    <span>"目标日期"</span>
                    <input
                        type="date"
                        prop:value=move || format_date_input(settings.get().target_date)
                        on:change=on_target
                    />
                </label>
            </div>

            <div class="fragments-stats">
                <div class="stat">
                    <span class="stat-value">{move || stats.get().total_days}</span>
                    <span class="stat-label">"总天数"</span>
                </div>
                <div class="stat">
                    <span class="stat-value">{move || stats.get().passed_days}</span>
                    <span class="stat-label">"已过"</span>
                </div>
                <div class="stat">
                    <span class="stat-value">{move || stats.get().remaining_days}</span>
                    <span class="stat-label">"剩余"</span>
                </div>
            </div>

            <div class="progress">
                <div class="progress-fill" style=progress_style></div>
            </div>
        </section>
    }
}

//! Wukong Frontend App
//!
//! Top bar with view tabs and theme buttons, then the launcher or the Time
//! Fragments widget.

use leptos::prelude::*;
use reactive_stores::Store;
use wasm_bindgen::JsValue;

use crate::components::{FragmentsPanel, Launcher, ThemeSwitcher, ViewNav};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::countdown;
use crate::storage::BrowserStorage;
use crate::store::{store_set_view, LauncherState, LauncherStateStoreFields, View};
use crate::sync::FragmentsSync;
use crate::theme;
use crate::timers;

/// How often the day counter checks for a new calendar day
const TODAY_TICK_MS: u32 = 60_000;

fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// Mirror the view in the address bar. A pending OAuth response is left
/// alone; the redirect handler rewrites it once consumed.
fn write_view_hash(view: View) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let hash = location.hash().unwrap_or_default();
    if hash == view.hash() || hash.contains("id_token=") || hash.contains("error=") {
        return;
    }
    let url = format!(
        "{}{}{}",
        location.pathname().unwrap_or_default(),
        location.search().unwrap_or_default(),
        view.hash()
    );
    if let Ok(history) = window.history() {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&url));
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // Launcher state
    let store = Store::new(LauncherState::new(
        theme::load_theme(&BrowserStorage),
        View::from_hash(&current_hash()),
    ));
    provide_context(store);

    // Time Fragments: local values render now, sign-in runs in the background
    let (today, set_today) = signal(countdown::today());
    let sync = FragmentsSync::new(config);
    let sync_state = sync.signals();
    provide_context(AppContext::new(sync.clone(), sync_state, today));
    sync.start(sync_state);

    timers::every(TODAY_TICK_MS, move || {
        let now = countdown::today();
        if now != today.get_untracked() {
            log::debug!("[APP] Date rolled over to {}", now);
            set_today.set(now);
        }
    });

    // Apply and persist the theme
    Effect::new(move |_| {
        let selected = store.theme().get();
        theme::apply_theme(selected);
        theme::save_theme(&BrowserStorage, selected);
    });

    Effect::new(move |_| write_view_hash(store.view().get()));

    // Back/forward buttons
    let _ = window_event_listener(leptos::ev::hashchange, move |_| {
        store_set_view(store, View::from_hash(&current_hash()));
    });

    view! {
        <div class="app-layout">
            <header class="top-bar">
                <ViewNav />
                <ThemeSwitcher />
            </header>

            <main class="main-content">
                {move || match store.view().get() {
                    View::Launcher => view! { <Launcher /> }.into_any(),
                    View::Fragments => view! { <FragmentsPanel /> }.into_any(),
                }}
            </main>
        </div>
    }
}

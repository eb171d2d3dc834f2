//! View Navigation Component

use leptos::prelude::*;
use crate::store::{store_set_view, use_launcher_store, LauncherStateStoreFields, View};

#[component]
pub fn ViewNav() -> impl IntoView {
    let store = use_launcher_store();
    let tab = move |target: View, label: &'static str| {
        let class = move || {
            if store.view().get() == target { "view-tab active" } else { "view-tab" }
        };
        view! {
            <button class=class on:click=move |_| store_set_view(store, target)>
                {label}
            </button>
        }
    };

    view! {
        <nav class="view-nav">
            {tab(View::Launcher, "应用")}
            {tab(View::Fragments, "时间碎片")}
        </nav>
    }
}

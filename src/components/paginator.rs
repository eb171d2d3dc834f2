//! Paginator Component

use leptos::prelude::*;
use crate::store::{store_change_page, use_launcher_store, LauncherStateStoreFields};
use crate::tiles::{page_count, TILES_PER_PAGE, TOTAL_TILES};

/// One button per page
#[component]
pub fn Paginator() -> impl IntoView {
    let store = use_launcher_store();
    let pages = page_count(TOTAL_TILES as usize, TILES_PER_PAGE);

    view! {
        <nav class="paginator">
            {(1..=pages).map(move |num| {
                let class = move || {
                    if store.page().get() == num { "page-btn active" } else { "page-btn" }
                };
                view! {
                    <button class=class on:click=move |_| store_change_page(store, num)>
                        {num}
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}

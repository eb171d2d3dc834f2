//! Launcher Component
//!
//! Title, tile grid and paginator.

use leptos::prelude::*;
use crate::components::{Paginator, TileGrid};

#[component]
pub fn Launcher() -> impl IntoView {
    view! {
        <section class="launcher">
            <header class="launcher-header">
                <h1>"WUKONG.LOL"</h1>
            </header>
            <TileGrid />
            <Paginator />
        </section>
    }
}

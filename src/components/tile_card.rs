//! Tile Card Component
//!
//! One launcher cell. Linked tiles open in a new tab; placeholders are inert.

use leptos::prelude::*;
use crate::components::IconView;
use crate::models::Tile;

#[component]
pub fn TileCard(tile: Tile) -> impl IntoView {
    let body = view! {
        <div class="tile-icon">
            <IconView icon=tile.icon />
        </div>
        <span class="tile-name">{tile.name.clone()}</span>
    };

    match tile.link {
        Some(href) => view! {
            <a class="tile tile-link" href=href target="_blank" rel="noopener noreferrer">
                {body}
            </a>
        }.into_any(),
        None => view! { <div class="tile">{body}</div> }.into_any(),
    }
}

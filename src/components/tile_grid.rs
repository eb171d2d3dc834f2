//! Tile Grid Component
//!
//! Current page of the catalog, faded out while a page switch is pending.

use leptos::prelude::*;
use crate::components::TileCard;
use crate::store::{use_launcher_store, LauncherStateStoreFields};
use crate::tiles::{page_slice, tile_catalog, TILES_PER_PAGE, TOTAL_TILES};

#[component]
pub fn TileGrid() -> impl IntoView {
    let store = use_launcher_store();
    let catalog = StoredValue::new(tile_catalog(TOTAL_TILES));

    let current_tiles = move || {
        let page = store.page().get();
        catalog.with_value(|tiles| page_slice(tiles, page, TILES_PER_PAGE).to_vec())
    };
    let grid_class = move || {
        if store.fading().get() { "tile-grid fading" } else { "tile-grid" }
    };

    view! {
        <div class="tile-area">
            <div class=grid_class>
                <For
                    each=current_tiles
                    key=|tile| tile.id
                    children=|tile| view! { <TileCard tile=tile /> }
                />
            </div>
        </div>
    }
}

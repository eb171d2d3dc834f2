//! Theme Switcher Component
//!
//! Buttons for the four palettes. Applying and persisting the choice is
//! handled by an effect in `App`.

use leptos::prelude::*;
use crate::store::{store_set_theme, use_launcher_store, LauncherStateStoreFields};
use crate::theme::Theme;

#[component]
pub fn ThemeSwitcher() -> impl IntoView {
    let store = use_launcher_store();

    view! {
        <div class="theme-switcher">
            {Theme::ALL.into_iter().map(move |theme| {
                let class = move || {
                    if store.theme().get() == theme { "theme-btn active" } else { "theme-btn" }
                };
                view! {
                    <button class=class title=theme.key() on:click=move |_| store_set_theme(store, theme)>
                        {theme.label()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}

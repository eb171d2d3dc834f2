//! Icon Component
//!
//! Line icons drawn on a 24x24 grid in the current text colour.

use leptos::prelude::*;
use crate::models::Icon;

#[component]
pub fn IconView(icon: Icon) -> impl IntoView {
    let shape = match icon {
        Icon::Hourglass => view! {
            <path d="M5 2h14M5 22h14M15 2H9c0 4 2 6 5 8.5s5 4.5 5 8.5v3H5v-3c0-4 2-6 5-8.5S9 6 9 2" />
        }.into_any(),
        Icon::Timer => view! {
            <path d="M10 2h4M12 14v-4M4 13a8 8 0 0 1 8-7 8 8 0 1 1-5.3 14L4 17.6" />
        }.into_any(),
        Icon::Circle => view! { <circle cx="12" cy="12" r="9" /> }.into_any(),
        Icon::Square => view! { <rect x="4" y="4" width="16" height="16" rx="1" /> }.into_any(),
        Icon::Triangle => view! { <path d="M12 3L4 21h16L12 3z" /> }.into_any(),
        Icon::Hexagon => view! { <path d="M12 3l8 4.5v9l-8 4.5-8-4.5v-9L12 3z" /> }.into_any(),
        Icon::Command => view! {
            <path d="M18 3a3 3 0 0 0-3 3v12a3 3 0 0 0 3 3 3 3 0 0 0 3-3 3 3 0 0 0-3-3H6a3 3 0 0 0-3 3 3 3 0 0 0 3 3 3 3 0 0 0 3-3V6a3 3 0 0 0-3-3 3 3 0 0 0-3 3 3 3 0 0 0 3 3h12a3 3 0 0 0 3-3 3 3 0 0 0-3-3z" />
        }.into_any(),
    };

    view! {
        <svg
            class="icon"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="1.2"
            stroke-linecap="round"
            stroke-linejoin="round"
        >
            {shape}
        </svg>
    }
}

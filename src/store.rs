//! Launcher State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::theme::Theme;
use crate::timers;

/// Length of the fade-out before a page switch
pub const PAGE_FADE_MS: u32 = 150;

/// Which screen is showing; mirrored in the URL hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Launcher,
    Fragments,
}

impl View {
    /// A Google redirect lands with `#id_token=...` (or `#error=...`); it was
    /// started from the Time Fragments view, so it maps back there.
    pub fn from_hash(hash: &str) -> Self {
        let hash = hash.trim_start_matches('#');
        if hash == "fragments" || hash.contains("id_token=") || hash.contains("error=") {
            View::Fragments
        } else {
            View::Launcher
        }
    }

    pub fn hash(self) -> &'static str {
        match self {
            View::Launcher => "",
            View::Fragments => "#fragments",
        }
    }
}

/// Launcher UI state with field-level reactivity
#[derive(Clone, Debug, Store)]
pub struct LauncherState {
    pub theme: Theme,
    /// 1-based
    pub page: usize,
    /// True during the fade-out before `page` changes
    pub fading: bool,
    pub view: View,
}

impl LauncherState {
    pub fn new(theme: Theme, view: View) -> Self {
        Self {
            theme,
            page: 1,
            fading: false,
            view,
        }
    }
}

pub type LauncherStore = Store<LauncherState>;

pub fn use_launcher_store() -> LauncherStore {
    expect_context::<LauncherStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Fade the grid out, swap the page, fade back in. Same page is a no-op.
pub fn store_change_page(store: LauncherStore, page: usize) {
    if store.page().get_untracked() == page {
        return;
    }
    *store.fading().write() = true;
    spawn_local(async move {
        timers::sleep_ms(PAGE_FADE_MS).await;
        *store.page().write() = page;
        *store.fading().write() = false;
    });
}

pub fn store_set_theme(store: LauncherStore, theme: Theme) {
    if store.theme().get_untracked() != theme {
        *store.theme().write() = theme;
    }
}

pub fn store_set_view(store: LauncherStore, view: View) {
    if store.view().get_untracked() != view {
        *store.view().write() = view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_from_hash() {
        assert_eq!(View::from_hash(""), View::Launcher);
        assert_eq!(View::from_hash("#"), View::Launcher);
        assert_eq!(View::from_hash("#fragments"), View::Fragments);
        assert_eq!(View::from_hash("#somewhere-else"), View::Launcher);
    }

    #[test]
    fn test_oauth_redirect_lands_on_fragments() {
        assert_eq!(View::from_hash("#state=abc&id_token=eyJ"), View::Fragments);
        assert_eq!(View::from_hash("#error=access_denied"), View::Fragments);
    }

    #[test]
    fn test_view_hash_round_trip() {
        for view in [View::Launcher, View::Fragments] {
            assert_eq!(View::from_hash(view.hash()), view);
        }
    }

    #[test]
    fn test_launcher_state_starts_on_first_page() {
        let state = LauncherState::new(Theme::Cyber, View::Fragments);
        assert_eq!(state.page, 1);
        assert!(!state.fading);
        assert_eq!(state.theme, Theme::Cyber);
    }
}

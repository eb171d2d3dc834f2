//! Themes
//!
//! Named palettes, their CSS variables and persistence of the selection.

use two_tier_cache::KeyValueStore;
use wasm_bindgen::JsCast;

use crate::storage::THEME_KEY;

/// Colours of one palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: &'static str,
    pub text: &'static str,
    pub box_bg: &'static str,
    pub border: &'static str,
    pub dim: &'static str,
    pub accent: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Gold,
    Dark,
    Light,
    Cyber,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Gold, Theme::Dark, Theme::Light, Theme::Cyber];

    /// Stable key, used for persistence
    pub fn key(self) -> &'static str {
        match self {
            Theme::Gold => "gold",
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Cyber => "cyber",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Gold => "大圣",
            Theme::Dark => "深邃",
            Theme::Light => "纯白",
            Theme::Cyber => "霓虹",
        }
    }

    /// Only members of [`Theme::ALL`] are accepted
    pub fn from_key(key: &str) -> Option<Theme> {
        Theme::ALL.into_iter().find(|t| t.key() == key)
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Gold => Palette {
                bg: "#1a1612",
                text: "#e2d5bc",
                box_bg: "#25201a",
                border: "#3d352a",
                dim: "#8c7e6a",
                accent: "#d4af37",
            },
            Theme::Dark => Palette {
                bg: "#0a0a0a",
                text: "#ffffff",
                box_bg: "#111",
                border: "#222",
                dim: "#555",
                accent: "#ff3e00",
            },
            Theme::Light => Palette {
                bg: "#f5f5f7",
                text: "#1d1d1f",
                box_bg: "#ffffff",
                border: "#e0e0e0",
                dim: "#86868b",
                accent: "#0071e3",
            },
            Theme::Cyber => Palette {
                bg: "#050505",
                text: "#00ffcc",
                box_bg: "#0d0d0d",
                border: "#1a1a1a",
                dim: "#006655",
                accent: "#ff00ff",
            },
        }
    }

    /// CSS custom properties set on the document root
    pub fn css_variables(self) -> [(&'static str, &'static str); 5] {
        let p = self.palette();
        [
            ("--box-bg", p.box_bg),
            ("--box-border", p.border),
            ("--text-main", p.text),
            ("--text-dim", p.dim),
            ("--accent", p.accent),
        ]
    }
}

/// Persisted theme, or the default when missing or unknown
pub fn load_theme(store: &impl KeyValueStore) -> Theme {
    store
        .get(THEME_KEY)
        .and_then(|key| Theme::from_key(&key))
        .unwrap_or_default()
}

pub fn save_theme(store: &impl KeyValueStore, theme: Theme) {
    if let Err(e) = store.set(THEME_KEY, theme.key()) {
        log::warn!("[THEME] Could not persist theme: {}", e);
    }
}

/// Push the palette into `body` colours and root CSS variables
pub fn apply_theme(theme: Theme) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let palette = theme.palette();

    if let Some(body) = document.body() {
        let style = body.style();
        let _ = style.set_property("background-color", palette.bg);
        let _ = style.set_property("color", palette.text);
        let _ = style.set_property("transition", "background-color 0.5s ease, color 0.5s ease");
    }

    if let Some(root) = document
        .document_element()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let style = root.style();
        for (name, value) in theme.css_variables() {
            let _ = style.set_property(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use two_tier_cache::MemoryStore;

    #[test]
    fn test_keys_round_trip_through_membership_check() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_key(theme.key()), Some(theme));
        }
        assert_eq!(Theme::from_key("GOLD"), None);
        assert_eq!(Theme::from_key("sepia"), None);
    }

    #[test]
    fn test_theme_survives_simulated_reload() {
        let store = MemoryStore::new();
        assert_eq!(load_theme(&store), Theme::Gold);

        save_theme(&store, Theme::Light);
        save_theme(&store, Theme::Cyber);

        let reloaded = store.clone();
        assert_eq!(load_theme(&reloaded), Theme::Cyber);
    }

    #[test]
    fn test_unknown_persisted_value_falls_back_to_default() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "neon-pink").unwrap();
        assert_eq!(load_theme(&store), Theme::Gold);
    }

    #[test]
    fn test_css_variables_follow_palette() {
        let vars = Theme::Dark.css_variables();
        assert!(vars.contains(&("--accent", "#ff3e00")));
        assert!(vars.contains(&("--box-bg", "#111")));
    }
}

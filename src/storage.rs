//! Browser Storage
//!
//! `localStorage`-backed key-value store and the keys this app uses.

use two_tier_cache::{CacheError, CacheResult, KeyValueStore};

/// Time Fragments settings payload (JSON)
pub const SETTINGS_KEY: &str = "wukong.time-fragments.settings";
/// Selected theme key
pub const THEME_KEY: &str = "wukong.theme";
/// Persisted auth session (JSON)
pub const SESSION_KEY: &str = "wukong.auth.session";
/// OAuth state of an in-flight redirect sign-in
pub const PENDING_OAUTH_KEY: &str = "wukong.auth.pending";

/// `window.localStorage`. Every operation is a no-op when storage is
/// unavailable (private mode, disabled cookies).
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        let storage = Self::storage()
            .ok_or_else(|| CacheError::Storage("localStorage unavailable".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| CacheError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

//! Application Configuration
//!
//! Layered: built-in defaults, then compile-time environment variables,
//! then an optional `window.WUKONG_CONFIG` object set by the hosting page.

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use two_tier_cache::CacheConfig;
use wasm_bindgen::JsValue;

/// Name of the optional runtime config global
const RUNTIME_CONFIG_GLOBAL: &str = "WUKONG_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub firebase_api_key: Option<String>,
    pub firebase_project_id: Option<String>,
    /// OAuth client used for interactive Google sign-in
    pub google_client_id: Option<String>,
    pub connect_timeout_ms: u64,
    pub debounce_ms: u64,
    pub poll_interval_ms: u64,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            firebase_api_key: None,
            firebase_project_id: None,
            google_client_id: None,
            connect_timeout_ms: 3500,
            debounce_ms: 1000,
            poll_interval_ms: 15_000,
            log_level: "info".to_string(),
        }
    }
}

/// One configuration layer; unset fields leave the value below untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigLayer {
    pub firebase_api_key: Option<String>,
    pub firebase_project_id: Option<String>,
    pub google_client_id: Option<String>,
    pub connect_timeout_ms: Option<u64>,
    pub debounce_ms: Option<u64>,
    pub poll_interval_ms: Option<u64>,
    pub log_level: Option<String>,
}

impl ConfigLayer {
    /// Values baked in at build time (`WUKONG_*` variables)
    pub fn from_build_env() -> Self {
        Self {
            firebase_api_key: option_env!("WUKONG_FIREBASE_API_KEY").map(str::to_string),
            firebase_project_id: option_env!("WUKONG_FIREBASE_PROJECT_ID").map(str::to_string),
            google_client_id: option_env!("WUKONG_GOOGLE_CLIENT_ID").map(str::to_string),
            log_level: option_env!("WUKONG_LOG_LEVEL").map(str::to_string),
            ..Self::default()
        }
    }

    /// `window.WUKONG_CONFIG`, if the page defines it
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(RUNTIME_CONFIG_GLOBAL)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        match serde_wasm_bindgen::from_value(value) {
            Ok(layer) => Some(layer),
            Err(e) => {
                log::warn!("[CONFIG] Ignoring malformed {}: {}", RUNTIME_CONFIG_GLOBAL, e);
                None
            }
        }
    }
}

impl AppConfig {
    /// Defaults, then build-time env, then the runtime global
    pub fn load() -> Self {
        let mut config = Self::default().merged(ConfigLayer::from_build_env());
        if let Some(layer) = ConfigLayer::from_window() {
            config = config.merged(layer);
        }
        config
    }

    pub fn merged(mut self, layer: ConfigLayer) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        if let Some(v) = non_empty(layer.firebase_api_key) {
            self.firebase_api_key = Some(v);
        }
        if let Some(v) = non_empty(layer.firebase_project_id) {
            self.firebase_project_id = Some(v);
        }
        if let Some(v) = non_empty(layer.google_client_id) {
            self.google_client_id = Some(v);
        }
        if let Some(v) = layer.connect_timeout_ms {
            self.connect_timeout_ms = v;
        }
        if let Some(v) = layer.debounce_ms {
            self.debounce_ms = v;
        }
        if let Some(v) = layer.poll_interval_ms {
            self.poll_interval_ms = v;
        }
        if let Some(v) = non_empty(layer.log_level) {
            self.log_level = v;
        }
        self
    }

    /// Cloud sync needs both an API key and a project
    pub fn is_cloud_configured(&self) -> bool {
        self.firebase_api_key.is_some() && self.firebase_project_id.is_some()
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            debounce: Duration::from_millis(self.debounce_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    pub fn log_level(&self) -> log::Level {
        log::Level::from_str(&self.log_level).unwrap_or(log::Level::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_sync_timings() {
        let config = AppConfig::default();
        let cache = config.cache_config();
        assert_eq!(cache.connect_timeout, Duration::from_millis(3500));
        assert_eq!(cache.debounce, Duration::from_millis(1000));
        assert!(!config.is_cloud_configured());
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn test_later_layer_overrides_earlier() {
        let build: ConfigLayer = serde_json::from_str(
            r#"{"firebaseApiKey": "build-key", "firebaseProjectId": "wukong", "logLevel": "debug"}"#,
        )
        .unwrap();
        let runtime: ConfigLayer =
            serde_json::from_str(r#"{"firebaseApiKey": "runtime-key", "debounceMs": 250}"#).unwrap();

        let config = AppConfig::default().merged(build).merged(runtime);

        assert_eq!(config.firebase_api_key.as_deref(), Some("runtime-key"));
        assert_eq!(config.firebase_project_id.as_deref(), Some("wukong"));
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.connect_timeout_ms, 3500);
        assert_eq!(config.log_level(), log::Level::Debug);
        assert!(config.is_cloud_configured());
    }

    #[test]
    fn test_blank_values_do_not_override() {
        let layer = ConfigLayer {
            firebase_api_key: Some("  ".to_string()),
            log_level: Some(String::new()),
            ..ConfigLayer::default()
        };
        let config = AppConfig::default().merged(layer);
        assert_eq!(config.firebase_api_key, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let config = AppConfig {
            log_level: "chatty".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.log_level(), log::Level::Info);
    }
}

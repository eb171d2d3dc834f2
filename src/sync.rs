//! Settings Sync
//!
//! Binds the Time Fragments settings cache to Firebase sign-in and to the
//! Leptos signals the widget renders from.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use two_tier_cache::{CacheError, JsonSlot, LocalTier, RemoteTier, Sleeper, SyncStatus, TwoTierCache};

use crate::cloud::{self, CloudError, CloudResult, FirebaseAuth, FirestoreRemote, InteractiveOutcome};
use crate::config::AppConfig;
use crate::countdown;
use crate::models::{Settings, UserProfile};
use crate::storage::{BrowserStorage, SETTINGS_KEY};
use crate::timers::BrowserSleeper;

pub type SettingsCache =
    TwoTierCache<Settings, JsonSlot<BrowserStorage, Settings>, FirestoreRemote, BrowserSleeper>;

/// Reactive mirror of the cache, written only by [`FragmentsSync`]
#[derive(Clone, Copy)]
pub struct SyncSignals {
    pub settings: RwSignal<Settings>,
    pub status: RwSignal<SyncStatus>,
    pub last_error: RwSignal<Option<String>>,
    pub user: RwSignal<Option<UserProfile>>,
}

/// Client handles for the Time Fragments widget. Created once in `App`.
pub struct FragmentsSync {
    config: AppConfig,
    auth: Rc<FirebaseAuth>,
    cache: SettingsCache,
}

impl FragmentsSync {
    pub fn new(config: AppConfig) -> Rc<Self> {
        let api_key = config.firebase_api_key.clone().unwrap_or_default();
        let project_id = config.firebase_project_id.clone().unwrap_or_default();

        let auth = Rc::new(FirebaseAuth::new(api_key, BrowserStorage));
        let remote = FirestoreRemote::new(project_id, auth.clone());
        let local = JsonSlot::new(BrowserStorage, SETTINGS_KEY);
        let cache = TwoTierCache::open(
            local,
            remote,
            BrowserSleeper,
            config.cache_config(),
            Settings::defaults_for(countdown::today()),
        );

        Rc::new(Self { config, auth, cache })
    }

    /// Fresh signals seeded from the cache's current state
    pub fn signals(&self) -> SyncSignals {
        SyncSignals {
            settings: RwSignal::new(self.cache.current()),
            status: RwSignal::new(self.cache.status()),
            last_error: RwSignal::new(self.cache.last_error()),
            user: RwSignal::new(self.auth.current_user()),
        }
    }

    /// Subscribe to auth changes and run the load-time connect
    pub fn start(self: &Rc<Self>, signals: SyncSignals) {
        self.auth
            .on_auth_state_changed(move |user| signals.user.set(user.cloned()));
        self.connect(signals, false);
    }

    /// Local edit: the signal and the local tier update now, the remote
    /// write follows after the debounce window
    pub fn edit(self: &Rc<Self>, signals: SyncSignals, settings: Settings) {
        signals.settings.set(settings.clone());
        let ticket = self.cache.edit(settings);
        let sync = self.clone();
        spawn_local(async move {
            // Failures are logged by the cache; status is left as is
            let _ = sync.cache.flush(ticket).await;
        });
    }

    /// Google sign-in from the account bar. A popup result reconnects
    /// straight away; a redirect finishes on the next page load.
    pub fn sign_in_with_google(self: &Rc<Self>, signals: SyncSignals) {
        let client_id = match (&self.config.google_client_id, self.config.is_cloud_configured()) {
            (Some(id), true) => id.clone(),
            _ => {
                warn!("[SYNC] Google sign-in is not configured");
                signals.last_error.set(Some(CloudError::NotConfigured.to_string()));
                return;
            }
        };

        let sync = self.clone();
        spawn_local(async move {
            match cloud::run_interactive_sign_in(&sync.auth, &client_id).await {
                Ok(InteractiveOutcome::SignedIn(profile)) => {
                    info!("[SYNC] Signed in as {}", profile.label());
                    sync.connect(signals, true);
                }
                Ok(InteractiveOutcome::Redirecting) => {}
                Err(e) => {
                    warn!("[SYNC] Google sign-in failed: {}", e);
                    signals.last_error.set(Some(e.to_string()));
                }
            }
        });
    }

    /// Drop the session and keep working from the local tier
    pub fn sign_out(&self, signals: SyncSignals) {
        self.auth.sign_out();
        self.cache.go_offline(CacheError::SignedOut);
        publish(&self.cache, signals);
    }

    fn connect(self: &Rc<Self>, signals: SyncSignals, signed_in: bool) {
        let sync = self.clone();
        spawn_local(async move {
            signals.status.set(SyncStatus::Loading);
            let status = if signed_in {
                sync.cache.connect(async { Ok::<(), CloudError>(()) }).await
            } else {
                sync.cache.connect(sign_in_on_load(&sync.config, &sync.auth)).await
            };
            publish(&sync.cache, signals);

            if status.is_online() {
                sync.cache
                    .watch(|value| signals.settings.set(value.clone()))
                    .await;
                // The watch ends on sign-out, reconnect or a failed read
                publish(&sync.cache, signals);
            }
        });
    }
}

/// Pending redirect result first, then the saved session, then a new
/// anonymous account
async fn sign_in_on_load(config: &AppConfig, auth: &FirebaseAuth) -> CloudResult<()> {
    if !config.is_cloud_configured() {
        return Err(CloudError::NotConfigured);
    }
    if cloud::take_redirect_result(auth).await?.is_some() {
        return Ok(());
    }
    auth.restore_or_sign_in_anonymously().await.map(|_| ())
}

/// Copy the cache state into the signals
fn publish<L, R, S>(cache: &TwoTierCache<Settings, L, R, S>, signals: SyncSignals)
where
    L: LocalTier<Settings>,
    R: RemoteTier<Settings>,
    S: Sleeper,
{
    signals.status.set(cache.status());
    signals.last_error.set(cache.last_error());
    let current = cache.current();
    if signals.settings.get_untracked() != current {
        signals.settings.set(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use futures::executor::block_on;
    use futures::future::{self, FutureExt, LocalBoxFuture};
    use std::time::Duration;
    use two_tier_cache::{CacheResult, MemoryStore};

    struct Instant;

    impl Sleeper for Instant {
        fn sleep(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
            future::ready(()).boxed_local()
        }
    }

    /// Remote tier holding one document
    struct Document(Option<Settings>);

    #[async_trait(?Send)]
    impl RemoteTier<Settings> for Document {
        async fn fetch(&self) -> CacheResult<Option<Settings>> {
            Ok(self.0.clone())
        }

        async fn write(&self, _value: &Settings) -> CacheResult<()> {
            Ok(())
        }
    }

    type TestCache = TwoTierCache<Settings, JsonSlot<MemoryStore, Settings>, Document, Instant>;

    fn settings(topic: &str) -> Settings {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        Settings {
            topic: topic.to_string(),
            start_date: start,
            target_date: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
        }
    }

    fn cache(remote: Option<Settings>) -> TestCache {
        TwoTierCache::open(
            JsonSlot::new(MemoryStore::new(), SETTINGS_KEY),
            Document(remote),
            Instant,
            AppConfig::default().cache_config(),
            settings("今年"),
        )
    }

    fn signals_for(cache: &TestCache) -> SyncSignals {
        SyncSignals {
            settings: RwSignal::new(cache.current()),
            status: RwSignal::new(cache.status()),
            last_error: RwSignal::new(cache.last_error()),
            user: RwSignal::new(None),
        }
    }

    #[test]
    fn test_unconfigured_cloud_fails_sign_in_without_network() {
        let auth = FirebaseAuth::new("", BrowserStorage);
        let result = block_on(sign_in_on_load(&AppConfig::default(), &auth));
        assert!(matches!(result, Err(CloudError::NotConfigured)));
    }

    #[test]
    fn test_unconfigured_cloud_connects_offline() {
        let owner = Owner::new();
        owner.with(|| {
            let cache = cache(Some(settings("remote")));
            let signals = signals_for(&cache);
            let auth = FirebaseAuth::new("", BrowserStorage);

            block_on(cache.connect(sign_in_on_load(&AppConfig::default(), &auth)));
            publish(&cache, signals);

            assert_eq!(signals.status.get_untracked(), SyncStatus::Offline);
            assert_eq!(
                signals.last_error.get_untracked().as_deref(),
                Some("Sign-in failed: Cloud sync is not configured")
            );
            assert_eq!(signals.settings.get_untracked().topic, "今年");
        });
    }

    #[test]
    fn test_publish_mirrors_remote_value_and_sign_out() {
        let owner = Owner::new();
        owner.with(|| {
            let cache = cache(Some(settings("考研")));
            let signals = signals_for(&cache);

            block_on(cache.connect(future::ready(Ok::<(), CloudError>(()))));
            publish(&cache, signals);
            assert_eq!(signals.status.get_untracked(), SyncStatus::Online);
            assert_eq!(signals.settings.get_untracked().topic, "考研");

            cache.go_offline(CacheError::SignedOut);
            publish(&cache, signals);
            assert_eq!(signals.status.get_untracked(), SyncStatus::Offline);
            assert_eq!(signals.last_error.get_untracked().as_deref(), Some("Signed out"));
            assert_eq!(signals.settings.get_untracked().topic, "考研");
        });
    }
}

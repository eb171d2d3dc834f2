//! Two-Tier Cache Core
//!
//! State machine: `Loading -> Online | Offline`, with any failed remote
//! read moving back to `Offline`. Remote write failures are logged only.

use std::cell::{Cell, RefCell};
use std::fmt::Display;
use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures_util::future::{select, Either};
use log::{debug, info, warn};

use crate::error::{CacheError, CacheResult};
use crate::status::SyncStatus;
use crate::traits::{LocalTier, RemoteTier, Sleeper};

/// Timing knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long sign-in may take before falling back to offline mode
    pub connect_timeout: Duration,
    /// Quiet period after the last edit before the remote write
    pub debounce: Duration,
    /// Interval between remote reads while watching
    pub poll_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_millis(3500),
            debounce: Duration::from_millis(1000),
            poll_interval: Duration::from_millis(15_000),
        }
    }
}

/// Handle for one edit, passed back to [`TwoTierCache::flush`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// What happened to a debounced remote write
#[derive(Debug, Clone, PartialEq)]
pub enum FlushOutcome {
    /// The value reached the remote tier
    Written,
    /// A later edit arrived during the quiet period
    Superseded,
    /// Not online; the local tier already holds the value
    Skipped,
    /// The remote write failed and was dropped
    Failed(CacheError),
}

/// Value cached in memory, in a local tier and in a remote tier
pub struct TwoTierCache<T, L, R, S> {
    local: L,
    remote: R,
    sleeper: S,
    config: CacheConfig,
    current: RefCell<T>,
    /// Last value read from or written to the remote tier
    synced: RefCell<Option<T>>,
    status: Cell<SyncStatus>,
    /// Latest edit
    generation: Cell<u64>,
    /// Latest edit whose remote write has been attempted
    settled: Cell<u64>,
    watch_epoch: Cell<u64>,
    last_error: RefCell<Option<String>>,
}

impl<T, L, R, S> TwoTierCache<T, L, R, S>
where
    T: Clone + PartialEq,
    L: LocalTier<T>,
    R: RemoteTier<T>,
    S: Sleeper,
{
    /// Open the cache, reading the local tier synchronously.
    ///
    /// A missing or malformed local entry leaves `fallback` in place.
    pub fn open(local: L, remote: R, sleeper: S, config: CacheConfig, fallback: T) -> Self {
        let current = match local.load() {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(err) => {
                warn!("[CACHE] Ignoring local entry: {}", err);
                fallback
            }
        };

        Self {
            local,
            remote,
            sleeper,
            config,
            current: RefCell::new(current),
            synced: RefCell::new(None),
            status: Cell::new(SyncStatus::Loading),
            generation: Cell::new(0),
            settled: Cell::new(0),
            watch_epoch: Cell::new(0),
            last_error: RefCell::new(None),
        }
    }

    pub fn current(&self) -> T {
        self.current.borrow().clone()
    }

    pub fn status(&self) -> SyncStatus {
        self.status.get()
    }

    /// Reason for the most recent fall back to offline mode
    pub fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }

    /// Accept an edit: memory and local tier now, remote tier on [`flush`](Self::flush)
    pub fn edit(&self, value: T) -> Ticket {
        *self.current.borrow_mut() = value;
        self.persist_local();

        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        Ticket(generation)
    }

    /// Wait out the debounce window, then push the value if `ticket` is
    /// still the latest edit and the remote tier is reachable.
    pub async fn flush(&self, ticket: Ticket) -> FlushOutcome {
        self.sleeper.sleep(self.config.debounce).await;

        if ticket.0 != self.generation.get() {
            return FlushOutcome::Superseded;
        }
        if !self.status.get().is_online() {
            debug!("[CACHE] Not online, keeping edit {} local", ticket.0);
            return FlushOutcome::Skipped;
        }

        let value = self.current();
        let outcome = match self.remote.write(&value).await {
            Ok(()) => {
                debug!("[CACHE] Edit {} written to remote", ticket.0);
                *self.synced.borrow_mut() = Some(value);
                FlushOutcome::Written
            }
            Err(err) => {
                warn!("[CACHE] Remote write failed, dropping edit {}: {}", ticket.0, err);
                FlushOutcome::Failed(err)
            }
        };
        self.settled.set(self.settled.get().max(ticket.0));
        outcome
    }

    /// An edit is waiting out its debounce window or its remote write
    fn has_pending_edit(&self) -> bool {
        self.generation.get() != self.settled.get()
    }

    /// Race `sign_in` against the connect timeout.
    ///
    /// On success the remote document is read once; if it exists it wins,
    /// otherwise the local value seeds it.
    pub async fn connect<F, E>(&self, sign_in: F) -> SyncStatus
    where
        F: Future<Output = Result<(), E>>,
        E: Display,
    {
        self.stop();
        let epoch = self.watch_epoch.get();
        // A later connect or a sign-out during the race takes precedence
        let superseded = || self.watch_epoch.get() != epoch;
        self.status.set(SyncStatus::Loading);

        let timeout = self.config.connect_timeout;
        let sign_in = pin!(sign_in);
        match select(sign_in, self.sleeper.sleep(timeout)).await {
            Either::Left((Ok(()), _)) => {}
            Either::Left((Err(err), _)) => {
                self.go_offline(CacheError::SignIn(err.to_string()));
                return self.status();
            }
            Either::Right(((), _)) => {
                self.go_offline(CacheError::Timeout(timeout.as_millis() as u64));
                return self.status();
            }
        }
        if superseded() {
            debug!("[CACHE] Sign-in finished after the connect was superseded");
            return self.status();
        }

        self.status.set(SyncStatus::Online);
        *self.last_error.borrow_mut() = None;
        info!("[CACHE] Online");

        // Edits made while loading are replaced by the remote value or
        // become the seed of a missing document
        self.settled.set(self.generation.get());
        match self.remote.fetch().await {
            Ok(Some(remote)) => {
                *self.synced.borrow_mut() = Some(remote.clone());
                if self.apply_remote(remote) {
                    info!("[CACHE] Remote value replaced local value");
                }
            }
            Ok(None) => {
                let value = self.current();
                match self.remote.write(&value).await {
                    Ok(()) => *self.synced.borrow_mut() = Some(value),
                    Err(err) => warn!("[CACHE] Could not seed remote document: {}", err),
                }
            }
            Err(err) => self.go_offline(err),
        }

        self.status()
    }

    /// Remote wins: overwrite memory and local tier. Returns whether the
    /// value changed.
    pub fn apply_remote(&self, value: T) -> bool {
        if *self.current.borrow() == value {
            return false;
        }
        *self.current.borrow_mut() = value;
        self.persist_local();
        true
    }

    /// Read the remote tier once. `Ok(Some(_))` carries a value that
    /// replaced the local one.
    ///
    /// Only a remote change is applied: a value equal to the last one read
    /// or written is ignored, and nothing is applied while an edit is
    /// still pending.
    pub async fn pull(&self) -> CacheResult<Option<T>> {
        match self.remote.fetch().await {
            Ok(Some(value)) => {
                if self.has_pending_edit() {
                    debug!("[CACHE] Edit pending, ignoring remote read");
                    return Ok(None);
                }
                if self.synced.borrow().as_ref() == Some(&value) {
                    return Ok(None);
                }
                *self.synced.borrow_mut() = Some(value.clone());
                Ok(self.apply_remote(value).then(|| self.current()))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                self.go_offline(err.clone());
                Err(err)
            }
        }
    }

    /// Poll the remote tier until [`stop`](Self::stop), a newer watch, or
    /// a failed read. `on_change` sees every remote value that replaced
    /// the local one.
    pub async fn watch<F>(&self, mut on_change: F)
    where
        F: FnMut(&T),
    {
        let epoch = self.watch_epoch.get() + 1;
        self.watch_epoch.set(epoch);
        let active = || self.watch_epoch.get() == epoch && self.status.get().is_online();

        while active() {
            self.sleeper.sleep(self.config.poll_interval).await;
            if !active() {
                break;
            }
            match self.pull().await {
                Ok(Some(value)) => on_change(&value),
                Ok(None) => {}
                Err(_) => break,
            }
        }
        debug!("[CACHE] Watch {} ended", epoch);
    }

    /// End any running watch loop
    pub fn stop(&self) {
        self.watch_epoch.set(self.watch_epoch.get() + 1);
    }

    pub fn go_offline(&self, reason: CacheError) {
        warn!("[CACHE] Offline: {}", reason);
        self.stop();
        self.status.set(SyncStatus::Offline);
        *self.last_error.borrow_mut() = Some(reason.to_string());
    }

    fn persist_local(&self) {
        if let Err(err) = self.local.store(&self.current.borrow()) {
            warn!("[CACHE] Local write failed: {}", err);
        }
    }
}

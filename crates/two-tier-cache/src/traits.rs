//! Tier Abstractions
//!
//! The seams between the cache logic and the environment it runs in.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;

use crate::error::CacheResult;

/// Synchronous string key-value storage (e.g. browser `localStorage`)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> CacheResult<()>;

    fn remove(&self, key: &str);
}

/// Local persistent tier for a single value
pub trait LocalTier<T> {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> CacheResult<Option<T>>;

    fn store(&self, value: &T) -> CacheResult<()>;
}

/// Remote tier for a single value, addressed by whoever implements it
///
/// Implementations are single-threaded; futures are not `Send`.
#[async_trait(?Send)]
pub trait RemoteTier<T> {
    /// `Ok(None)` when the remote document does not exist
    async fn fetch(&self) -> CacheResult<Option<T>>;

    /// Write with merge semantics
    async fn write(&self, value: &T) -> CacheResult<()>;
}

/// Timer source
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

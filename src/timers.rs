//! Browser Timers
//!
//! Thin wrappers over `gloo-timers`. Host builds (unit tests) have no
//! browser event loop, so there the timers complete immediately and
//! intervals never fire.

use std::time::Duration;

use futures_util::future::{FutureExt, LocalBoxFuture};
use two_tier_cache::Sleeper;

/// Cache timer source backed by `setTimeout`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSleeper;

impl Sleeper for BrowserSleeper {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        sleep_ms(ms).boxed_local()
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(_ms: u32) {}

/// Run `callback` every `ms` milliseconds for the lifetime of the page
#[cfg(target_arch = "wasm32")]
pub fn every(ms: u32, callback: impl FnMut() + 'static) {
    gloo_timers::callback::Interval::new(ms, callback).forget();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn every(_ms: u32, _callback: impl FnMut() + 'static) {}

//! Two-Tier Cache
//!
//! A value held in memory, mirrored synchronously to a local store and
//! eventually to a remote store.
//!
//! - local writes are immediate and authoritative for the UI
//! - remote writes are debounced and best-effort
//! - remote updates win over local state when they arrive
//! - connecting races the sign-in against a timeout and falls back to
//!   local-only mode
//!
//! The crate does not depend on any executor or on the browser. Time is
//! injected through [`Sleeper`], storage through [`KeyValueStore`] /
//! [`LocalTier`] and the network through [`RemoteTier`].

mod cache;
mod error;
mod status;
mod storage;
mod traits;

pub use cache::{CacheConfig, FlushOutcome, Ticket, TwoTierCache};
pub use error::{CacheError, CacheResult};
pub use status::SyncStatus;
pub use storage::{JsonSlot, MemoryStore};
pub use traits::{KeyValueStore, LocalTier, RemoteTier, Sleeper};

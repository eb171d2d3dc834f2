use thiserror::Error;

/// Common result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors surfaced by the cache tiers.
///
/// None of these are fatal to the caller: every path degrades to
/// local-only operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CacheError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Malformed cache entry: {0}")]
    Parse(String),

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Sign-in timed out after {0} ms")]
    Timeout(u64),

    #[error("Sign-in failed: {0}")]
    SignIn(String),

    #[error("Signed out")]
    SignedOut,
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Parse(err.to_string())
    }
}

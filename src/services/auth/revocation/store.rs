use std::{future::Future, pin::Pin};

use crate::services::cache::CacheError;

/// Revocation lookup result:
/// - `Ok(true)`: the key is on the revocation list
/// - `Ok(false)`: not revoked
/// - `Err(_)`: store failure (callers must treat as verification failure)
pub trait RevocationStore: Send + Sync {
    // Check whether `key` has been revoked.
    //
    // The key is whatever the verifier derives per token (jti, digest, ...);
    // the store only answers membership.
    fn is_revoked<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, RevocationError>> + Send + 'a>>;
}

#[derive(Debug, thiserror::Error)]
pub enum RevocationError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    // Revocation checking was requested but no store was wired in.
    // Fail-closed: the verifier turns this into a verification failure.
    #[error("revocation store is not configured")]
    NotConfigured,
}

//! Verification oracle interface.
//!
//! The gate delegates all cryptographic/token-state checks to an
//! implementation of [`TokenVerifier`]. Failures travel through
//! [`VerifyError`], which is deliberately a different type from the gate's
//! header-shape rejection: the middleware never folds the two together, so
//! callers can always tell "the header was malformed" apart from "the
//! verifier said no".

use async_trait::async_trait;
use thiserror::Error;

use crate::services::auth::claims::Claims;
use crate::services::auth::revocation::store::RevocationError;

/// The oracle's own error channel.
///
/// The gate propagates these unmodified; mapping to an HTTP response happens
/// only at the application boundary (`error.rs`).
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("token has been revoked")]
    Revoked,

    #[error("revocation check failed: {0}")]
    Revocation(#[from] RevocationError),
}

/// Verifies a bearer token and returns its decoded claims.
///
/// `check_revoked` asks the verifier to additionally confirm the token has
/// not been invalidated since issuance. That lookup usually costs an extra
/// backend round trip, which is why the gate's config defaults it to off.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str, check_revoked: bool) -> Result<Claims, VerifyError>;
}

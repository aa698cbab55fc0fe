use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use async_trait::async_trait;

use crate::services::auth::claims::Claims;
use crate::services::auth::revocation::store::{RevocationError, RevocationStore};
use crate::services::auth::verifier::{TokenVerifier, VerifyError};

/// EdDSA (Ed25519) access-token verifier.
///
/// `jsonwebtoken::Validation` checks:
/// - signature
/// - `exp` (with the configured leeway)
/// - `iss` and `aud` (because we set them)
///
/// The decoded claim set is handed back as an opaque [`Claims`] map; claim
/// interpretation belongs to downstream consumers, not the verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    revocations: Option<Arc<dyn RevocationStore>>,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtVerifier")
            .field("validation", &self.validation)
            .field("revocations", &self.revocations.is_some())
            .finish()
    }
}

impl JwtVerifier {
    pub fn new(
        public_key_pem: &str,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, String> {
        let decoding_key = DecodingKey::from_ed_pem(public_key_pem.as_bytes())
            .map_err(|e| format!("invalid ed25519 public key pem: {}", e))?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
            revocations: None,
        })
    }

    /// Wire in a revocation list. Without one, `verify(_, true)` fails closed.
    pub fn with_revocation_store(mut self, store: Arc<dyn RevocationStore>) -> Self {
        self.revocations = Some(store);
        self
    }

    // Key used on the revocation list: prefer the token's `jti`; tokens
    // issued without one fall back to a digest of the raw token.
    fn revocation_key(claims: &Claims, token: &str) -> String {
        if let Some(jti) = claims.jti() {
            return jti.to_string();
        }

        let digest = Sha256::digest(token.as_bytes());
        URL_SAFE_NO_PAD.encode(digest)
    }
}

#[async_trait]
impl TokenVerifier for JwtVerifier {
    async fn verify(&self, token: &str, check_revoked: bool) -> Result<Claims, VerifyError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if check_revoked {
            let store = self
                .revocations
                .as_ref()
                .ok_or(VerifyError::Revocation(RevocationError::NotConfigured))?;

            let key = Self::revocation_key(&claims, token);
            if store.is_revoked(&key).await? {
                return Err(VerifyError::Revoked);
            }
        }

        Ok(claims)
    }
}

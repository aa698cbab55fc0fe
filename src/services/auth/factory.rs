/// Factory: build the verification oracle from application `Config`.
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::services::auth::jwt::JwtVerifier;
use crate::services::auth::revocation::ValkeyRevocationStore;
use crate::services::auth::verifier::TokenVerifier;
use crate::services::cache::ValkeyClient;

pub async fn build_verifier(config: &Config) -> Result<Arc<dyn TokenVerifier>> {
    let mut verifier = JwtVerifier::new(
        &config.access_jwt_public_key_pem,
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
    )
    .map_err(|e| anyhow::anyhow!(e))?;

    if config.check_revoked {
        // Config::from_env already requires VALKEY_URL when the flag is on.
        let url = config
            .valkey_url
            .as_deref()
            .context("VALKEY_URL is required when AUTH_CHECK_REVOKED is enabled")?;

        let cache = ValkeyClient::new(url)
            .await
            .context("failed to connect to the revocation backend")?;

        let store = ValkeyRevocationStore::new_with_cache(Arc::new(cache), "auth:revoked");
        verifier = verifier.with_revocation_store(Arc::new(store));
    }

    Ok(Arc::new(verifier))
}

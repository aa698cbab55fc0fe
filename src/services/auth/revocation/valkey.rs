use std::{future::Future, pin::Pin, sync::Arc};

use crate::services::{
    auth::revocation::store::{RevocationError, RevocationStore},
    cache::{CacheClient, ValkeyClient},
};

/// Valkey-backed revocation list (Redis protocol).
///
/// A token is considered revoked when `<prefix>:<key>` exists. Entries are
/// written by whatever operational tooling revokes tokens; this side only
/// reads. Fail-closed: any backend error surfaces as `Err` and callers treat
/// it as a verification failure.
#[derive(Clone)]
pub struct ValkeyRevocationStore<C: CacheClient> {
    cache: Arc<C>,
    // Key prefix to avoid collisions across environments
    prefix: String,
}

impl ValkeyRevocationStore<ValkeyClient> {
    pub async fn new(valkey_url: &str) -> Result<Self, RevocationError> {
        let client = ValkeyClient::new(valkey_url).await?;
        Ok(Self::new_with_cache(Arc::new(client), "auth:revoked"))
    }
}

impl<C: CacheClient> ValkeyRevocationStore<C> {
    pub fn new_with_cache(cache: Arc<C>, prefix: impl Into<String>) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, raw: &str) -> String {
        format!("{}:{}", self.prefix, raw)
    }
}

impl<C: CacheClient> RevocationStore for ValkeyRevocationStore<C> {
    fn is_revoked<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, RevocationError>> + Send + 'a>> {
        Box::pin(async move {
            let full_key = self.key(key);

            // GET <prefix>:<key> -- any value means "revoked".
            let res = self.cache.get_string(&full_key).await?;

            Ok(res.is_some())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cache::CacheResult;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct MemoryCache {
        entries: Arc<Mutex<HashMap<String, String>>>,
    }

    impl MemoryCache {
        fn with(entries: &[(&str, &str)]) -> Self {
            let map = entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            Self {
                entries: Arc::new(Mutex::new(map)),
            }
        }
    }

    #[async_trait]
    impl CacheClient for MemoryCache {
        fn backend_name(&self) -> &'static str {
            "memory"
        }

        async fn get_string(&self, key: &str) -> CacheResult<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }
    }

    #[tokio::test]
    async fn present_key_is_revoked() {
        let cache = MemoryCache::with(&[("auth:revoked:token-1", "1")]);
        let store = ValkeyRevocationStore::new_with_cache(Arc::new(cache), "auth:revoked");

        assert!(store.is_revoked("token-1").await.unwrap());
    }

    #[tokio::test]
    async fn absent_key_is_not_revoked() {
        let cache = MemoryCache::with(&[]);
        let store = ValkeyRevocationStore::new_with_cache(Arc::new(cache), "auth:revoked");

        assert!(!store.is_revoked("token-1").await.unwrap());
    }

    #[tokio::test]
    async fn prefix_is_applied_to_lookups() {
        // Same raw key under a different prefix must not match.
        let cache = MemoryCache::with(&[("other:token-1", "1")]);
        let store = ValkeyRevocationStore::new_with_cache(Arc::new(cache), "auth:revoked");

        assert_eq!(store.key("token-1"), "auth:revoked:token-1");
        assert!(!store.is_revoked("token-1").await.unwrap());
    }
}

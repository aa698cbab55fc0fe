//! Common test utilities: a recording mock oracle and a test server helper.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use token_gate::config::{AppEnv, Config};
use token_gate::{AppState, Claims, GateConfig, TokenVerifier, VerifyError};

type Behavior = Box<dyn Fn(&str, bool) -> Result<Claims, VerifyError> + Send + Sync>;

/// Oracle double: records every `(token, check_revoked)` call and answers
/// with a canned behavior.
pub struct MockVerifier {
    calls: Mutex<Vec<(String, bool)>>,
    behavior: Behavior,
}

impl MockVerifier {
    /// Always succeeds with the given claims object.
    pub fn ok(claims: serde_json::Value) -> Arc<Self> {
        let claims = to_claims(claims);
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            behavior: Box::new(move |_, _| Ok(claims.clone())),
        })
    }

    /// Always fails with the error produced by `f`.
    pub fn failing(
        f: impl Fn(&str, bool) -> VerifyError + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            behavior: Box::new(move |token, flag| Err(f(token, flag))),
        })
    }

    pub fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenVerifier for MockVerifier {
    async fn verify(&self, token: &str, check_revoked: bool) -> Result<Claims, VerifyError> {
        self.calls
            .lock()
            .unwrap()
            .push((token.to_string(), check_revoked));
        (self.behavior)(token, check_revoked)
    }
}

pub fn to_claims(value: serde_json::Value) -> Claims {
    match value {
        serde_json::Value::Object(map) => Claims::from(map),
        _ => panic!("claims fixture must be a JSON object"),
    }
}

pub fn test_state(verifier: Arc<MockVerifier>, check_revoked: bool) -> AppState {
    AppState::new(GateConfig::new(verifier).with_check_revoked(check_revoked))
}

pub fn test_config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        cors_allowed_origins: vec![],
        auth_issuer: "https://issuer.test".to_string(),
        auth_audience: "api".to_string(),
        access_token_leeway_seconds: 0,
        access_jwt_public_key_pem: String::new(),
        check_revoked: false,
        valkey_url: None,
    }
}

/// Spawn the app on an ephemeral port.
///
/// The server shuts down when the returned sender is sent or dropped.
pub async fn run_test_server(state: AppState) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test server");
    let addr = listener.local_addr().expect("failed to get local address");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let app = token_gate::app::build_router(state, &test_config());

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
            .expect("server error");
    });

    (addr, shutdown_tx)
}

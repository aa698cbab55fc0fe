/*
 * Responsibility
 * - Bearer トークンの検証ゲート (ヘッダ抽出 → scheme 判定 → oracle 委譲)
 * - 成功時に、検証済み claims (AuthCtx) を request extensions に載せる
 * - ヘッダ形式の問題 (欠落/scheme 不一致) は固定メッセージの 401 で打ち切る
 * - oracle の失敗はここでは捕まえない (VerifyError のまま上に流す)
 */
//! `Authorization: Bearer <token>` を検証 → AuthCtx を extensions に入れる
//!
//! 失敗は 2 チャネルに分かれる：
//! - header shape (missing / wrong scheme): [`Rejection`] として 401 を返す。
//!   メッセージは 2 種類で固定、oracle は呼ばれない。
//! - verification failure: oracle 側の [`VerifyError`] をそのまま伝播する。
//!   期限切れ・署名不正・失効などの区別は oracle の責務であり、ここで
//!   401 に潰して理由を握りつぶすことはしない。

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::api::v1::extractors::AuthCtx;
use crate::services::auth::{Claims, TokenVerifier, VerifyError};
use crate::state::AppState;

/// The only credential scheme this gate accepts. Exact, case-sensitive.
const BEARER_SCHEME: &str = "Bearer";

pub const MISSING_AUTH_HEADER: &str = "Missing auth header";
pub const EXPECTED_BEARER_SCHEME: &str = "Expected Bearer Authentication Scheme";

/// Gate configuration: the verification oracle plus the revocation flag.
///
/// Immutable once built; cloned into every request via `AppState`.
#[derive(Clone)]
pub struct GateConfig {
    pub verifier: Arc<dyn TokenVerifier>,
    pub check_revoked: bool,
}

impl GateConfig {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            verifier,
            check_revoked: false,
        }
    }

    pub fn with_check_revoked(mut self, check_revoked: bool) -> Self {
        self.check_revoked = check_revoked;
        self
    }
}

impl std::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateConfig")
            .field("check_revoked", &self.check_revoked)
            .finish()
    }
}

/// Header-shape rejection: always 401, message one of the two constants above.
///
/// Deliberately a plain value (not an error type): these are recovered locally
/// and short-circuit the response, unlike [`VerifyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    pub status: StatusCode,
    pub code: &'static str,
    pub error: &'static str,
}

impl Rejection {
    pub fn missing_header() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "MISSING_AUTH_HEADER",
            error: MISSING_AUTH_HEADER,
        }
    }

    pub fn unexpected_scheme() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "UNEXPECTED_AUTH_SCHEME",
            error: EXPECTED_BEARER_SCHEME,
        }
    }
}

/// Gate outcome on the header-shape channel.
#[derive(Debug)]
pub enum Outcome {
    /// Token verified; claims are ready to be bound to the request.
    Authenticated(Claims),
    /// Header missing or malformed; respond with the structured 401.
    Rejected(Rejection),
}

// 先頭 2 セグメントだけを見る (3 つ目以降は無視)。
// 区切りは単一スペース。"Bearer" 単体なら token は空文字で oracle に渡り、
// oracle 側のエラーになる。
fn split_scheme_token(value: &str) -> (&str, &str) {
    let mut segments = value.split(' ');
    (
        segments.next().unwrap_or_default(),
        segments.next().unwrap_or_default(),
    )
}

/// Run the gate against a request's headers.
///
/// Pure with respect to the request: same headers + same config give the same
/// header-shape outcome. The only suspension point is the oracle call.
pub async fn authenticate(
    headers: &HeaderMap,
    gate: &GateConfig,
) -> Result<Outcome, VerifyError> {
    let value = match headers.get(header::AUTHORIZATION) {
        Some(v) => v,
        None => return Ok(Outcome::Rejected(Rejection::missing_header())),
    };

    // Present but unreadable as a string: no scheme can be parsed out of it.
    let Ok(value) = value.to_str() else {
        return Ok(Outcome::Rejected(Rejection::unexpected_scheme()));
    };

    if value.is_empty() {
        return Ok(Outcome::Rejected(Rejection::missing_header()));
    }

    let (scheme, token) = split_scheme_token(value);
    if scheme != BEARER_SCHEME {
        return Ok(Outcome::Rejected(Rejection::unexpected_scheme()));
    }

    // ここから先の失敗は oracle のエラーチャネル。`?` で素通しする。
    let claims = gate.verifier.verify(token, gate.check_revoked).await?;

    Ok(Outcome::Authenticated(claims))
}

/// 認証を掛けたい Router に gate middleware を適用する。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::bearer::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, bearer_gate))
}

async fn bearer_gate(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, VerifyError> {
    match authenticate(req.headers(), &state.gate).await? {
        Outcome::Authenticated(claims) => {
            if let Some(exp) = claims.expires_at() {
                tracing::debug!(expires_at = %exp, "access token accepted");
            }

            // Bind once; the gate is the sole writer and downstream handlers
            // only read through the extractor.
            req.extensions_mut().insert(AuthCtx::new(claims));

            Ok(next.run(req).await)
        }
        Outcome::Rejected(rejection) => {
            tracing::debug!(error = rejection.error, "request rejected before verification");
            Ok(rejection.into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::http::HeaderValue;
    use serde_json::json;

    struct StaticVerifier(serde_json::Map<String, serde_json::Value>);

    #[async_trait]
    impl TokenVerifier for StaticVerifier {
        async fn verify(&self, _token: &str, _check_revoked: bool) -> Result<Claims, VerifyError> {
            Ok(Claims::from(self.0.clone()))
        }
    }

    fn gate() -> GateConfig {
        let claims = match json!({"sub": "u1"}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        GateConfig::new(Arc::new(StaticVerifier(claims)))
    }

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn split_takes_first_two_segments() {
        assert_eq!(split_scheme_token("Bearer abc"), ("Bearer", "abc"));
        assert_eq!(split_scheme_token("Bearer abc def"), ("Bearer", "abc"));
        assert_eq!(split_scheme_token("Bearer"), ("Bearer", ""));
        // Double space: the second segment is empty, same as the original.
        assert_eq!(split_scheme_token("Bearer  abc"), ("Bearer", ""));
    }

    #[tokio::test]
    async fn missing_header_is_rejected_without_verification() {
        let out = authenticate(&HeaderMap::new(), &gate()).await.unwrap();
        match out {
            Outcome::Rejected(r) => {
                assert_eq!(r.status, StatusCode::UNAUTHORIZED);
                assert_eq!(r.error, MISSING_AUTH_HEADER);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_header_counts_as_missing() {
        let out = authenticate(&headers(""), &gate()).await.unwrap();
        assert!(matches!(
            out,
            Outcome::Rejected(r) if r.error == MISSING_AUTH_HEADER
        ));
    }

    #[tokio::test]
    async fn scheme_comparison_is_case_sensitive() {
        let out = authenticate(&headers("bearer abc"), &gate()).await.unwrap();
        assert!(matches!(
            out,
            Outcome::Rejected(r) if r.error == EXPECTED_BEARER_SCHEME
        ));
    }

    #[tokio::test]
    async fn bearer_token_authenticates() {
        let out = authenticate(&headers("Bearer abc"), &gate()).await.unwrap();
        match out {
            Outcome::Authenticated(claims) => assert_eq!(claims.subject(), Some("u1")),
            other => panic!("expected claims, got {:?}", other),
        }
    }
}

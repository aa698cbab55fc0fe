/*
 * Responsibility
 * - GET /me: gate が bind した claims をそのまま返す
 * - downstream consumer の見本: AuthCtx は extractor 経由の read-only
 */
use axum::{Json, response::IntoResponse};
use serde_json::json;

use crate::api::v1::extractors::AuthCtxExtractor;

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> impl IntoResponse {
    Json(json!({
        "sub": ctx.subject(),
        "claims": ctx.claims,
    }))
}

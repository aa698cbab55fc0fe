/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は public、/me は bearer gate の内側
 * - gate を適用する範囲はここで決める (route 単位ではなく Router 単位)
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{health::health, me::me};
use crate::middleware::auth::bearer;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = bearer::apply(Router::new().route("/me", get(me)), state);

    Router::new()
        .route("/health", get(health))
        .merge(protected)
}

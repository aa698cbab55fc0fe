/*
 * Responsibility
 * - エラー → HTTP response への変換をここに集約する
 * - gate の 2 つの失敗チャネルをそれぞれの形で response にする
 *   - Rejection: header shape の 401 (メッセージ固定、そのまま返す)
 *   - VerifyError: oracle の失敗。詳細は log に出し、client には generic な 401
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::middleware::auth::bearer::Rejection;
use crate::services::auth::VerifyError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.error.to_string(),
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl IntoResponse for VerifyError {
    fn into_response(self) -> Response {
        // The gate propagated this unmodified; this is the application
        // boundary, so the concrete cause goes to the log. The client gets a
        // generic 401: the enumeration of verification failure reasons
        // (expired / bad signature / revoked / backend down) stays internal.
        tracing::warn!(error = %self, "token verification failed");

        let body = ErrorResponse {
            error: ErrorBody {
                code: "VERIFICATION_FAILED",
                message: "token verification failed".to_string(),
            },
        };

        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

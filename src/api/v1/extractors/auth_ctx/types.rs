/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - claims の中身は oracle が返した opaque なマップであり、ここでは解釈しない
 * - binding は optional 方式: gate が成功しない限り extensions に存在しない
 *   (downstream は extractor 経由で受け取り、無ければ 401)
 */

use crate::services::auth::Claims;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - gate が成功時に一度だけ書き込む。以後、変更も削除もされない
/// - handler / service 層は read-only consumer
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub claims: Claims,
}

impl AuthCtx {
    pub fn new(claims: Claims) -> Self {
        Self { claims }
    }

    /// `sub` claim (if the oracle provided one).
    pub fn subject(&self) -> Option<&str> {
        self.claims.subject()
    }
}

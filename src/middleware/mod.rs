/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - auth::bearer (認証ゲート), cors, http (request-id/trace/timeout)
 */
pub mod auth;
pub mod cors;
pub mod http;

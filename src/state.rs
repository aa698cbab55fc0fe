/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - gate: GateConfig (oracle + revocation flag)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use crate::middleware::auth::bearer::GateConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    pub gate: GateConfig,
}

impl AppState {
    pub fn new(gate: GateConfig) -> Self {
        Self { gate }
    }
}

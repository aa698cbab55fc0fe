pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

pub use middleware::auth::bearer::{GateConfig, Outcome, Rejection, authenticate};
pub use services::auth::{Claims, TokenVerifier, VerifyError};
pub use state::AppState;

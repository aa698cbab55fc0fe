pub mod bearer;

pub use bearer::{GateConfig, Outcome, Rejection};

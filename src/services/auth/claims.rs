//! Decoded identity claims, kept opaque.
//!
//! The gate stores and forwards whatever the verifier decoded; it does not
//! interpret claim contents. Accessors below read well-known names (`sub`,
//! `jti`, `exp`) without making them required.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Claim-name -> claim-value mapping returned by a successful verification.
///
/// Serializes as a plain JSON object, so handlers can echo it back directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(serde_json::Map<String, Value>);

impl Claims {
    /// Look up a single claim by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// `sub` claim, when present and a string.
    pub fn subject(&self) -> Option<&str> {
        self.get("sub").and_then(Value::as_str)
    }

    /// `jti` claim, when present and a string.
    pub fn jti(&self) -> Option<&str> {
        self.get("jti").and_then(Value::as_str)
    }

    /// `exp` claim as a UTC timestamp, when present and numeric.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.get("exp")
            .and_then(Value::as_i64)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

impl From<serde_json::Map<String, Value>> for Claims {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self(map)
    }
}

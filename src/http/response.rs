//! Success response bodies.
//!
//! Error bodies live with [`crate::relay::RelayError`]; everything here has
//! `ok: true`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Name reported by the liveness payload.
pub const SERVICE_NAME: &str = "events-endpoint";

/// `GET` liveness payload.
#[derive(Debug, Serialize)]
pub struct Health {
    pub ok: bool,
    pub service: &'static str,
}

impl Health {
    pub fn new() -> Self {
        Self {
            ok: true,
            service: SERVICE_NAME,
        }
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new()
    }
}

/// Body returned once the form service accepted a submission.
#[derive(Debug, Serialize)]
pub struct Submitted {
    pub ok: bool,
    pub submitted: bool,
}

impl Submitted {
    pub fn new() -> Self {
        Self { ok: true, submitted: true }
    }
}

impl Default for Submitted {
    fn default() -> Self {
        Self::new()
    }
}

pub fn health() -> Response {
    (StatusCode::OK, Json(Health::new())).into_response()
}

pub fn submitted() -> Response {
    (StatusCode::OK, Json(Submitted::new())).into_response()
}

/// Pre-flight acknowledgement: 200 with an empty body.
pub fn preflight() -> Response {
    StatusCode::OK.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_shapes() {
        assert_eq!(
            serde_json::to_value(Health::new()).unwrap(),
            json!({"ok": true, "service": "events-endpoint"})
        );
        assert_eq!(
            serde_json::to_value(Submitted::new()).unwrap(),
            json!({"ok": true, "submitted": true})
        );
    }
}

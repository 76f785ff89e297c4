//! Relay error taxonomy.
//!
//! Every failure a submission can hit is one variant here. The HTTP status
//! and the stable `error` code are a pure function of the variant.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::config::relay::RelayConfigError;
use crate::mapping::EntryMapError;

pub type RelayResult<T> = Result<T, RelayError>;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("request body could not be read within {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("missing environment variables: {}", .0.join(", "))]
    MissingEnvVars(Vec<&'static str>),

    #[error("invalid entry map: {0}")]
    InvalidEntryMap(#[from] EntryMapError),

    #[error("unauthorized")]
    Unauthorized,

    #[error("missing application link")]
    MissingApplicationLink,

    /// Form service answered outside the 2xx range.
    #[error("form service returned {status}")]
    FormSubmitFailed { status: u16, text: String },

    /// Transport failure talking to the form service.
    #[error("{0}")]
    Upstream(#[from] reqwest::Error),

    /// The request outlived `timeouts.request_secs`.
    #[error("request timed out")]
    TimedOut,

    #[error("{0}")]
    Internal(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::Unauthorized => StatusCode::UNAUTHORIZED,
            RelayError::MissingApplicationLink => StatusCode::BAD_REQUEST,
            RelayError::FormSubmitFailed { .. } => StatusCode::BAD_GATEWAY,
            RelayError::MissingEnvVars(_)
            | RelayError::InvalidEntryMap(_)
            | RelayError::Upstream(_)
            | RelayError::TimedOut
            | RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::MethodNotAllowed => "method_not_allowed",
            RelayError::PayloadTooLarge { .. } => "payload_too_large",
            RelayError::MissingEnvVars(_) => "missing_env_vars",
            RelayError::InvalidEntryMap(_) => "invalid_entry_map",
            RelayError::Unauthorized => "unauthorized",
            RelayError::MissingApplicationLink => "missing_application_link",
            RelayError::FormSubmitFailed { .. } => "form_submit_failed",
            RelayError::Upstream(_) | RelayError::TimedOut | RelayError::Internal(_) => "server_error",
        }
    }

    /// Low-level failures the caller cannot fix by changing the request.
    pub fn is_server_error(&self) -> bool {
        matches!(self, RelayError::Upstream(_) | RelayError::TimedOut | RelayError::Internal(_))
    }

    fn body(&self) -> serde_json::Value {
        match self {
            RelayError::FormSubmitFailed { status, text } => json!({
                "ok": false,
                "error": self.code(),
                "status": status,
                "text": text,
            }),
            RelayError::Upstream(_) | RelayError::TimedOut | RelayError::Internal(_) => json!({
                "ok": false,
                "error": self.code(),
                "detail": self.to_string(),
            }),
            _ => json!({ "ok": false, "error": self.code() }),
        }
    }
}

impl From<RelayConfigError> for RelayError {
    fn from(err: RelayConfigError) -> Self {
        match err {
            RelayConfigError::MissingVars(vars) => RelayError::MissingEnvVars(vars),
            RelayConfigError::InvalidEntryMap(e) => RelayError::InvalidEntryMap(e),
            other @ RelayConfigError::InvalidTargetUrl { .. } => RelayError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_code_mapping() {
        let cases = [
            (RelayError::MethodNotAllowed, 405, "method_not_allowed"),
            (RelayError::MissingEnvVars(vec!["FORM_ACTION_URL"]), 500, "missing_env_vars"),
            (RelayError::Unauthorized, 401, "unauthorized"),
            (RelayError::MissingApplicationLink, 400, "missing_application_link"),
            (
                RelayError::FormSubmitFailed { status: 404, text: "nope".into() },
                502,
                "form_submit_failed",
            ),
            (RelayError::Internal("boom".into()), 500, "server_error"),
            (RelayError::PayloadTooLarge { limit: 10 }, 413, "payload_too_large"),
        ];

        for (err, status, code) in cases {
            assert_eq!(err.status().as_u16(), status, "{err}");
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn test_form_submit_failed_body() {
        let err = RelayError::FormSubmitFailed {
            status: 404,
            text: "Not Found".into(),
        };
        assert_eq!(
            err.body(),
            json!({"ok": false, "error": "form_submit_failed", "status": 404, "text": "Not Found"})
        );
    }

    #[test]
    fn test_server_error_carries_detail() {
        let err = RelayError::Internal("connection reset".into());
        assert_eq!(
            err.body(),
            json!({"ok": false, "error": "server_error", "detail": "connection reset"})
        );
        assert!(err.is_server_error());
    }

    #[test]
    fn test_timeout_is_server_error_envelope() {
        assert_eq!(
            RelayError::TimedOut.body(),
            json!({"ok": false, "error": "server_error", "detail": "request timed out"})
        );
        assert_eq!(RelayError::TimedOut.status().as_u16(), 500);
    }

    #[test]
    fn test_plain_errors_have_only_code() {
        assert_eq!(
            RelayError::Unauthorized.body(),
            json!({"ok": false, "error": "unauthorized"})
        );
    }

    #[test]
    fn test_config_errors_translate() {
        let err: RelayError = RelayConfigError::MissingVars(vec!["EVENTS_WEBHOOK_SECRET"]).into();
        assert_eq!(err.code(), "missing_env_vars");

        let url_err = url::Url::parse("nope").unwrap_err();
        let err: RelayError = RelayConfigError::InvalidTargetUrl {
            url: "nope".into(),
            source: url_err,
        }
        .into();
        assert_eq!(err.code(), "server_error");
        assert!(err.to_string().contains("FORM_ACTION_URL"));
    }
}

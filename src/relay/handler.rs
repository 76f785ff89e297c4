//! Submission relay handler.
//!
//! # Flow
//! ```text
//! method dispatch (OPTIONS / GET / POST / 405)
//!     → RelaySettings::from_env   (missing_env_vars, invalid_entry_map)
//!     → authorize                 (unauthorized)
//!     → require Application Link  (missing_application_link)
//!     → OutboundPayload::build
//!     → FormClient::submit        (form_submit_failed, server_error)
//! ```

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use std::time::Instant;

use crate::config::env::ReadEnv;
use crate::config::relay::RelaySettings;
use crate::http::request::request_id;
use crate::http::response;
use crate::http::server::AppState;
use crate::mapping::OutboundPayload;
use crate::observability::metrics;
use crate::relay::client::FormClient;
use crate::relay::error::{RelayError, RelayResult};
use crate::relay::submission::{Submission, APPLICATION_LINK};
use crate::security::secrets_match;

/// Run the full pipeline for one POST body.
pub async fn relay_submission<E>(env: &E, client: &FormClient, body: &[u8]) -> RelayResult<()>
where
    E: ReadEnv + ?Sized,
{
    let settings = RelaySettings::from_env(env)?;
    let submission = Submission::from_slice(body);

    authorize(&settings, &submission)?;

    if !submission.has_value(APPLICATION_LINK) {
        return Err(RelayError::MissingApplicationLink);
    }

    let payload = OutboundPayload::build(&settings.entry_map, &submission);
    client.submit(&settings.target_url, &payload).await
}

fn authorize(settings: &RelaySettings, submission: &Submission) -> RelayResult<()> {
    if secrets_match(submission.secret(), &settings.secret) {
        Ok(())
    } else {
        Err(RelayError::Unauthorized)
    }
}

/// Axum entry point, mounted on every path.
pub async fn events_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let request_id = request_id(request.headers()).to_string();

    let result = match method {
        Method::OPTIONS if state.security.cors_enabled => Ok(response::preflight()),
        Method::GET if state.security.health_check_enabled => Ok(response::health()),
        Method::POST => tokio::time::timeout(state.request_timeout, handle_post(&state, request))
            .await
            .unwrap_or(Err(RelayError::TimedOut)),
        _ => Err(RelayError::MethodNotAllowed),
    };

    let (response, outcome) = match result {
        Ok(response) => (response, "ok"),
        Err(err) => {
            if err.is_server_error() {
                tracing::error!(request_id = %request_id, error = %err, "Relay failed");
            } else {
                tracing::warn!(request_id = %request_id, code = err.code(), "Submission rejected");
            }
            (err.into_response(), "error")
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), outcome, start);
    response
}

async fn handle_post(state: &AppState, request: Request<Body>) -> RelayResult<Response> {
    let limit = state.security.max_body_size;
    let body = axum::body::to_bytes(request.into_body(), limit)
        .await
        .map_err(|err| body_read_error(err, limit))?;

    relay_submission(state.env.as_ref(), &state.client, &body).await?;
    Ok(response::submitted())
}

/// A body over the limit is 413; any other read failure is a server error.
fn body_read_error(err: axum::Error, limit: usize) -> RelayError {
    let over_limit = std::iter::successors(Some(&err as &(dyn std::error::Error + 'static)), |e| e.source())
        .any(|e| e.is::<LengthLimitError>());

    if over_limit {
        RelayError::PayloadTooLarge { limit }
    } else {
        RelayError::Internal(format!("failed to read request body: {err}"))
    }
}

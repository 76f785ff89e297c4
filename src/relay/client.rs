//! Outbound client for the form service.
//!
//! # Responsibilities
//! - POST the encoded payload to the configured form action URL
//! - Translate non-2xx answers into [`RelayError::FormSubmitFailed`]
//! - Bound every call with the configured relay timeout
//!
//! No retries: a failed submission is reported back to the caller as-is.

use reqwest::header::CONTENT_TYPE;
use std::time::{Duration, Instant};
use url::Url;

use crate::mapping::OutboundPayload;
use crate::observability::metrics;
use crate::relay::error::{RelayError, RelayResult};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// Shared HTTP client for relaying submissions. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FormClient {
    http: reqwest::Client,
}

impl FormClient {
    /// Build a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Submit one payload.
    pub async fn submit(&self, target: &Url, payload: &OutboundPayload) -> RelayResult<()> {
        let start = Instant::now();
        let body = payload.encode();

        tracing::debug!(
            target_url = %target,
            fields = payload.len(),
            "Relaying submission to form service"
        );

        let response = match self
            .http
            .post(target.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                metrics::record_upstream(None, start);
                return Err(RelayError::Upstream(e));
            }
        };

        let status = response.status();
        metrics::record_upstream(Some(status.as_u16()), start);

        if status.is_success() {
            tracing::info!(status = status.as_u16(), "Form service accepted submission");
            return Ok(());
        }

        let text = response.text().await?;
        tracing::warn!(status = status.as_u16(), "Form service rejected submission");
        Err(RelayError::FormSubmitFailed {
            status: status.as_u16(),
            text,
        })
    }
}

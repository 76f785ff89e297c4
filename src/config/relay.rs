//! Per-request relay settings.
//!
//! Built from the environment on every request and dropped afterwards, so an
//! operator can rotate the secret or edit the entry map without a restart.

use std::fmt;
use thiserror::Error;
use url::Url;

use crate::config::env::ReadEnv;
use crate::mapping::{EntryMap, EntryMapError};

pub const SECRET_VAR: &str = "EVENTS_WEBHOOK_SECRET";
pub const TARGET_URL_VAR: &str = "FORM_ACTION_URL";
pub const ENTRY_MAP_VAR: &str = "FORM_ENTRY_MAP_JSON";

/// Errors raised while assembling [`RelaySettings`].
#[derive(Debug, Error)]
pub enum RelayConfigError {
    /// One or more variables are unset or empty.
    #[error("missing environment variables: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),

    #[error("invalid FORM_ENTRY_MAP_JSON: {0}")]
    InvalidEntryMap(#[from] EntryMapError),

    #[error("invalid FORM_ACTION_URL '{url}': {source}")]
    InvalidTargetUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Validated settings for relaying one submission.
#[derive(Clone)]
pub struct RelaySettings {
    pub secret: String,
    pub target_url: Url,
    pub entry_map: EntryMap,
}

// Keeps the secret out of `{:?}` output.
impl fmt::Debug for RelaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelaySettings")
            .field("secret", &"<redacted>")
            .field("target_url", &self.target_url.as_str())
            .field("entry_map_len", &self.entry_map.len())
            .finish()
    }
}

impl RelaySettings {
    /// Read and validate all three variables.
    ///
    /// Presence is checked for every variable before anything is parsed, so a
    /// missing variable always wins over a malformed one.
    pub fn from_env<E: ReadEnv + ?Sized>(env: &E) -> Result<Self, RelayConfigError> {
        let read = |key: &'static str| env.var(key).ok().filter(|v| !v.is_empty());

        let secret = read(SECRET_VAR);
        let target_url = read(TARGET_URL_VAR);
        let entry_map = read(ENTRY_MAP_VAR);

        let (secret, target_url, entry_map) = match (secret, target_url, entry_map) {
            (Some(s), Some(u), Some(m)) => (s, u, m),
            (s, u, m) => {
                let missing = [(SECRET_VAR, s.is_none()), (TARGET_URL_VAR, u.is_none()), (ENTRY_MAP_VAR, m.is_none())]
                    .into_iter()
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                return Err(RelayConfigError::MissingVars(missing));
            }
        };

        let entry_map = EntryMap::from_json(&entry_map)?;
        let target_url = Url::parse(&target_url).map_err(|source| RelayConfigError::InvalidTargetUrl {
            url: target_url.clone(),
            source,
        })?;

        Ok(Self {
            secret,
            target_url,
            entry_map,
        })
    }
}

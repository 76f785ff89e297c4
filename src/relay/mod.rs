//! Submission relay subsystem.
//!
//! # Data Flow
//! ```text
//! POST body
//!     → submission.rs (lenient JSON object view)
//!     → handler.rs (settings, secret, required field, remap)
//!     → client.rs (form-urlencoded POST to the form service)
//!     → error.rs (every failure → status + stable error code)
//! ```
//!
//! # Design Decisions
//! - Settings are rebuilt from the environment on every request
//! - Each step returns `RelayResult`; only the handler turns errors into responses
//! - Exactly one outbound call per accepted submission, never retried

pub mod client;
pub mod error;
pub mod handler;
pub mod submission;

pub use client::FormClient;
pub use error::{RelayError, RelayResult};
pub use handler::{events_handler, relay_submission};
pub use submission::Submission;

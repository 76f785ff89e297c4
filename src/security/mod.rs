//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (CORS headers on the way out, every status)
//!     → secret.rs (shared-secret check before any field is read)
//!     → Pass to remapping
//! ```
//!
//! # Design Decisions
//! - Fail closed: a missing secret is a mismatch
//! - Secret comparison does not short-circuit on the first differing byte
//! - The secret never appears in logs or Debug output

pub mod headers;
pub mod secret;

pub use headers::with_cors;
pub use secret::secrets_match;

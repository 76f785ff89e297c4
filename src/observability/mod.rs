//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the form client produce:
//!     → logging.rs (structured log events, request spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to every request span
//! - The shared secret is never logged, in any form
//! - Metrics are off by default; recording without an exporter is free

pub mod logging;
pub mod metrics;

pub use logging::init_logging;

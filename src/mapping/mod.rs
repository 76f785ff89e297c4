//! Field remapping subsystem.
//!
//! # Data Flow
//! ```text
//! FORM_ENTRY_MAP_JSON
//!     → entry_map.rs (decode into label → MappingTarget, reject bad shapes)
//!
//! Submission + EntryMap
//!     → payload.rs (simple fields copied, date groups split via date.rs)
//!     → control pairs appended
//!     → form-urlencoded body
//! ```
//!
//! # Design Decisions
//! - Mapping shapes are decoded once per settings load, never per field
//! - Payload keys are unique; later writes overwrite earlier ones in place
//! - Unmapped submission labels never reach the payload

pub mod date;
pub mod entry_map;
pub mod payload;

pub use date::{split_date, SplitDate};
pub use entry_map::{DateGroup, EntryMap, EntryMapError, EntryMapping, MappingTarget};
pub use payload::{OutboundPayload, CONTROL_PAIRS};

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! Server settings (startup, once):
//!     config file (TOML, optional)
//!         → loader.rs (parse & deserialize)
//!         → validation.rs (semantic checks)
//!         → ServerConfig (validated, immutable)
//!
//! Relay settings (every request):
//!     environment (env.rs, ReadEnv)
//!         → relay.rs (presence, entry map decode, URL parse)
//!         → RelaySettings (dropped after the request)
//! ```
//!
//! # Design Decisions
//! - Server config is immutable once loaded; all fields have defaults
//! - Relay settings are never cached so edits apply to the next request
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod relay;
pub mod schema;
pub mod validation;

pub use env::{MapEnv, ReadEnv, SystemEnv};
pub use relay::{RelayConfigError, RelaySettings};
pub use schema::{ListenerConfig, ObservabilityConfig, SecurityConfig, ServerConfig, TimeoutConfig};

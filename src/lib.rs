//! Form submission relay.
//!
//! Accepts a JSON form submission, checks a shared secret, remaps the fields
//! through a configurable entry map and relays them, form-urlencoded, to a
//! third-party form service.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod mapping;
pub mod observability;
pub mod relay;
pub mod security;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

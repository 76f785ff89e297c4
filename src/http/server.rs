//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the relay handler on every path
//! - Wire up middleware (request ID, tracing, CORS)
//! - Hold the shared form client and the environment seam
//! - Serve until the shutdown signal fires

use axum::{routing::any, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::env::{ReadEnv, SystemEnv};
use crate::config::{SecurityConfig, ServerConfig};
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::relay::{events_handler, FormClient};
use crate::security::with_cors;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of the relay settings, read on every request.
    pub env: Arc<dyn ReadEnv + Send + Sync>,
    pub client: FormClient,
    pub security: SecurityConfig,
    /// Deadline for one request, answered as a `server_error` envelope.
    pub request_timeout: Duration,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server that reads relay settings from the process environment.
    pub fn new(config: ServerConfig) -> Result<Self, reqwest::Error> {
        Self::with_env(config, Arc::new(SystemEnv))
    }

    /// Create a server with an explicit settings source.
    pub fn with_env(config: ServerConfig, env: Arc<dyn ReadEnv + Send + Sync>) -> Result<Self, reqwest::Error> {
        let client = FormClient::new(Duration::from_secs(config.timeouts.relay_secs))?;
        Ok(Self::with_client(config, env, client))
    }

    /// Create a server around an existing form client.
    pub fn with_client(config: ServerConfig, env: Arc<dyn ReadEnv + Send + Sync>, client: FormClient) -> Self {
        let state = AppState {
            env,
            client,
            security: config.security.clone(),
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        let router = Router::new()
            .route("/{*path}", any(events_handler))
            .route("/", any(events_handler))
            .with_state(state)
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer());

        if config.security.cors_enabled {
            with_cors(router)
        } else {
            router
        }
    }

    /// The fully layered router, for serving or driving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            cors_enabled = self.config.security.cors_enabled,
            health_check_enabled = self.config.security.health_check_enabled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

//! Shared utilities for integration tests.

use axum::{
    body::Bytes,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use events_relay::config::relay::{ENTRY_MAP_VAR, SECRET_VAR, TARGET_URL_VAR};
use events_relay::config::{MapEnv, ServerConfig};
use events_relay::relay::FormClient;
use events_relay::{HttpServer, Shutdown};

pub const SECRET: &str = "s3cret";

/// One request seen by the mock form service.
#[derive(Debug, Clone)]
pub struct Captured {
    pub content_type: Option<String>,
    pub body: String,
}

impl Captured {
    /// Decoded form pairs, in order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.pairs().into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// Mock form service answering `POST /formResponse` with a fixed status.
pub struct MockFormService {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl MockFormService {
    pub async fn start(status: u16, body: &'static str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    /// Like [`MockFormService::start`], but holds each answer for `delay`
    /// after the request has been captured.
    pub async fn start_with_delay(status: u16, body: &'static str, delay: Duration) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();

        let app = Router::new().route(
            "/formResponse",
            post(move |headers: HeaderMap, payload: Bytes| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push(Captured {
                        content_type: headers
                            .get("content-type")
                            .and_then(|v| v.to_str().ok())
                            .map(String::from),
                        body: String::from_utf8_lossy(&payload).into_owned(),
                    });
                    tokio::time::sleep(delay).await;
                    (StatusCode::from_u16(status).unwrap(), body)
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, captured }
    }

    pub fn url(&self) -> String {
        format!("http://{}/formResponse", self.addr)
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

/// Relay environment pointing at `target_url`.
pub fn relay_env(target_url: &str, entry_map: &str) -> MapEnv {
    MapEnv::new()
        .with(SECRET_VAR, SECRET)
        .with(TARGET_URL_VAR, target_url)
        .with(ENTRY_MAP_VAR, entry_map)
}

/// A running relay bound to an ephemeral port.
pub struct RunningRelay {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl RunningRelay {
    pub async fn start(config: ServerConfig, env: MapEnv) -> Self {
        let form_client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(config.timeouts.relay_secs))
            .build()
            .unwrap();
        let server = HttpServer::with_client(config, Arc::new(env), FormClient::from_client(form_client));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        // Listener is already bound; this only lets the accept loop spin up.
        tokio::time::sleep(Duration::from_millis(50)).await;

        Self { addr, shutdown }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for RunningRelay {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

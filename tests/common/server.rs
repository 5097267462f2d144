//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own databases, talking to its
//! own stub of the external jobs API.

use super::constants::*;
use super::fixtures::{create_test_db_dir, external_jobs_payload};
use axum::{http::StatusCode, routing::get, Json, Router};
use jobboard_server::server::{server::make_app, RequestsLoggingLevel, ServerConfig};
use jobboard_server::{HttpExternalJobSource, SqliteJobStore, SqliteUserStore};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

async fn serve_in_background(listener: TcpListener, app: Router) -> tokio::sync::oneshot::Sender<()> {
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .expect("Server failed");
    });
    shutdown_tx
}

/// Stand-in for the external jobs API, serving a fixed answer at `/jobs`.
pub struct StubExternalApi {
    pub url: String,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl StubExternalApi {
    /// Serves `payload` with status 200.
    pub async fn serving(payload: Value) -> Self {
        Self::spawn(Router::new().route(
            "/jobs",
            get(move || {
                let payload = payload.clone();
                async move { Json(payload) }
            }),
        ))
        .await
    }

    /// Answers every request with a 503.
    pub async fn failing() -> Self {
        Self::spawn(Router::new().route(
            "/jobs",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        ))
        .await
    }

    /// Answers only after the server's external timeout has passed.
    pub async fn slow() -> Self {
        Self::spawn(Router::new().route(
            "/jobs",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(EXTERNAL_TIMEOUT_SECS + 2)).await;
                Json(serde_json::json!([]))
            }),
        ))
        .await
    }

    async fn spawn(app: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub external API");
        let addr = listener.local_addr().expect("Failed to get local address");
        let shutdown_tx = serve_in_background(listener, app).await;
        Self {
            url: format!("http://{}/jobs", addr),
            _shutdown_tx: Some(shutdown_tx),
        }
    }
}

impl Drop for StubExternalApi {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Test server instance with isolated databases
///
/// When dropped, the server and its external API stub shut down and the
/// temp databases are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    // Kept alive until drop
    _external_api: StubExternalApi,
    _temp_db_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server on a random port, seeded with the fixture jobs and
    /// user, with an external API serving the fixture payload.
    pub async fn spawn() -> Self {
        Self::spawn_with_external(StubExternalApi::serving(external_jobs_payload()).await).await
    }

    /// Spawns a server talking to the given external API stub.
    ///
    /// # Panics
    ///
    /// Panics if the fixtures cannot be created, the port cannot be bound or
    /// the server doesn't become ready within timeout.
    pub async fn spawn_with_external(external_api: StubExternalApi) -> Self {
        let temp_db_dir = create_test_db_dir().expect("Failed to create test databases");

        let job_store = Arc::new(
            SqliteJobStore::new(temp_db_dir.path().join("jobs.db"))
                .expect("Failed to open job store"),
        );
        let user_store = Arc::new(
            SqliteUserStore::new(temp_db_dir.path().join("user.db"))
                .expect("Failed to open user store"),
        );
        let external_source = Arc::new(
            HttpExternalJobSource::new(external_api.url.clone(), EXTERNAL_TIMEOUT_SECS)
                .expect("Failed to create external source"),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
        };
        let app = make_app(config, job_store, user_store, external_source);
        let shutdown_tx = serve_in_background(listener, app).await;

        let server = Self {
            base_url,
            port,
            _external_api: external_api,
            _temp_db_dir: temp_db_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the home endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

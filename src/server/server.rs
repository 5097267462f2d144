use anyhow::{Context, Result};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::info;

use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::{jobs_routes::jobs_routes, log_requests, state::*, users_routes::users_routes, ServerConfig};
use crate::aggregation::JobAggregator;
use crate::external::ExternalJobSource;
use crate::job::JobStore;
use crate::user::{UserManager, UserStore};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(stats)
}

impl ServerState {
    fn new(
        config: ServerConfig,
        job_store: Arc<dyn JobStore>,
        user_store: Arc<dyn UserStore>,
        external_source: Arc<dyn ExternalJobSource>,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            job_aggregator: JobAggregator::new(job_store.clone(), external_source),
            job_store,
            user_manager: UserManager::new(user_store),
        }
    }
}

pub fn make_app(
    config: ServerConfig,
    job_store: Arc<dyn JobStore>,
    user_store: Arc<dyn UserStore>,
    external_source: Arc<dyn ExternalJobSource>,
) -> Router {
    let state = ServerState::new(config, job_store, user_store, external_source);

    let api_routes: Router<ServerState> = Router::new()
        .nest("/jobs", jobs_routes())
        .nest("/users", users_routes());

    Router::new()
        .route("/", get(home))
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server...");
}

pub async fn run_server(
    config: ServerConfig,
    job_store: Arc<dyn JobStore>,
    user_store: Arc<dyn UserStore>,
    external_source: Arc<dyn ExternalJobSource>,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, job_store, user_store, external_source);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

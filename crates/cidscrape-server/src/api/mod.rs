//! Read API server

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::{future::Future, net::SocketAddr, time::Duration};
use tokio::signal;
use tracing::info;

use crate::config::ServerConfig;
use crate::features;
use crate::middleware;
use crate::store::SharedStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

/// Build the application router over `store`
pub fn create_router(store: SharedStore) -> Router {
    let state = AppState {
        store: store.clone(),
    };
    let feature_routes = features::router(features::FeatureState { store });

    Router::new()
        .route("/health", get(health_check))
        .with_state(state)
        .merge(feature_routes)
        .layer(middleware::tracing_layer())
}

async fn health_check(State(state): State<AppState>) -> Response {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "healthy" }))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Serve the read API until `shutdown` resolves
pub async fn serve<F>(config: &ServerConfig, store: SharedStore, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, create_router(store))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM, then waits briefly for open connections
pub async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting graceful shutdown"),
        _ = terminate => info!("Received terminate signal, starting graceful shutdown"),
    }

    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::connector::api::Container;

use super::handlers::{chat, index, AppState};

/// Build the HTTP application: `GET /` and `POST /chat`.
pub fn app(container: &Container) -> axum::Router {
    let state = AppState {
        chat: Arc::new(container.chat_use_case()),
    };

    axum::Router::new()
        .route("/", get(index))
        .route("/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(container: &Container, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Chat server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(container))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Chat server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}

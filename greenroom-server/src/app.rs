use crate::config::ServerConfig;
use crate::relay::{SignalingRelay, ws_handler};
use axum::{Router, routing::get};

/// Build the HTTP surface: the signaling WebSocket plus a health
/// probe, with CORS taken from the host configuration.
pub fn app(relay: SignalingRelay, config: &ServerConfig) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(config.cors_layer())
        .with_state(relay)
}

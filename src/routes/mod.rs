// HTTP + WebSocket routes

mod http;
mod ws;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};

use crate::fleet::FleetAggregator;
use crate::models::FlotaSnapshot;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) flota_tx: broadcast::Sender<FlotaSnapshot>,
    pub(crate) aggregator: Arc<FleetAggregator>,
    pub(crate) ws_flota_connections: Arc<AtomicUsize>,
}

pub fn app(
    flota_tx: broadcast::Sender<FlotaSnapshot>,
    aggregator: Arc<FleetAggregator>,
    ws_flota_connections: Arc<AtomicUsize>,
) -> Router {
    let state = AppState {
        flota_tx,
        aggregator,
        ws_flota_connections,
    };
    Router::new()
        .route("/", get(|| async { "Flotaserver: live fleet tracking" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/flota", get(http::flota_handler)) // GET /api/flota
        .route("/api/flota/refresh", post(http::flota_refresh_handler)) // POST /api/flota/refresh
        .route("/ws/flota", get(ws::ws_flota)) // WS /ws/flota
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

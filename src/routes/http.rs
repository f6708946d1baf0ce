// GET/POST handlers: version, api/flota, manual refresh

use axum::{extract::State, response::IntoResponse};
use serde::Serialize;

use super::AppState;
use crate::fleet::FleetAggregator;
use crate::models::{FleetEntry, FleetStatus};
use crate::version::{NAME, VERSION};

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlotaResponse {
    status: FleetStatus,
    loading: bool,
    fleet: Vec<FleetEntry>,
}

async fn flota_response(aggregator: &FleetAggregator) -> axum::Json<FlotaResponse> {
    let status = aggregator.status().await;
    axum::Json(FlotaResponse {
        status,
        loading: status == FleetStatus::Loading,
        fleet: aggregator.snapshot().await,
    })
}

/// GET /api/flota — current published fleet list plus aggregator state.
pub(super) async fn flota_handler(State(state): State<AppState>) -> impl IntoResponse {
    flota_response(&state.aggregator).await
}

/// POST /api/flota/refresh — out-of-band refresh without waiting for the
/// timer. When initialization failed (or never ran) this re-invokes it.
pub(super) async fn flota_refresh_handler(State(state): State<AppState>) -> impl IntoResponse {
    let aggregator = &state.aggregator;
    match aggregator.status().await {
        FleetStatus::Ready => aggregator.refresh_positions().await,
        FleetStatus::Loading | FleetStatus::Errored => {
            if let Err(e) = aggregator.initialize().await {
                tracing::warn!(error = %e, operation = "manual_refresh", "re-initialization failed");
            }
        }
    }
    flota_response(aggregator).await
}

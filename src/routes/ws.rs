// WebSocket handler and stream logic for the live fleet feed

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use bytes::Bytes;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::broadcast;
use tokio::time::{Duration, timeout};

use super::AppState;
use crate::fleet::FleetAggregator;
use crate::models::FlotaSnapshot;

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Decrements ws_flota connection count on drop (connect = +1, drop = -1).
struct WsFlotaGuard(Arc<AtomicUsize>);

impl Drop for WsFlotaGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, std::sync::atomic::Ordering::Relaxed);
    }
}

pub(super) async fn ws_flota(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let tx = state.flota_tx.clone();
    let conn_count = state.ws_flota_connections.clone();
    let aggregator = state.aggregator.clone();
    ws.on_upgrade(move |socket| async move {
        let mut rx = tx.subscribe();
        if let Err(e) = stream_flota(socket, &mut rx, conn_count, aggregator).await {
            tracing::info!("Fleet stream error: {}", e);
        }
    })
}

async fn stream_flota(
    mut socket: WebSocket,
    rx: &mut broadcast::Receiver<FlotaSnapshot>,
    conn_count: Arc<AtomicUsize>,
    aggregator: Arc<FleetAggregator>,
) -> anyhow::Result<()> {
    conn_count.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    let _guard = WsFlotaGuard(conn_count);
    tracing::info!("Client connected to fleet stream");

    // Welcome frame carries the current list so the map renders before the first cycle lands.
    let welcome = serde_json::json!({ "type": "info", "fleet": aggregator.snapshot().await });
    let welcome_json = serde_json::to_string(&welcome)?;
    let r = timeout(
        WS_SEND_TIMEOUT,
        socket.send(Message::Text(welcome_json.into())),
    )
    .await;
    if r.is_err() || r.unwrap_or(Ok(())).is_err() {
        return Ok(());
    }

    let mut ping_interval = tokio::time::interval(WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(snapshot) => {
                        let json = serde_json::to_string(&snapshot)?;
                        let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Text(json.into()))).await;
                        if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("WebSocket /ws/flota client lagged, skipped {} messages", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Ping(Bytes::new()))).await;
                if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                    break;
                }
            }
        }
    }
    Ok(())
}

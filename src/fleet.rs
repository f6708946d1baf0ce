// Fleet aggregator: builds the base roster once (vehicles ⋈ drivers,
// enriched with static tracker info), then refreshes live position fields
// per cycle. Each cycle recomputes from the immutable base roster and
// publishes a full replacement list only after every lookup settled.

use crate::backend_repo::FleetBackend;
use crate::models::{
    Conductor, FleetEntry, FleetStatus, FlotaSnapshot, Ubicacion, VehicleBase,
    conductor_display_name,
};
use crate::tracker_repo::TrackerApi;
use futures_util::future;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::{RwLock, broadcast};
use tokio::time::Instant;

/// Rate limit for "no receivers" logging (avoid logging every cycle when no one is on /ws/flota)
const NO_RECEIVERS_DEBUG_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

pub struct FleetAggregator {
    backend: Arc<dyn FleetBackend>,
    tracker: Arc<dyn TrackerApi>,
    base: RwLock<Vec<VehicleBase>>,
    fleet: RwLock<Vec<FleetEntry>>,
    status: RwLock<FleetStatus>,
    tx: broadcast::Sender<FlotaSnapshot>,
    /// Next cycle id; cycles settle out of order when durations vary.
    cycle_seq: AtomicU64,
    /// Newest cycle already published; older cycles that settle later are discarded.
    published_seq: AtomicU64,
    closed: AtomicBool,
    cycles_published_total: AtomicU64,
    last_no_receivers_debug: std::sync::Mutex<Option<Instant>>,
}

impl FleetAggregator {
    pub fn new(
        backend: Arc<dyn FleetBackend>,
        tracker: Arc<dyn TrackerApi>,
        tx: broadcast::Sender<FlotaSnapshot>,
    ) -> Self {
        Self {
            backend,
            tracker,
            base: RwLock::new(Vec::new()),
            fleet: RwLock::new(Vec::new()),
            status: RwLock::new(FleetStatus::Loading),
            tx,
            cycle_seq: AtomicU64::new(0),
            published_seq: AtomicU64::new(0),
            closed: AtomicBool::new(false),
            cycles_published_total: AtomicU64::new(0),
            last_no_receivers_debug: std::sync::Mutex::new(None),
        }
    }

    /// Builds the base roster and triggers one immediate refresh so live
    /// fields are populated before the first timer tick.
    ///
    /// A failing vehicles or drivers fetch fails the whole operation and
    /// leaves the aggregator `errored` (no automatic retry; a manual
    /// refresh re-invokes this). Per-vehicle static tracker failures are
    /// logged and leave vehiculo_track unset.
    pub async fn initialize(&self) -> anyhow::Result<()> {
        if self.closed.load(Ordering::Relaxed) {
            anyhow::bail!("fleet aggregator is closed");
        }
        *self.status.write().await = FleetStatus::Loading;

        let (vehicles, drivers) = match tokio::try_join!(
            self.backend.list_vehicles(),
            self.backend.list_drivers()
        ) {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!(error = %e, operation = "initialize", "fleet initialization failed");
                *self.status.write().await = FleetStatus::Errored;
                return Err(e.context("fleet initialization"));
            }
        };

        let drivers_by_id: HashMap<i64, Conductor> =
            drivers.into_iter().map(|d| (d.id, d)).collect();

        let devices = future::join_all(
            vehicles
                .iter()
                .map(|v| self.tracker.get_static_info(v.id)),
        )
        .await;

        let base: Vec<VehicleBase> = vehicles
            .iter()
            .zip(devices)
            .map(|(v, device)| {
                let vehiculo_track = match device {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            vehicle_id = v.id,
                            operation = "get_static_info",
                            "tracker static info failed; continuing without device metadata"
                        );
                        None
                    }
                };
                let conductor = v.id_conductor.and_then(|id| drivers_by_id.get(&id));
                VehicleBase {
                    id: v.id,
                    patente: v.patente.clone(),
                    marca: v.marca.clone(),
                    modelo: v.modelo.clone(),
                    conductor_nombre: conductor_display_name(conductor),
                    vehiculo_track,
                }
            })
            .collect();

        let initial: Vec<FleetEntry> = base.iter().map(FleetEntry::sin_senal).collect();
        tracing::info!(vehicles = base.len(), operation = "initialize", "fleet roster built");

        *self.base.write().await = base;
        *self.fleet.write().await = initial;
        *self.status.write().await = FleetStatus::Ready;

        self.refresh_positions().await;
        Ok(())
    }

    /// One refresh cycle: look up every base-roster vehicle concurrently,
    /// wait for all lookups to settle, then replace the published list
    /// atomically. Per-vehicle failures become OFFLINE entries and never
    /// reject the cycle. No-op when the roster is empty or after close().
    pub async fn refresh_positions(&self) {
        if self.closed.load(Ordering::Relaxed) {
            return;
        }
        let base: Vec<VehicleBase> = self.base.read().await.clone();
        if base.is_empty() {
            return;
        }
        let seq = self.cycle_seq.fetch_add(1, Ordering::Relaxed) + 1;

        let entries = future::join_all(base.iter().map(|entry| async move {
            let ubicacion = match self.tracker.get_current_position(entry.id).await {
                Ok(Some(reading)) => Ubicacion::from_reading(reading),
                Ok(None) => None,
                Err(e) => {
                    tracing::debug!(
                        error = %e,
                        vehicle_id = entry.id,
                        operation = "get_current_position",
                        "position lookup failed; marking OFFLINE"
                    );
                    None
                }
            };
            FleetEntry::from_lookup(entry, ubicacion)
        }))
        .await;

        self.publish(seq, entries).await;
    }

    async fn publish(&self, seq: u64, entries: Vec<FleetEntry>) {
        if self.closed.load(Ordering::Relaxed) {
            tracing::debug!(cycle = seq, "aggregator closed; discarding settled cycle");
            return;
        }
        {
            let mut fleet = self.fleet.write().await;
            let newest = self.published_seq.load(Ordering::Acquire);
            if seq <= newest {
                tracing::debug!(
                    cycle = seq,
                    newest_published = newest,
                    "cycle settled after a newer one published; discarded"
                );
                return;
            }
            self.published_seq.store(seq, Ordering::Release);
            *fleet = entries.clone();
        }
        self.cycles_published_total.fetch_add(1, Ordering::Relaxed);

        let snapshot = FlotaSnapshot {
            timestamp: epoch_ms(),
            entries,
        };
        if self.tx.send(snapshot).is_err()
            && let Ok(mut last) = self.last_no_receivers_debug.lock()
        {
            let should_log =
                last.is_none_or(|t| t.elapsed() >= NO_RECEIVERS_DEBUG_INTERVAL);
            if should_log {
                tracing::debug!(
                    operation = "broadcast_snapshot",
                    "no active WebSocket clients; broadcast channel has no receivers"
                );
                *last = Some(Instant::now());
            }
        }
    }

    /// Current published list (cloned immutable snapshot).
    pub async fn snapshot(&self) -> Vec<FleetEntry> {
        self.fleet.read().await.clone()
    }

    pub async fn status(&self) -> FleetStatus {
        *self.status.read().await
    }

    pub async fn loading(&self) -> bool {
        self.status().await == FleetStatus::Loading
    }

    pub async fn fleet_size(&self) -> usize {
        self.fleet.read().await.len()
    }

    pub fn refresh_cycles_total(&self) -> u64 {
        self.cycles_published_total.load(Ordering::Relaxed)
    }

    /// Stops the aggregator: no cycle starts after this, and a cycle
    /// already in flight discards its result instead of publishing.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Relaxed);
    }
}

fn epoch_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, operation = "get_timestamp", "system time error");
            0
        })
}

// Background polling worker: drives the fleet aggregator on a fixed
// period until shutdown. The aggregator owns publication; this task owns
// the timer, periodic app-stats logging, and teardown.

use crate::fleet::FleetAggregator;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::time::{Duration, interval};

/// Aggregator, counters, and shutdown for the worker.
pub struct WorkerDeps {
    pub aggregator: Arc<FleetAggregator>,
    pub ws_flota_connections: Arc<AtomicUsize>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

/// Worker timing and logging config.
/// Stats logging uses a real-time interval, independent of refresh_interval_secs.
pub struct WorkerConfig {
    pub refresh_interval_secs: u64,
    /// How often to log app stats (real seconds).
    pub stats_log_interval_secs: u64,
}

pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        aggregator,
        ws_flota_connections,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        refresh_interval_secs,
        stats_log_interval_secs,
    } = config;

    tokio::spawn(async move {
        let mut tick = interval(Duration::from_secs(refresh_interval_secs));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let worker_span = tracing::span!(tracing::Level::DEBUG, "worker", refresh_interval_secs);
        let _guard = worker_span.enter();

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    aggregator.refresh_positions().await;
                }
                _ = &mut shutdown_rx => {
                    aggregator.close();
                    tracing::debug!("Worker shutting down");
                    break;
                }
                _ = stats_log_tick.tick() => {
                    let fleet_size = aggregator.fleet_size().await;
                    tracing::info!(
                        ws_flota_clients =
                            ws_flota_connections.load(std::sync::atomic::Ordering::Relaxed),
                        fleet_size,
                        refresh_cycles_total = aggregator.refresh_cycles_total(),
                        "app stats"
                    );
                }
            }
        }
    })
}

// Shared test helpers: mock clients and sample data builders

use flotaserver::backend_repo::FleetBackend;
use flotaserver::models::{Conductor, PosicionActual, TrackerDevice, Vehiculo};
use flotaserver::tracker_repo::{TrackerApi, TrackerError};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::time::Duration;

#[derive(Default)]
pub struct MockBackend {
    pub vehicles: Vec<Vehiculo>,
    pub drivers: Vec<Conductor>,
    pub fail_vehicles: bool,
    pub fail_drivers: bool,
}

#[async_trait::async_trait]
impl FleetBackend for MockBackend {
    async fn list_vehicles(&self) -> anyhow::Result<Vec<Vehiculo>> {
        if self.fail_vehicles {
            anyhow::bail!("mock: vehicles endpoint down");
        }
        Ok(self.vehicles.clone())
    }

    async fn list_drivers(&self) -> anyhow::Result<Vec<Conductor>> {
        if self.fail_drivers {
            anyhow::bail!("mock: drivers endpoint down");
        }
        Ok(self.drivers.clone())
    }
}

/// Scriptable tracker: per-vehicle devices and positions, per-vehicle
/// failure sets, an optional settle delay (applied after the position is
/// read, to simulate slow in-flight lookups), and a call counter.
#[derive(Default)]
pub struct MockTracker {
    pub devices: HashMap<i64, TrackerDevice>,
    pub fail_static: HashSet<i64>,
    pub positions: Mutex<HashMap<i64, PosicionActual>>,
    pub fail_position: Mutex<HashSet<i64>>,
    pub position_delay: Mutex<Option<Duration>>,
    pub position_calls: AtomicU64,
}

impl MockTracker {
    pub fn set_position(&self, vehicle_id: i64, reading: PosicionActual) {
        self.positions.lock().unwrap().insert(vehicle_id, reading);
    }

    pub fn clear_position(&self, vehicle_id: i64) {
        self.positions.lock().unwrap().remove(&vehicle_id);
    }

    pub fn fail_position_for(&self, vehicle_id: i64) {
        self.fail_position.lock().unwrap().insert(vehicle_id);
    }

    pub fn set_position_delay(&self, delay: Option<Duration>) {
        *self.position_delay.lock().unwrap() = delay;
    }

    pub fn position_calls(&self) -> u64 {
        self.position_calls.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl TrackerApi for MockTracker {
    async fn get_static_info(
        &self,
        vehicle_id: i64,
    ) -> Result<Option<TrackerDevice>, TrackerError> {
        if self.fail_static.contains(&vehicle_id) {
            return Err(TrackerError::Status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                format!("mock static info for {vehicle_id}"),
            ));
        }
        Ok(self.devices.get(&vehicle_id).cloned())
    }

    async fn get_current_position(
        &self,
        vehicle_id: i64,
    ) -> Result<Option<PosicionActual>, TrackerError> {
        self.position_calls.fetch_add(1, Ordering::Relaxed);
        let failed = self.fail_position.lock().unwrap().contains(&vehicle_id);
        let reading = self.positions.lock().unwrap().get(&vehicle_id).cloned();
        let delay = *self.position_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if failed {
            return Err(TrackerError::Status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                format!("mock position for {vehicle_id}"),
            ));
        }
        Ok(reading)
    }
}

pub fn vehiculo(id: i64, patente: &str, id_conductor: Option<i64>) -> Vehiculo {
    Vehiculo {
        id,
        patente: patente.into(),
        marca: "Scania".into(),
        modelo: "R450".into(),
        id_conductor,
    }
}

pub fn conductor(id: i64, nombre: &str, apellido: &str) -> Conductor {
    Conductor {
        id,
        nombre: nombre.into(),
        apellido: apellido.into(),
    }
}

pub fn posicion(latitud: f64, longitud: f64, velocidad: f64) -> PosicionActual {
    PosicionActual {
        latitud: Some(latitud),
        longitud: Some(longitud),
        velocidad: Some(velocidad),
        rumbo: Some(90.0),
        timestamp: Some("2024-01-01T10:00:00Z".parse().unwrap()),
    }
}

pub fn device(id: i64, imei: &str) -> TrackerDevice {
    TrackerDevice {
        id,
        imei: imei.into(),
        modelo: Some("GT06N".into()),
        proveedor: Some("Concox".into()),
    }
}

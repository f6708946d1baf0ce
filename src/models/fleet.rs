// Fleet view models: base roster entries, live entries, broadcast snapshot

use serde::{Deserialize, Serialize};

use super::{Conductor, EstadoTracking, TrackerDevice, Ubicacion};

/// Speed above which a vehicle counts as moving (km/h).
pub const MOVEMENT_SPEED_THRESHOLD_KMH: f64 = 5.0;

/// Shown when no driver matches the vehicle's id_conductor.
const CONDUCTOR_SIN_ASIGNAR: &str = "Sin asignar";

/// Resolves the driver display name for a vehicle, falling back to the
/// unassigned sentinel.
pub fn conductor_display_name(conductor: Option<&Conductor>) -> String {
    conductor
        .map(Conductor::nombre_completo)
        .unwrap_or_else(|| CONDUCTOR_SIN_ASIGNAR.to_string())
}

/// Static half of a fleet entry. Built once per aggregator initialization;
/// membership and fields never change across refresh cycles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleBase {
    pub id: i64,
    pub patente: String,
    pub marca: String,
    pub modelo: String,
    pub conductor_nombre: String,
    /// None when the tracker service has no device for this vehicle.
    pub vehiculo_track: Option<TrackerDevice>,
}

/// One renderable fleet row: the static base merged with this cycle's
/// live fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetEntry {
    pub id: i64,
    pub patente: String,
    pub marca: String,
    pub modelo: String,
    pub conductor_nombre: String,
    pub vehiculo_track: Option<TrackerDevice>,
    pub ubicacion: Option<Ubicacion>,
    pub estado_tracking: EstadoTracking,
    pub en_movimiento: bool,
}

impl FleetEntry {
    /// Entry as published right after initialization, before any cycle ran.
    pub fn sin_senal(base: &VehicleBase) -> Self {
        Self::merge(base, None, EstadoTracking::SinSenal)
    }

    /// Entry for one completed lookup: a usable position means ONLINE,
    /// anything else means OFFLINE with live fields cleared.
    pub fn from_lookup(base: &VehicleBase, ubicacion: Option<Ubicacion>) -> Self {
        let estado = if ubicacion.is_some() {
            EstadoTracking::Online
        } else {
            EstadoTracking::Offline
        };
        Self::merge(base, ubicacion, estado)
    }

    fn merge(base: &VehicleBase, ubicacion: Option<Ubicacion>, estado: EstadoTracking) -> Self {
        let en_movimiento = ubicacion
            .as_ref()
            .is_some_and(|u| u.velocidad > MOVEMENT_SPEED_THRESHOLD_KMH);
        FleetEntry {
            id: base.id,
            patente: base.patente.clone(),
            marca: base.marca.clone(),
            modelo: base.modelo.clone(),
            conductor_nombre: base.conductor_nombre.clone(),
            vehiculo_track: base.vehiculo_track.clone(),
            ubicacion,
            estado_tracking: estado,
            en_movimiento,
        }
    }
}

/// Aggregator lifecycle state; `loading` maps to the consumer-facing
/// loading flag, `errored` is terminal until a manual re-initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FleetStatus {
    Loading,
    Ready,
    Errored,
}

/// Unit broadcast to /ws/flota subscribers after each published cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlotaSnapshot {
    pub timestamp: u64,
    pub entries: Vec<FleetEntry>,
}

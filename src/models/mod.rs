// Domain models (backend + tracker wire types, fleet view)

mod fleet;
mod tracker;
mod vehicle;

pub use fleet::{
    FleetEntry, FleetStatus, FlotaSnapshot, MOVEMENT_SPEED_THRESHOLD_KMH, VehicleBase,
    conductor_display_name,
};
pub use tracker::{EstadoTracking, PosicionActual, TrackerDevice, Ubicacion};
pub use vehicle::{Conductor, Vehiculo};

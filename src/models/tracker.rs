// Tracker microservice wire types and the validated position record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Static GPS device metadata; fetched once per vehicle at roster build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerDevice {
    pub id: i64,
    pub imei: String,
    #[serde(default)]
    pub modelo: Option<String>,
    #[serde(default)]
    pub proveedor: Option<String>,
}

/// Raw current-position reading. Devices report partial records; a reading
/// is only usable when both coordinates are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosicionActual {
    #[serde(default)]
    pub latitud: Option<f64>,
    #[serde(default)]
    pub longitud: Option<f64>,
    /// km/h
    #[serde(default)]
    pub velocidad: Option<f64>,
    /// Degrees clockwise from north.
    #[serde(default)]
    pub rumbo: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Position attached to a fleet entry; only built from usable readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ubicacion {
    pub latitud: f64,
    pub longitud: f64,
    pub velocidad: f64,
    pub rumbo: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Ubicacion {
    /// Validates a raw reading. Missing velocidad/rumbo default to 0;
    /// missing coordinates make the reading unusable.
    pub fn from_reading(reading: PosicionActual) -> Option<Self> {
        let latitud = reading.latitud?;
        let longitud = reading.longitud?;
        Some(Ubicacion {
            latitud,
            longitud,
            velocidad: reading.velocidad.unwrap_or(0.0),
            rumbo: reading.rumbo.unwrap_or(0.0),
            timestamp: reading.timestamp,
        })
    }
}

/// Live tracking state; serializes to the wire vocabulary (e.g. "SIN_SEÑAL").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstadoTracking {
    /// Never resolved a position since the roster was built.
    #[serde(rename = "SIN_SEÑAL")]
    SinSenal,
    /// Fresh position obtained this cycle.
    #[serde(rename = "ONLINE")]
    Online,
    /// Lookup failed or returned nothing usable this cycle.
    #[serde(rename = "OFFLINE")]
    Offline,
}

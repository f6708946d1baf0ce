// Vehicle and driver collections as the fleet backend serves them

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehiculo {
    pub id: i64,
    pub patente: String,
    pub marca: String,
    pub modelo: String,
    /// Foreign key to the assigned driver; None when the vehicle has no driver.
    #[serde(default)]
    pub id_conductor: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conductor {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
}

impl Conductor {
    /// Display name as rendered on the map popup.
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

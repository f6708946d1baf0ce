// Tracker microservice client: static device info and current positions

use crate::models::{PosicionActual, TrackerDevice};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("tracker request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("tracker returned {0} for {1}")]
    Status(reqwest::StatusCode, String),
}

/// Seam the aggregator does per-vehicle lookups through. Not-found is a
/// domain answer (no device / no signal), not an error.
#[async_trait::async_trait]
pub trait TrackerApi: Send + Sync {
    async fn get_static_info(
        &self,
        vehicle_id: i64,
    ) -> Result<Option<TrackerDevice>, TrackerError>;
    async fn get_current_position(
        &self,
        vehicle_id: i64,
    ) -> Result<Option<PosicionActual>, TrackerError>;
}

pub struct TrackerRepo {
    client: reqwest::Client,
    base_url: String,
}

impl TrackerRepo {
    pub fn connect(base_url: &str, request_timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_optional<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, TrackerError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(TrackerError::Status(status, url));
        }
        Ok(Some(response.json().await?))
    }
}

#[async_trait::async_trait]
impl TrackerApi for TrackerRepo {
    async fn get_static_info(
        &self,
        vehicle_id: i64,
    ) -> Result<Option<TrackerDevice>, TrackerError> {
        self.get_optional(&format!("/api/dispositivos/{vehicle_id}"))
            .await
    }

    async fn get_current_position(
        &self,
        vehicle_id: i64,
    ) -> Result<Option<PosicionActual>, TrackerError> {
        self.get_optional(&format!("/api/posiciones/{vehicle_id}/actual"))
            .await
    }
}

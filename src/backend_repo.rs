// Fleet backend client: vehicles and drivers collections over REST

use crate::models::{Conductor, Vehiculo};
use std::time::Duration;

/// Seam the aggregator pulls the entity collections through.
#[async_trait::async_trait]
pub trait FleetBackend: Send + Sync {
    async fn list_vehicles(&self) -> anyhow::Result<Vec<Vehiculo>>;
    async fn list_drivers(&self) -> anyhow::Result<Vec<Conductor>>;
}

pub struct BackendRepo {
    client: reqwest::Client,
    base_url: String,
}

impl BackendRepo {
    pub fn connect(base_url: &str, request_timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_collection<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> anyhow::Result<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        anyhow::ensure!(status.is_success(), "GET {} returned {}", url, status);
        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl FleetBackend for BackendRepo {
    async fn list_vehicles(&self) -> anyhow::Result<Vec<Vehiculo>> {
        self.get_collection("/api/vehiculos").await
    }

    async fn list_drivers(&self) -> anyhow::Result<Vec<Conductor>> {
        self.get_collection("/api/conductores").await
    }
}

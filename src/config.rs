use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub services: ServicesConfig,
    pub publishing: PublishingConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// External REST collaborators.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    pub backend_base_url: String,
    pub tracker_base_url: String,
    /// Per-request timeout; bounds how long one slow tracker device can stall a cycle.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    8
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishingConfig {
    /// Max number of fleet snapshots kept in the broadcast channel for /ws/flota (slow clients may lag).
    pub broadcast_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    pub refresh_interval_secs: u64,
    /// How often to log app stats (ws_flota clients, fleet size, cycles) at INFO level.
    pub stats_log_interval_secs: u64,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.services.backend_base_url.is_empty(),
            "services.backend_base_url must be non-empty"
        );
        anyhow::ensure!(
            !self.services.tracker_base_url.is_empty(),
            "services.tracker_base_url must be non-empty"
        );
        anyhow::ensure!(
            self.services.request_timeout_secs > 0,
            "services.request_timeout_secs must be > 0, got {}",
            self.services.request_timeout_secs
        );
        anyhow::ensure!(
            self.publishing.broadcast_capacity > 0,
            "publishing.broadcast_capacity must be > 0, got {}",
            self.publishing.broadcast_capacity
        );
        anyhow::ensure!(
            self.monitoring.refresh_interval_secs > 0,
            "monitoring.refresh_interval_secs must be > 0, got {}",
            self.monitoring.refresh_interval_secs
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        Ok(())
    }
}

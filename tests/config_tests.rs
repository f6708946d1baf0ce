// Config loading and validation tests

use flotaserver::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 8090
host = "0.0.0.0"

[services]
backend_base_url = "http://localhost:3000"
tracker_base_url = "http://localhost:4000"
request_timeout_secs = 8

[publishing]
broadcast_capacity = 16

[monitoring]
refresh_interval_secs = 10
stats_log_interval_secs = 60
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8090);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.services.backend_base_url, "http://localhost:3000");
    assert_eq!(config.services.tracker_base_url, "http://localhost:4000");
    assert_eq!(config.services.request_timeout_secs, 8);
    assert_eq!(config.publishing.broadcast_capacity, 16);
    assert_eq!(config.monitoring.refresh_interval_secs, 10);
}

#[test]
fn test_config_request_timeout_defaults_when_omitted() {
    let without = VALID_CONFIG.replace("request_timeout_secs = 8\n", "");
    let config = AppConfig::load_from_str(&without).expect("valid");
    assert_eq!(config.services.request_timeout_secs, 8);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8090", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_backend_url() {
    let bad = VALID_CONFIG.replace(
        "backend_base_url = \"http://localhost:3000\"",
        "backend_base_url = \"\"",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("backend_base_url"));
}

#[test]
fn test_config_validation_rejects_empty_tracker_url() {
    let bad = VALID_CONFIG.replace(
        "tracker_base_url = \"http://localhost:4000\"",
        "tracker_base_url = \"\"",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("tracker_base_url"));
}

#[test]
fn test_config_validation_rejects_request_timeout_zero() {
    let bad = VALID_CONFIG.replace("request_timeout_secs = 8", "request_timeout_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("request_timeout_secs"));
}

#[test]
fn test_config_validation_rejects_broadcast_capacity_zero() {
    let bad = VALID_CONFIG.replace("broadcast_capacity = 16", "broadcast_capacity = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("broadcast_capacity"));
}

#[test]
fn test_config_validation_rejects_refresh_interval_zero() {
    let bad = VALID_CONFIG.replace("refresh_interval_secs = 10", "refresh_interval_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("refresh_interval_secs"));
}

#[test]
fn test_config_validation_rejects_stats_log_interval_zero() {
    let bad = VALID_CONFIG.replace(
        "stats_log_interval_secs = 60",
        "stats_log_interval_secs = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("stats_log_interval_secs"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.server.port, 8090);
    assert_eq!(config.services.tracker_base_url, "http://localhost:4000");
}

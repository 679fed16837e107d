/// Upstream API constants to ensure consistency across the codebase

/// Base URL of the public global-warming.org API
pub const DEFAULT_API_BASE: &str = "https://global-warming.org/api";

// Endpoint paths relative to the API base
pub const TEMPERATURE_PATH: &str = "temperature-api";
pub const CO2_PATH: &str = "co2-api";
pub const METHANE_PATH: &str = "methane-api";
pub const NITROUS_OXIDE_PATH: &str = "nitrous-oxide-api";
pub const ARCTIC_PATH: &str = "arctic-api";

/// The arctic API reports missing months with this `anom` value
pub const ARCTIC_MISSING_SENTINEL: f64 = -9999.0;

// Environment overrides (see config.rs)
pub const ENV_CONFIG_PATH: &str = "CLIMATRACK_CONFIG";
pub const ENV_API_BASE: &str = "CLIMATRACK_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "CLIMATRACK_TIMEOUT_SECS";
pub const ENV_BIND: &str = "CLIMATRACK_BIND";
pub const ENV_LOG_DIR: &str = "CLIMATRACK_LOG_DIR";
pub const ENV_METRICS_ADDR: &str = "CLIMATRACK_METRICS_ADDR";

pub const DEFAULT_CONFIG_FILE: &str = "climatrack.toml";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Join an API base and an endpoint path
pub fn endpoint_url(api_base: &str, path: &str) -> String {
    format!("{}/{}", api_base.trim_end_matches('/'), path)
}

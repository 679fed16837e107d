use crate::constants::{
    DEFAULT_API_BASE, DEFAULT_BIND, DEFAULT_CONFIG_FILE, DEFAULT_LOG_DIR, ENV_API_BASE, ENV_BIND,
    ENV_CONFIG_PATH, ENV_LOG_DIR, ENV_METRICS_ADDR, ENV_TIMEOUT_SECS,
};
use crate::error::{ClimateError, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Unset means requests never time out
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_LOG_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub addr: Option<String>,
}

impl Config {
    /// Load `climatrack.toml` (or `$CLIMATRACK_CONFIG`), then apply environment overrides
    pub fn load() -> Result<Self> {
        let path = std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let mut config = Self::load_from(Path::new(&path))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// A missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            ClimateError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(ENV_API_BASE) {
            self.api.base_url = base;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = secs.trim().parse().map_err(|e| {
                ClimateError::Config(format!("{} must be a whole number of seconds: {}", ENV_TIMEOUT_SECS, e))
            })?;
            self.api.timeout_seconds = Some(secs);
        }
        if let Some(bind) = lookup(ENV_BIND) {
            self.server.bind = bind;
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            self.logging.dir = dir;
        }
        if let Some(addr) = lookup(ENV_METRICS_ADDR) {
            self.metrics.addr = Some(addr);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.api.timeout_seconds.map(Duration::from_secs)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        parse_addr(&self.server.bind)
    }

    pub fn metrics_addr(&self) -> Result<Option<SocketAddr>> {
        self.metrics.addr.as_deref().map(parse_addr).transpose()
    }
}

fn parse_addr(addr: &str) -> Result<SocketAddr> {
    addr.parse()
        .map_err(|e| ClimateError::Config(format!("Invalid socket address '{}': {}", addr, e)))
}

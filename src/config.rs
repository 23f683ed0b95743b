use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::models::ServiceSpec;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// A service list that cannot be monitored
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no services configured")]
    Empty,
    #[error("service '{name}' has invalid port 0")]
    InvalidPort { name: String },
    #[error("service #{index} is missing its {field}")]
    MissingField { index: usize, field: &'static str },
    #[error("timeout must be at least 1 ms")]
    InvalidTimeout,
}

/// Checks a service list before any probing starts
pub fn validate_services(services: &[ServiceSpec]) -> Result<(), ConfigError> {
    if services.is_empty() {
        return Err(ConfigError::Empty);
    }

    for (index, service) in services.iter().enumerate() {
        if service.name.trim().is_empty() {
            return Err(ConfigError::MissingField { index, field: "name" });
        }
        if service.process.trim().is_empty() {
            return Err(ConfigError::MissingField { index, field: "process token" });
        }
        if service.port == 0 {
            return Err(ConfigError::InvalidPort { name: service.name.clone() });
        }
    }

    Ok(())
}

/// Monitor configuration file (JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "ServiceSpec::defaults")]
    pub services: Vec<ServiceSpec>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            services: ServiceSpec::defaults(),
        }
    }
}

impl MonitorConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: MonitorConfig = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        validate_services(&self.services)
    }
}

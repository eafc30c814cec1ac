//! Server settings read from the environment.

use site_analysis_dashboard::FetchConfig;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ServerConfigError {
    #[error("Invalid PORT value {0:?}")]
    InvalidPort(String),
    #[error("Invalid SIMULATED_LATENCY value {0:?} (expected on or off)")]
    InvalidLatencyToggle(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Whether responses wait for the per-bundle fetch latency.
    pub simulated_latency: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            simulated_latency: true,
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `PORT` and `SIMULATED_LATENCY`.
    ///
    /// # Errors
    ///
    /// * If `PORT` is not a valid port number
    /// * If `SIMULATED_LATENCY` is not a recognized on/off value
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable source.
    ///
    /// # Errors
    ///
    /// * If `PORT` is not a valid port number
    /// * If `SIMULATED_LATENCY` is not a recognized on/off value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerConfigError> {
        let defaults = Self::default();

        let bind_addr = lookup("BIND_ADDR").unwrap_or(defaults.bind_addr);
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ServerConfigError::InvalidPort(value))?,
            None => defaults.port,
        };
        let simulated_latency = match lookup("SIMULATED_LATENCY") {
            Some(value) => parse_toggle(&value)
                .ok_or(ServerConfigError::InvalidLatencyToggle(value))?,
            None => defaults.simulated_latency,
        };

        Ok(Self {
            bind_addr,
            port,
            simulated_latency,
        })
    }

    #[must_use]
    pub fn fetch_config(&self) -> FetchConfig {
        if self.simulated_latency {
            FetchConfig::embedded()
        } else {
            FetchConfig::instant()
        }
    }
}

fn parse_toggle(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

//! Server configuration.

use std::time::Duration;

/// Exchange-rate provider configuration.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the provider's latest-rates endpoint.
    pub api_url: String,
    /// API key. Secret: never logged.
    pub api_key: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.exchangeratesapi.io/v1/latest".to_string(),
            api_key: String::new(),
        }
    }
}

/// Main server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub listen_addr: String,
    /// Listen port.
    pub listen_port: u16,
    /// Currency all cached rates are expressed against.
    pub base_currency: String,
    /// Provider configuration.
    pub provider: ProviderConfig,
    /// Time between refresh ticks.
    pub refresh_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0".to_string(),
            listen_port: 8080,
            base_currency: "EUR".to_string(),
            provider: ProviderConfig::default(),
            refresh_interval: Duration::from_millis(3_600_000),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("RATEHUB_LISTEN_ADDR") {
            config.listen_addr = addr;
        }

        if let Ok(port) = std::env::var("RATEHUB_LISTEN_PORT") {
            if let Ok(port) = port.parse() {
                config.listen_port = port;
            }
        }

        if let Ok(base) = std::env::var("BASE_CURRENCY") {
            config.base_currency = base;
        }

        if let Ok(url) = std::env::var("EXCHANGE_API_URL") {
            config.provider.api_url = url;
        }

        if let Ok(key) = std::env::var("EXCHANGE_API_KEY") {
            config.provider.api_key = key;
        }

        if let Ok(secs) = std::env::var("REFRESH_INTERVAL_SECS") {
            if let Ok(secs) = secs.parse() {
                config.refresh_interval = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_port == 0 {
            return Err("Listen port cannot be 0".to_string());
        }

        if self.base_currency.trim().is_empty() {
            return Err("Base currency cannot be empty".to_string());
        }

        if self.provider.api_url.is_empty() {
            return Err("Provider API URL cannot be empty".to_string());
        }

        if self.refresh_interval.is_zero() {
            return Err("Refresh interval cannot be zero".to_string());
        }

        Ok(())
    }
}

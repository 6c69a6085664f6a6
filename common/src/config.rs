use std::fmt;
use std::time::Duration;
use crate::error::{GatewayError, Result};

pub const DEFAULT_THINGSPEAK_URL: &str = "https://api.thingspeak.com/update.json";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_FORWARD_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct Config {
    /// Hex P-256 scalar for the gateway's static key.
    pub server_private_key: String,
    pub thingspeak_api_key: String,
    pub thingspeak_url: String,
    pub bind_address: String,
    pub port: u16,
    pub forward_timeout: Duration,
}

impl Config {
    /// Loads from the process environment, after applying `.env` if present.
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenv::dotenv() {
            log::debug!("Loaded environment overrides from {}", path.display());
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| GatewayError::ConfigError(format!("{} is not set", name)))
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>()
                .map_err(|e| GatewayError::ConfigError(format!("PORT {:?} is invalid: {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match lookup("FORWARD_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| GatewayError::ConfigError(format!(
                    "FORWARD_TIMEOUT_SECS {:?} must be a positive integer", raw
                )))?,
            None => DEFAULT_FORWARD_TIMEOUT_SECS,
        };

        Ok(Self {
            server_private_key: required("SERVER_PRIVATE_KEY")?,
            thingspeak_api_key: required("THINGSPEAK_API_KEY")?,
            thingspeak_url: lookup("THINGSPEAK_URL")
                .unwrap_or_else(|| DEFAULT_THINGSPEAK_URL.to_string()),
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port,
            forward_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_private_key", &"[REDACTED]")
            .field("thingspeak_api_key", &"[REDACTED]")
            .field("thingspeak_url", &self.thingspeak_url)
            .field("bind_address", &self.bind_address)
            .field("port", &self.port)
            .field("forward_timeout", &self.forward_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_PRIVATE_KEY", "01"),
            ("THINGSPEAK_API_KEY", "ABC123"),
        ])).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.thingspeak_url, DEFAULT_THINGSPEAK_URL);
        assert_eq!(config.forward_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_PRIVATE_KEY", "01"),
            ("THINGSPEAK_API_KEY", "ABC123"),
            ("PORT", "8081"),
            ("BIND_ADDRESS", "127.0.0.1"),
            ("FORWARD_TIMEOUT_SECS", "3"),
            ("THINGSPEAK_URL", "http://localhost:9000/update.json"),
        ])).unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.forward_timeout, Duration::from_secs(3));
        assert_eq!(config.thingspeak_url, "http://localhost:9000/update.json");
    }

    #[test]
    fn test_missing_required_values() {
        let err = Config::from_lookup(lookup_from(&[("THINGSPEAK_API_KEY", "k")])).unwrap_err();
        assert!(err.to_string().contains("SERVER_PRIVATE_KEY"));

        let err = Config::from_lookup(lookup_from(&[("SERVER_PRIVATE_KEY", "01")])).unwrap_err();
        assert!(err.to_string().contains("THINGSPEAK_API_KEY"));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let base = [("SERVER_PRIVATE_KEY", "01"), ("THINGSPEAK_API_KEY", "k")];

        let mut pairs = base.to_vec();
        pairs.push(("PORT", "seventy"));
        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());

        let mut pairs = base.to_vec();
        pairs.push(("FORWARD_TIMEOUT_SECS", "0"));
        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_PRIVATE_KEY", "deadbeef"),
            ("THINGSPEAK_API_KEY", "SECRETKEY"),
        ])).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("deadbeef"));
        assert!(!rendered.contains("SECRETKEY"));
    }
}

//! Server settings read from the environment.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::error::{EngineError, EngineResult};

/// Default directory holding `contest.yaml` and `point_weights.yaml`.
pub const DEFAULT_CONFIG_DIR: &str = "./config/dros_contest";

/// Settings for the HTTP service binary.
///
/// | Variable             | Default                  |
/// |----------------------|--------------------------|
/// | `SCORING_CONFIG_DIR` | `./config/dros_contest`  |
/// | `APP_HOST`           | `127.0.0.1`              |
/// | `APP_PORT`           | `3000`                   |
/// | `APP_LOG_LEVEL`      | `info`                   |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Directory holding the scoring configuration files.
    pub config_dir: PathBuf,
    /// Host or IP to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            host: "127.0.0.1".to_string(),
            port: 3000,
            log_level: "info".to_string(),
        }
    }
}

impl ServerSettings {
    /// Reads settings from the process environment.
    pub fn from_env() -> EngineResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset names.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("APP_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| EngineError::InvalidSetting {
                    name: "APP_PORT".to_string(),
                    value,
                })?,
            None => defaults.port,
        };

        Ok(Self {
            config_dir: lookup("SCORING_CONFIG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.config_dir),
            host: lookup("APP_HOST").unwrap_or(defaults.host),
            port,
            log_level: lookup("APP_LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Resolves the bind address; `localhost` maps to the IPv4 loopback.
    pub fn socket_addr(&self) -> EngineResult<SocketAddr> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self.host.parse().map_err(|_| EngineError::InvalidSetting {
            name: "APP_HOST".to_string(),
            value: self.host.clone(),
        })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = ServerSettings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings, ServerSettings::default());
    }

    #[test]
    fn test_values_from_lookup() {
        let settings = ServerSettings::from_lookup(lookup_from(&[
            ("SCORING_CONFIG_DIR", "/etc/dros"),
            ("APP_HOST", "0.0.0.0"),
            ("APP_PORT", "8080"),
            ("APP_LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(settings.config_dir, PathBuf::from("/etc/dros"));
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(
            settings.socket_addr().unwrap(),
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = ServerSettings::from_lookup(lookup_from(&[("APP_PORT", "eighty")]));
        match result {
            Err(EngineError::InvalidSetting { name, value }) => {
                assert_eq!(name, "APP_PORT");
                assert_eq!(value, "eighty");
            }
            _ => panic!("Expected InvalidSetting"),
        }
    }

    #[test]
    fn test_localhost_resolves_to_loopback() {
        let settings = ServerSettings {
            host: "localhost".to_string(),
            ..ServerSettings::default()
        };
        assert_eq!(
            settings.socket_addr().unwrap(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_unparseable_host_is_rejected() {
        let settings = ServerSettings {
            host: "not a host".to_string(),
            ..ServerSettings::default()
        };
        assert!(matches!(
            settings.socket_addr(),
            Err(EngineError::InvalidSetting { .. })
        ));
    }
}

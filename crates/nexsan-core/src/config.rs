//! Configuration management for the exporter
//!
//! Settings are read from an optional TOML file and then overridden by
//! command-line flags in the CLI.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use crate::{NexsanError, Result};

/// Exporter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// IPv6 or IPv4 address to listen on
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    /// Port to listen on
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Whether IPv6 sockets refuse IPv4 connections; `None` keeps the OS default
    #[serde(default)]
    pub bind_v6only: Option<bool>,

    /// Number of request-handling worker threads; `None` uses one per CPU
    #[serde(default)]
    pub thread_count: Option<usize>,

    /// Upper bound on a single fetch from an array
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

fn default_bind_address() -> IpAddr {
    IpAddr::V6(Ipv6Addr::UNSPECIFIED)
}

fn default_bind_port() -> u16 {
    9333
}

fn default_probe_timeout_secs() -> u64 {
    30
}

impl ExporterConfig {
    /// Load configuration from `path`, or use defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| NexsanError::Config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.thread_count == Some(0) {
            return Err(NexsanError::Config(
                "thread_count must be at least 1".to_string(),
            ));
        }
        if self.probe_timeout_secs == 0 {
            return Err(NexsanError::Config(
                "probe_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.bind_port)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            bind_v6only: None,
            thread_count: None,
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let config = ExporterConfig::load_or_default(None).unwrap();
        assert_eq!(config.bind_address, IpAddr::V6(Ipv6Addr::UNSPECIFIED));
        assert_eq!(config.bind_port, 9333);
        assert_eq!(config.bind_v6only, None);
        assert_eq!(config.probe_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exporter.toml");
        std::fs::write(&path, "bind_address = \"127.0.0.1\"\nbind_v6only = true\n").unwrap();

        let config = ExporterConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:9333".parse().unwrap());
        assert_eq!(config.bind_v6only, Some(true));
        assert_eq!(config.thread_count, None);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exporter.toml");
        std::fs::write(&path, "bind_port = \"not a port\"\n").unwrap();

        let err = ExporterConfig::load_or_default(Some(&path)).unwrap_err();
        assert!(matches!(err, NexsanError::Config(_)));
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = ExporterConfig {
            thread_count: Some(0),
            ..ExporterConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = ExporterConfig::load_or_default(Some(&dir.path().join("absent.toml")))
            .unwrap_err();
        assert!(matches!(err, NexsanError::Io(_)));
    }
}

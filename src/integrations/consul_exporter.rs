use crate::Error;
use serde::Serialize;
use std::time::Duration;

pub const INTEGRATION_NAME: &str = "consul_exporter";

/// Settings of the Consul exporter integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Address (host and port) of the Consul instance to connect to.
    pub server: String,
    pub ca_file: String,
    pub cert_file: String,
    pub key_file: String,
    pub server_name: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    pub insecure_skip_verify: bool,
    #[serde(rename = "concurrent_request_limit")]
    pub request_limit: usize,
    pub allow_stale: bool,
    pub require_consistent: bool,

    pub kv_prefix: String,
    pub kv_filter: String,
    #[serde(rename = "generate_health_summary")]
    pub health_summary: bool,
}

impl Config {
    /// Checks the settings the exporter cannot start without.
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.trim().is_empty() {
            return Err(Error::InvalidExporterConfig(
                "consul server address must not be empty".to_string(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(Error::InvalidExporterConfig(
                "consul timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: "http://localhost:8500".to_string(),
            ca_file: String::new(),
            cert_file: String::new(),
            key_file: String::new(),
            server_name: String::new(),
            timeout: Duration::from_millis(500),
            insecure_skip_verify: false,
            request_limit: 0,
            allow_stale: true,
            require_consistent: false,
            kv_prefix: String::new(),
            kv_filter: ".*".to_string(),
            health_summary: true,
        }
    }

    #[test]
    fn valid_config() {
        config().validate().expect("expected config to be valid");
    }

    #[test]
    fn empty_server_is_rejected() {
        let config = Config {
            server: "  ".to_string(),
            ..config()
        };

        let err = config.validate().expect_err("expected an error");
        assert!(matches!(err, Error::InvalidExporterConfig(_)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = Config {
            timeout: Duration::ZERO,
            ..config()
        };

        let err = config.validate().expect_err("expected an error");
        assert!(matches!(err, Error::InvalidExporterConfig(_)));
    }

    #[test]
    fn serializes_with_exporter_field_names() {
        let value = serde_json::to_value(config()).unwrap();

        assert_eq!(value["concurrent_request_limit"], 0);
        assert_eq!(value["generate_health_summary"], true);
        assert_eq!(value["timeout"], "500ms");
    }
}

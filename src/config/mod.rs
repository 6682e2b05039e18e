use crate::utils::error::Result;
use crate::utils::validation::{validate_listen_addr, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Process configuration, loaded once from a TOML file at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrokerConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub services: HashMap<String, ServiceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:8080".to_string()
}

/// One logical downstream service, keyed by name in `[services.<name>]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub url: String,
}

impl BrokerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl Validate for BrokerConfig {
    fn validate(&self) -> Result<()> {
        validate_listen_addr("server.listen", &self.server.listen)?;
        for (name, service) in &self.services {
            validate_url(&format!("services.{}.url", name), &service.url)?;
        }
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(name = "item-broker")]
#[command(about = "HTTP broker composing the catalog and order services")]
pub struct CliArgs {
    #[arg(long, default_value = "broker.toml")]
    pub config: String,

    #[arg(long, help = "Override the configured listen address")]
    pub listen: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[server]
listen = "0.0.0.0:9000"

[services.catalog]
url = "http://localhost:8081"

[services.order]
url = "http://localhost:8082"
"#;

    #[test]
    fn parses_full_config() {
        let config = BrokerConfig::from_toml_str(SAMPLE).unwrap();

        assert_eq!(config.server.listen, "0.0.0.0:9000");
        assert_eq!(config.services.len(), 2);
        assert_eq!(config.services["catalog"].url, "http://localhost:8081");
        config.validate().unwrap();
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = BrokerConfig::from_toml_str("").unwrap();

        assert_eq!(config.server.listen, "127.0.0.1:8080");
        assert!(config.services.is_empty());
    }

    #[test]
    fn validation_rejects_bad_service_url() {
        let config = BrokerConfig::from_toml_str(
            r#"
[services.catalog]
url = "not a url"
"#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }
}

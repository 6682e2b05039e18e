use crate::config::BrokerConfig;
use crate::utils::error::{BrokerError, Result};
use std::collections::HashMap;
use url::Url;

/// Resolved network location of one logical downstream service.
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    pub name: String,
    pub base_url: Url,
}

impl ServiceEndpoint {
    /// Builds the absolute URL for `path` under this endpoint. The base URL's
    /// own path is kept; `path` is appended to it, not resolved against it.
    pub fn url_for(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }
}

/// Static name-to-address resolution, built once at startup and read-only
/// afterwards. Both clients share one instance behind an `Arc`.
#[derive(Debug)]
pub struct ServiceRegistry {
    services: HashMap<String, ServiceEndpoint>,
}

impl ServiceRegistry {
    pub fn from_config(config: &BrokerConfig) -> Result<Self> {
        let mut services = HashMap::new();
        for (name, service) in &config.services {
            let base_url =
                Url::parse(&service.url).map_err(|e| BrokerError::InvalidConfigValueError {
                    field: format!("services.{}.url", name),
                    value: service.url.clone(),
                    reason: format!("Invalid URL format: {}", e),
                })?;
            services.insert(
                name.clone(),
                ServiceEndpoint {
                    name: name.clone(),
                    base_url,
                },
            );
        }
        Ok(Self { services })
    }

    /// Looks up a logical service name. Failing here happens before any
    /// network call is attempted.
    pub fn resolve(&self, name: &str) -> Result<&ServiceEndpoint> {
        self.services
            .get(name)
            .ok_or_else(|| BrokerError::ServiceNotConfigured {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use crate::BrokerConfig;

    fn config_with(name: &str, url: &str) -> BrokerConfig {
        let mut config = BrokerConfig::default();
        config.services.insert(
            name.to_string(),
            ServiceConfig {
                url: url.to_string(),
            },
        );
        config
    }

    #[test]
    fn resolves_configured_service() {
        let registry =
            ServiceRegistry::from_config(&config_with("catalog", "http://localhost:8081")).unwrap();
        let endpoint = registry.resolve("catalog").unwrap();

        assert_eq!(endpoint.name, "catalog");
        assert_eq!(
            endpoint.url_for("/v2/pets").as_str(),
            "http://localhost:8081/v2/pets"
        );
    }

    #[test]
    fn base_url_path_is_preserved_when_building_endpoint_urls() {
        for base in ["http://localhost:8081/petstore", "http://localhost:8081/petstore/"] {
            let registry = ServiceRegistry::from_config(&config_with("catalog", base)).unwrap();
            let endpoint = registry.resolve("catalog").unwrap();

            assert_eq!(
                endpoint.url_for("/v2/pets").as_str(),
                "http://localhost:8081/petstore/v2/pets"
            );
        }
    }

    #[test]
    fn unknown_service_fails_without_io() {
        let registry =
            ServiceRegistry::from_config(&config_with("catalog", "http://localhost:8081")).unwrap();
        let err = registry.resolve("order").unwrap_err();

        assert!(matches!(
            err,
            BrokerError::ServiceNotConfigured { ref name } if name == "order"
        ));
    }

    #[test]
    fn invalid_url_is_a_config_error() {
        let err = ServiceRegistry::from_config(&config_with("catalog", "::nope::")).unwrap_err();
        assert!(matches!(err, BrokerError::InvalidConfigValueError { .. }));
    }
}

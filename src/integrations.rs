//! Configuration of the embedded exporter integrations.
//!
//! Running the exporters is not part of this crate. These records are what the
//! integration layer expects to be handed.

use serde::Serialize;

pub mod consul_exporter;

/// Configuration of one of the supported integrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IntegrationConfig {
    Consul(consul_exporter::Config),
}

impl IntegrationConfig {
    pub fn name(&self) -> &'static str {
        match self {
            IntegrationConfig::Consul(_) => consul_exporter::INTEGRATION_NAME,
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        match self {
            IntegrationConfig::Consul(config) => config.validate(),
        }
    }
}

impl From<consul_exporter::Config> for IntegrationConfig {
    fn from(config: consul_exporter::Config) -> Self {
        IntegrationConfig::Consul(config)
    }
}

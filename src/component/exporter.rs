//! Components embedding a Prometheus exporter.
//!
//! An exporter component does not scrape anything itself. It exposes the
//! metrics of its integration on the agent's HTTP server and exports a single
//! target pointing there, ready to be fed into `prometheus.scrape`.

use crate::component::discovery::{
    Target, ADDRESS_LABEL, INSTANCE_LABEL, JOB_LABEL, METRICS_PATH_LABEL,
};
use crate::component::registry::{Built, Options, RawArguments};
use crate::integrations::IntegrationConfig;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod consul;

pub const SCHEME_LABEL: &str = "__scheme__";

/// Values exported by an exporter component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Exports {
    pub targets: Vec<Target>,
}

/// The target every exporter component starts out with.
pub fn default_target(component_id: &str, exporter_name: &str, http_listen: &str) -> Target {
    Target::from([
        (ADDRESS_LABEL.to_string(), http_listen.to_string()),
        (SCHEME_LABEL.to_string(), "http".to_string()),
        (
            METRICS_PATH_LABEL.to_string(),
            format!("/api/v0/component/{component_id}/metrics"),
        ),
        (JOB_LABEL.to_string(), format!("integrations/{exporter_name}")),
        (INSTANCE_LABEL.to_string(), http_listen.to_string()),
    ])
}

/// Builds an exporter component whose exported targets are adjusted by
/// `customize_target`.
pub fn build_with_target_builder<A>(
    options: &Options,
    arguments: RawArguments,
    exporter_name: &str,
    create: fn(&A) -> IntegrationConfig,
    customize_target: fn(Target, &A) -> Vec<Target>,
) -> Result<Built>
where
    A: DeserializeOwned,
{
    let arguments: A = arguments.parse()?;

    let integration = create(&arguments);
    integration.validate()?;

    let base = default_target(&options.id, exporter_name, &options.http_listen);
    let targets = customize_target(base, &arguments);

    Ok(Built {
        integration,
        exports: Exports { targets },
    })
}

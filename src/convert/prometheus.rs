//! Conversion of a Prometheus configuration into `prometheus.scrape`
//! components.

use crate::component::scrape;
use crate::convert::Component;
use crate::prometheus::{Config, DiscoveryConfig, ScrapeConfig};
use std::collections::HashSet;
use tracing::{debug, warn};

mod http;
mod targets;

pub use http::to_http_client_config;
pub use targets::get_targets;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Log dropped service discovery mechanisms as warnings instead of debug
    /// messages.
    pub report_unsupported: bool,
}

/// Converts every scrape job of `config` into a `prometheus.scrape`
/// component, in file order.
pub fn convert(config: &Config, options: ConvertOptions) -> Vec<Component> {
    let mut labels = HashSet::new();

    config
        .scrape_configs
        .iter()
        .filter_map(|scrape_config| {
            report_unsupported(scrape_config, options);

            let arguments = to_scrape_arguments(Some(scrape_config))?;
            Some(Component {
                name: scrape::COMPONENT_NAME.to_string(),
                label: unique_label(&mut labels, &scrape_config.job_name),
                arguments,
            })
        })
        .collect()
}

/// Converts a single scrape job. A missing job converts to nothing.
///
/// `forward_to` is left empty, wiring the component to its receivers is up to
/// the caller.
pub fn to_scrape_arguments(scrape_config: Option<&ScrapeConfig>) -> Option<scrape::Arguments> {
    let scrape_config = scrape_config?;

    Some(scrape::Arguments {
        targets: get_targets(&scrape_config.service_discovery_configs),
        forward_to: Vec::new(),
        job_name: scrape_config.job_name.clone(),
        honor_labels: scrape_config.honor_labels,
        honor_timestamps: scrape_config.honor_timestamps,
        params: scrape_config.params.clone(),
        scrape_interval: scrape_config.scrape_interval,
        scrape_timeout: scrape_config.scrape_timeout,
        metrics_path: scrape_config.metrics_path.clone(),
        scheme: scrape_config.scheme.to_string(),
        body_size_limit: scrape_config.body_size_limit,
        sample_limit: scrape_config.sample_limit,
        target_limit: scrape_config.target_limit,
        label_limit: scrape_config.label_limit,
        label_name_length_limit: scrape_config.label_name_length_limit,
        label_value_length_limit: scrape_config.label_value_length_limit,
        http_client_config: to_http_client_config(&scrape_config.http_client_config),
        // Prometheus has no equivalent of these.
        extra_metrics: false,
        clustering: scrape::Clustering { enabled: false },
    })
}

fn report_unsupported(scrape_config: &ScrapeConfig, options: ConvertOptions) {
    let unsupported = scrape_config
        .service_discovery_configs
        .iter()
        .filter(|config| !matches!(config, DiscoveryConfig::Static(_)));

    for config in unsupported {
        let mechanism = config.mechanism();
        let job = scrape_config.job_name.as_str();

        if options.report_unsupported {
            warn!(job, mechanism, "Dropping unsupported service discovery config");
        } else {
            debug!(job, mechanism, "Dropping unsupported service discovery config");
        }
    }
}

/// Turns a job name into a valid component label, unique among `seen`.
fn unique_label(seen: &mut HashSet<String>, job_name: &str) -> String {
    let base = sanitize_label(job_name);

    let mut label = base.clone();
    let mut suffix = 2;
    while !seen.insert(label.clone()) {
        label = format!("{base}_{suffix}");
        suffix += 1;
    }

    label
}

fn sanitize_label(job_name: &str) -> String {
    let mut label: String = job_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if label.is_empty() {
        return "default".to_string();
    }

    if label.starts_with(|c: char| c.is_ascii_digit()) {
        label.insert(0, '_');
    }

    label
}

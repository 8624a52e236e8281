use crate::component::discovery::Target;
use crate::component::http::HttpClientConfig;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Name under which the scrape component is known to flow.
pub const COMPONENT_NAME: &str = "prometheus.scrape";

/// Arguments of the `prometheus.scrape` component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Arguments {
    pub targets: Vec<Target>,
    /// References to the components that receive the scraped samples.
    pub forward_to: Vec<String>,

    pub job_name: String,
    pub honor_labels: bool,
    pub honor_timestamps: bool,
    pub params: BTreeMap<String, Vec<String>>,
    #[serde(with = "humantime_serde")]
    pub scrape_interval: Duration,
    #[serde(with = "humantime_serde")]
    pub scrape_timeout: Duration,
    pub metrics_path: String,
    pub scheme: String,

    pub body_size_limit: u64,
    pub sample_limit: u64,
    pub target_limit: u64,
    pub label_limit: u64,
    pub label_name_length_limit: u64,
    pub label_value_length_limit: u64,

    pub http_client_config: HttpClientConfig,

    /// Emit the additional `scrape_*` series for every target.
    pub extra_metrics: bool,
    pub clustering: Clustering,
}

impl Default for Arguments {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            forward_to: Vec::new(),
            job_name: String::new(),
            honor_labels: false,
            honor_timestamps: true,
            params: BTreeMap::new(),
            scrape_interval: Duration::from_secs(60),
            scrape_timeout: Duration::from_secs(10),
            metrics_path: "/metrics".to_string(),
            scheme: "http".to_string(),
            body_size_limit: 0,
            sample_limit: 0,
            target_limit: 0,
            label_limit: 0,
            label_name_length_limit: 0,
            label_value_length_limit: 0,
            http_client_config: HttpClientConfig::default(),
            extra_metrics: false,
            clustering: Clustering::default(),
        }
    }
}

/// Distribution of targets across the instances of a cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Clustering {
    pub enabled: bool,
}

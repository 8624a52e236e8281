//! The Prometheus configuration file, as far as the converter understands it.
//!
//! Only the subset of `prometheus.yml` that has a counterpart in the flow
//! components is modelled. Service discovery mechanisms other than
//! `static_configs` are kept as [`DiscoveryConfig::Unsupported`] entries so
//! that callers can report them.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::component::discovery::ADDRESS_LABEL;

mod http;

pub use http::{Authorization, BasicAuth, HttpClientConfig, OAuth2, TlsConfig};

const SD_CONFIGS_SUFFIX: &str = "_sd_configs";

/// A set of labels identifying a single target. Label names are unique and
/// iterate in lexicographic order.
pub type LabelSet = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct Config {
    pub global: GlobalConfig,
    pub scrape_configs: Vec<ScrapeConfig>,
    pub rule_files: Vec<String>,
}

impl Config {
    pub fn from_yaml(input: &str) -> crate::Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|err| crate::Error::io(path, err))?;

        debug!(path = ?path, "Loaded Prometheus configuration");
        Self::from_yaml(&input)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    #[serde(with = "humantime_serde")]
    pub scrape_interval: Duration,
    #[serde(with = "humantime_serde")]
    pub scrape_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub evaluation_interval: Duration,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            scrape_interval: Duration::from_secs(60),
            scrape_timeout: Duration::from_secs(10),
            evaluation_interval: Duration::from_secs(60),
        }
    }
}

/// A single scrape job.
///
/// Values that were left out in the file are already resolved: intervals and
/// timeouts are inherited from [`GlobalConfig`], everything else falls back
/// to the Prometheus defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawScrapeConfig")]
pub struct ScrapeConfig {
    pub job_name: String,
    pub honor_labels: bool,
    pub honor_timestamps: bool,
    pub params: BTreeMap<String, Vec<String>>,
    pub scrape_interval: Duration,
    pub scrape_timeout: Duration,
    pub metrics_path: String,
    pub scheme: Scheme,
    /// Maximum size of an uncompressed response body in bytes, 0 means no limit.
    pub body_size_limit: u64,
    pub sample_limit: u64,
    pub target_limit: u64,
    pub label_limit: u64,
    pub label_name_length_limit: u64,
    pub label_value_length_limit: u64,
    pub http_client_config: HttpClientConfig,
    pub service_discovery_configs: Vec<DiscoveryConfig>,
}

impl ScrapeConfig {
    /// A scrape job with all the defaults Prometheus would apply.
    pub fn new(job_name: impl Into<String>) -> Self {
        Self::with_global(job_name, &GlobalConfig::default())
    }

    fn with_global(job_name: impl Into<String>, global: &GlobalConfig) -> Self {
        ScrapeConfig {
            job_name: job_name.into(),
            honor_labels: false,
            honor_timestamps: true,
            params: BTreeMap::new(),
            scrape_interval: global.scrape_interval,
            scrape_timeout: global.scrape_timeout.min(global.scrape_interval),
            metrics_path: "/metrics".to_string(),
            scheme: Scheme::Http,
            body_size_limit: 0,
            sample_limit: 0,
            target_limit: 0,
            label_limit: 0,
            label_name_length_limit: 0,
            label_value_length_limit: 0,
            http_client_config: HttpClientConfig::default(),
            service_discovery_configs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One service discovery entry of a scrape job.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoveryConfig {
    /// `static_configs`: targets listed verbatim in the file.
    Static(Vec<TargetGroup>),

    /// Any other `<mechanism>_sd_configs` entry. These are kept only so the
    /// mechanism can be reported; they never produce targets.
    Unsupported { mechanism: String },
}

impl DiscoveryConfig {
    pub fn mechanism(&self) -> &str {
        match self {
            DiscoveryConfig::Static(_) => "static",
            DiscoveryConfig::Unsupported { mechanism } => mechanism,
        }
    }
}

/// A group of targets sharing a common set of labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TargetGroup {
    /// Every target is a label set, typically just the `__address__` label.
    #[serde(default, deserialize_with = "deserialize_targets")]
    pub targets: Vec<LabelSet>,

    /// Labels applied to all targets of this group.
    #[serde(default)]
    pub labels: LabelSet,

    /// Identifies the group within its discovery entry.
    #[serde(skip)]
    pub source: String,
}

impl TargetGroup {
    /// Creates a group from plain `host:port` addresses.
    pub fn from_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TargetGroup {
            targets: addresses.into_iter().map(address_label_set).collect(),
            ..Default::default()
        }
    }
}

fn address_label_set(address: impl Into<String>) -> LabelSet {
    LabelSet::from([(ADDRESS_LABEL.to_string(), address.into())])
}

fn deserialize_targets<'de, D: Deserializer<'de>>(input: D) -> Result<Vec<LabelSet>, D::Error> {
    let addresses: Vec<String> = Deserialize::deserialize(input)?;

    addresses
        .into_iter()
        .map(|address| {
            if address.contains('/') {
                return Err(D::Error::custom(format!(
                    "{address:?} is not a valid hostname"
                )));
            }
            Ok(address_label_set(address))
        })
        .collect()
}

/// Accepts either a plain number of bytes or a string with a base-2 unit
/// suffix, like `10MB` or `512KiB`.
fn deserialize_byte_size<'de, D: Deserializer<'de>>(input: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ByteSize {
        Number(u64),
        Text(String),
    }

    match ByteSize::deserialize(input)? {
        ByteSize::Number(bytes) => Ok(bytes),
        ByteSize::Text(text) => parse_byte_size(&text).map_err(D::Error::custom),
    }
}

pub(crate) fn parse_byte_size(input: &str) -> Result<u64, String> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (number, unit) = input.split_at(split);

    let number: u64 = number
        .parse()
        .map_err(|_| format!("invalid byte size {input:?}"))?;

    let multiplier: u64 = match unit.trim() {
        "" | "B" => 1,
        "KB" | "KiB" => 1 << 10,
        "MB" | "MiB" => 1 << 20,
        "GB" | "GiB" => 1 << 30,
        "TB" | "TiB" => 1 << 40,
        "PB" | "PiB" => 1 << 50,
        other => return Err(format!("unknown byte size unit {other:?}")),
    };

    number
        .checked_mul(multiplier)
        .ok_or_else(|| format!("byte size {input:?} is too large"))
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    global: GlobalConfig,
    #[serde(default)]
    scrape_configs: Vec<RawScrapeConfig>,
    #[serde(default)]
    rule_files: Vec<String>,
}

impl TryFrom<RawConfig> for Config {
    type Error = String;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let scrape_configs = raw
            .scrape_configs
            .into_iter()
            .map(|scrape_config| scrape_config.resolve(&raw.global))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Config {
            global: raw.global,
            scrape_configs,
            rule_files: raw.rule_files,
        })
    }
}

#[derive(Deserialize)]
struct RawScrapeConfig {
    job_name: String,
    #[serde(default)]
    honor_labels: bool,
    honor_timestamps: Option<bool>,
    #[serde(default)]
    params: BTreeMap<String, Vec<String>>,
    #[serde(default, with = "humantime_serde::option")]
    scrape_interval: Option<Duration>,
    #[serde(default, with = "humantime_serde::option")]
    scrape_timeout: Option<Duration>,
    metrics_path: Option<String>,
    scheme: Option<Scheme>,
    #[serde(default, deserialize_with = "deserialize_byte_size")]
    body_size_limit: u64,
    #[serde(default)]
    sample_limit: u64,
    #[serde(default)]
    target_limit: u64,
    #[serde(default)]
    label_limit: u64,
    #[serde(default)]
    label_name_length_limit: u64,
    #[serde(default)]
    label_value_length_limit: u64,
    #[serde(default)]
    static_configs: Vec<TargetGroup>,

    // The HTTP client options live inline in the scrape config. They have to
    // come before `rest` so they are not swallowed by it.
    #[serde(flatten)]
    http_client_config: HttpClientConfig,
    #[serde(flatten)]
    rest: BTreeMap<String, serde_yaml::Value>,
}

impl RawScrapeConfig {
    fn resolve(self, global: &GlobalConfig) -> Result<ScrapeConfig, String> {
        if self.job_name.is_empty() {
            return Err("job_name is empty".to_string());
        }

        let defaults = ScrapeConfig::with_global(self.job_name, global);

        let scrape_interval = self.scrape_interval.unwrap_or(defaults.scrape_interval);
        let scrape_timeout = match self.scrape_timeout {
            Some(timeout) if timeout > scrape_interval => {
                return Err(format!(
                    "scrape timeout greater than scrape interval for scrape config with job name {:?}",
                    defaults.job_name
                ));
            }
            Some(timeout) => timeout,
            // Inherited timeouts never exceed the job's own interval.
            None => global.scrape_timeout.min(scrape_interval),
        };

        let mut service_discovery_configs = Vec::new();
        if !self.static_configs.is_empty() {
            let groups = self
                .static_configs
                .into_iter()
                .enumerate()
                .map(|(index, group)| TargetGroup {
                    source: index.to_string(),
                    ..group
                })
                .collect();
            service_discovery_configs.push(DiscoveryConfig::Static(groups));
        }

        for (key, value) in self.rest {
            let Some(mechanism) = key.strip_suffix(SD_CONFIGS_SUFFIX) else {
                debug!(job = %defaults.job_name, option = %key, "Ignoring scrape option without flow counterpart");
                continue;
            };

            let entries = match &value {
                serde_yaml::Value::Sequence(entries) => entries.len(),
                serde_yaml::Value::Null => 0,
                _ => 1,
            };
            service_discovery_configs.extend((0..entries).map(|_| DiscoveryConfig::Unsupported {
                mechanism: mechanism.to_string(),
            }));
        }

        Ok(ScrapeConfig {
            honor_labels: self.honor_labels,
            honor_timestamps: self.honor_timestamps.unwrap_or(defaults.honor_timestamps),
            params: self.params,
            scrape_interval,
            scrape_timeout,
            metrics_path: self.metrics_path.unwrap_or(defaults.metrics_path),
            scheme: self.scheme.unwrap_or(defaults.scheme),
            body_size_limit: self.body_size_limit,
            sample_limit: self.sample_limit,
            target_limit: self.target_limit,
            label_limit: self.label_limit,
            label_name_length_limit: self.label_name_length_limit,
            label_value_length_limit: self.label_value_length_limit,
            http_client_config: self.http_client_config,
            service_discovery_configs,
            ..defaults
        })
    }
}

impl TryFrom<RawScrapeConfig> for ScrapeConfig {
    type Error = String;

    fn try_from(raw: RawScrapeConfig) -> Result<Self, Self::Error> {
        raw.resolve(&GlobalConfig::default())
    }
}

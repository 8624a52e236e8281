use std::collections::BTreeMap;

/// A single scrape target: a set of labels, keyed by label name.
pub type Target = BTreeMap<String, String>;

/// Label holding the `host:port` of a target.
pub const ADDRESS_LABEL: &str = "__address__";
pub const METRICS_PATH_LABEL: &str = "__metrics_path__";
pub const JOB_LABEL: &str = "job";
pub const INSTANCE_LABEL: &str = "instance";

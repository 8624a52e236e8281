use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// This struct represents the promflow.toml configuration. All properties are
/// optional so that the user only specifies the ones they want to change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConvertConfig {
    /// Format the converted configuration is written in.
    pub output_format: Option<OutputFormat>,

    /// Log every dropped service discovery mechanism as a warning.
    pub report_unsupported: Option<bool>,

    /// Components every converted scrape component forwards its samples to,
    /// e.g. `prometheus.remote_write.default.receiver`.
    pub forward_to: Option<Vec<String>>,
}

impl ConvertConfig {
    pub fn from_toml(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        Self::from_toml(&input)
    }

    /// Loads the configuration at `path` if that file exists, the defaults
    /// otherwise.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Flow,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "flow" | "river" => Ok(OutputFormat::Flow),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!("unsupported output format {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_file() {
        assert_eq!(ConvertConfig::from_toml("").unwrap(), ConvertConfig::default());
    }

    #[test]
    fn all_options() {
        let config = ConvertConfig::from_toml(
            r#"
            output-format = "yaml"
            report-unsupported = true
            forward-to = ["prometheus.remote_write.default.receiver"]
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            ConvertConfig {
                output_format: Some(OutputFormat::Yaml),
                report_unsupported: Some(true),
                forward_to: Some(vec![
                    "prometheus.remote_write.default.receiver".to_string()
                ]),
            }
        );
    }

    #[test]
    fn unknown_options_are_rejected() {
        assert!(ConvertConfig::from_toml("output_format = \"json\"").is_err());
    }

    #[test]
    fn missing_optional_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = ConvertConfig::load_optional(dir.path().join("promflow.toml")).unwrap();

        assert_eq!(config, ConvertConfig::default());
    }

    #[rstest]
    #[case("flow", OutputFormat::Flow)]
    #[case("river", OutputFormat::Flow)]
    #[case("JSON", OutputFormat::Json)]
    #[case("yml", OutputFormat::Yaml)]
    fn output_formats(#[case] input: &str, #[case] expected: OutputFormat) {
        assert_eq!(input.parse::<OutputFormat>(), Ok(expected));
    }

    #[test]
    fn unknown_output_format() {
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}

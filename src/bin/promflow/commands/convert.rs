use anyhow::{Context, Result};
use clap::Parser;
use promflow::config::{ConvertConfig, OutputFormat};
use promflow::convert::prometheus::{convert, ConvertOptions};
use promflow::convert::{flow, Component};
use promflow::prometheus;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Clone)]
pub struct Arguments {
    /// The Prometheus configuration file to convert.
    input: PathBuf,

    /// Where to write the converted configuration. Defaults to stdout.
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Format of the converted configuration: flow, json or yaml.
    #[clap(long, env = "PROMFLOW_OUTPUT_FORMAT")]
    output_format: Option<OutputFormat>,

    /// Settings file. It is fine for it not to exist.
    #[clap(short, long, env = "PROMFLOW_CONFIG", default_value = "./promflow.toml")]
    config: PathBuf,

    /// Component the converted scrape components forward to. Can be repeated.
    ///
    /// For example `prometheus.remote_write.default.receiver`.
    #[clap(long)]
    forward_to: Vec<String>,

    /// Log dropped service discovery mechanisms as warnings.
    #[clap(long, env = "PROMFLOW_REPORT_UNSUPPORTED")]
    report_unsupported: Option<bool>,
}

/// The settings after merging the command line with the settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    output_format: OutputFormat,
    report_unsupported: bool,
    forward_to: Vec<String>,
}

impl Settings {
    /// Command line arguments win over the settings file, which wins over the
    /// defaults.
    fn new(args: &Arguments, config: ConvertConfig) -> Self {
        let forward_to = if !args.forward_to.is_empty() {
            args.forward_to.clone()
        } else {
            config.forward_to.unwrap_or_default()
        };

        Settings {
            output_format: args
                .output_format
                .or(config.output_format)
                .unwrap_or_default(),
            report_unsupported: args
                .report_unsupported
                .or(config.report_unsupported)
                .unwrap_or(false),
            forward_to,
        }
    }
}

pub fn handle_command(args: Arguments) -> Result<()> {
    let config = ConvertConfig::load_optional(&args.config)
        .with_context(|| format!("Unable to load settings from {}", args.config.display()))?;
    let settings = Settings::new(&args, config);
    debug!(?settings, "Resolved settings");

    let prometheus_config = prometheus::Config::load(&args.input)
        .with_context(|| format!("Unable to load {}", args.input.display()))?;

    let mut components = convert(
        &prometheus_config,
        ConvertOptions {
            report_unsupported: settings.report_unsupported,
        },
    );
    for component in &mut components {
        component.arguments.forward_to = settings.forward_to.clone();
    }

    let output = render(&components, settings.output_format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, output)
                .with_context(|| format!("Unable to write {}", path.display()))?;
            info!(
                components = components.len(),
                "Successfully written converted configuration to {}",
                path.display()
            );
        }
        None => print!("{output}"),
    }

    Ok(())
}

fn render(components: &[Component], format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Flow => flow::render(components),
        OutputFormat::Json => {
            let mut output = serde_json::to_string_pretty(components)?;
            output.push('\n');
            output
        }
        OutputFormat::Yaml => serde_yaml::to_string(components)?,
    };

    Ok(output)
}

use anyhow::{bail, Context, Result};
use clap::Parser;
use promflow::component::discovery::Target;
use promflow::component::{Options, RawArguments, Registry};
use promflow::integrations::IntegrationConfig;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Clone)]
pub struct Arguments {
    /// Name of the component, e.g. `prometheus.exporter.consul`.
    name: Option<String>,

    /// TOML or YAML file holding the component arguments. Without it the
    /// component is built from its defaults.
    arguments: Option<PathBuf>,

    /// List the components that can be built and exit.
    #[clap(long)]
    list: bool,

    /// Label of the component. Its id becomes `<name>.<label>`.
    #[clap(long, default_value = "default")]
    label: String,

    /// Address the agent's HTTP server listens on.
    #[clap(long, env = "PROMFLOW_HTTP_LISTEN", default_value = "127.0.0.1:12345")]
    http_listen: String,
}

#[derive(Debug, Serialize)]
struct Output {
    id: String,
    integration: &'static str,
    config: IntegrationConfig,
    targets: Vec<Target>,
}

pub fn handle_command(args: Arguments) -> Result<()> {
    let registry = Registry::with_builtin();

    if args.list {
        for name in registry.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let Some(name) = args.name else {
        bail!("No component name provided. Use --list to see the available components");
    };

    let arguments = match &args.arguments {
        Some(path) => RawArguments::load(path)
            .with_context(|| format!("Unable to load arguments from {}", path.display()))?,
        None => RawArguments::from_toml("")?,
    };

    let options = Options {
        id: format!("{name}.{}", args.label),
        http_listen: args.http_listen,
    };
    debug!(id = %options.id, "Building component");

    let built = registry
        .build(&name, &options, arguments)
        .with_context(|| format!("Unable to build {}", options.id))?;

    let output = Output {
        id: options.id,
        integration: built.integration.name(),
        config: built.integration,
        targets: built.exports.targets,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_component_and_arguments() {
        let args = Arguments::try_parse_from([
            "exporter",
            "prometheus.exporter.consul",
            "consul.toml",
            "--label",
            "primary",
        ])
        .unwrap();

        assert_eq!(args.name.as_deref(), Some("prometheus.exporter.consul"));
        assert_eq!(args.arguments, Some(PathBuf::from("consul.toml")));
        assert_eq!(args.label, "primary");
        assert!(!args.list);
    }

    #[test]
    fn missing_name_is_an_error() {
        let args = Arguments::try_parse_from(["exporter"]).unwrap();

        assert!(handle_command(args).is_err());
    }

    #[test]
    fn unknown_component_is_an_error() {
        let args = Arguments::try_parse_from(["exporter", "prometheus.exporter.nope"]).unwrap();

        assert!(handle_command(args).is_err());
    }
}

use anyhow::{Context, Result};
use clap::Parser;
use commands::{handle_command, Application};
use std::io;
use tracing::{debug, error};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

mod commands;

fn main() {
    let app = Application::parse();

    if let Err(err) = init_logging() {
        eprintln!("Unable to initialize logging: {:#}", err);
        std::process::exit(1);
    }

    match handle_command(app) {
        Ok(_) => debug!("Command completed successfully"),
        Err(err) => {
            error!("Command failed: {:?}", err);
            std::process::exit(1);
        }
    }
}

/// Initialize logging for the application.
///
/// Everything at level warn and higher is logged to stderr, stdout is reserved
/// for the converted output. Users are able to influence this by exporting the
/// `RUST_LOG` environment variable, e.g. `RUST_LOG=promflow=debug`.
///
/// Setting `PROMFLOW_LOG_FORMAT=json` switches to one JSON object per event.
fn init_logging() -> Result<()> {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let json = std::env::var("PROMFLOW_LOG_FORMAT")
        .is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let log_layer = if json {
        fmt::layer().json().with_writer(io::stderr).boxed()
    } else {
        fmt::layer().with_writer(io::stderr).boxed()
    };

    Registry::default()
        .with(filter_layer)
        .with(log_layer)
        .try_init()
        .context("unable to initialize logger")?;

    Ok(())
}

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod convert;
pub mod exporter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Application {
    #[command(subcommand)]
    pub command: SubCommands,
}

#[derive(Subcommand)]
pub enum SubCommands {
    /// Convert a Prometheus configuration file into flow components.
    Convert(convert::Arguments),

    /// Build an exporter component and print its configuration and targets.
    Exporter(exporter::Arguments),
}

pub fn handle_command(app: Application) -> Result<()> {
    match app.command {
        SubCommands::Convert(args) => convert::handle_command(args),
        SubCommands::Exporter(args) => exporter::handle_command(args),
    }
}

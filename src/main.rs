//=========================================================================
// aetheric-layers
//
// Command-line entry point: installs the log subscriber, loads the
// configuration and runs the app until the window closes.
//
// Usage:
//   aetheric-layers [--config <path>] [--print-default-config]
//
// Log verbosity follows RUST_LOG (default: info), e.g.
//   RUST_LOG=surface=debug,region=trace aetheric-layers
//
//=========================================================================

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aetheric_layers::{AppBuilder, Config};

/// Selectable, draggable color layers
#[derive(Parser, Debug)]
#[command(name = "aetheric-layers")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", Config::default().to_toml_string());
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load_or_default(cli.config.as_deref())
        .context("could not load configuration")?;

    AppBuilder::new()
        .with_config(config)
        .build()
        .run()
        .context("application stopped with an error")?;

    Ok(())
}

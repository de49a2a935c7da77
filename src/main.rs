//! Sales Dashboard CLI
//!
//! Loads an order dataset, aggregates it and prints the dashboard views as a
//! text summary or as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use sales_dashboard::app::{render_summary, App};
use sales_dashboard::config::{DashboardConfig, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "sales-dashboard")]
#[command(version, about = "Aggregate order records into sales dashboard views")]
struct Cli {
    /// Dataset JSON file (defaults to `data_path` from the config)
    data: Option<PathBuf>,

    /// Config file (defaults to the per-user config, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: table or json
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Emit compact JSON
    #[arg(long)]
    compact: bool,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "sales_dashboard=debug"
    } else {
        "sales_dashboard=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config =
        DashboardConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(format) = cli.format {
        config.output_format = format;
    }
    if cli.compact {
        config.pretty_json = false;
    }

    let data_path = cli
        .data
        .or_else(|| config.data_path.clone())
        .context("No dataset given; pass a path or set data_path in the config")?;

    let output_format = config.output_format;
    let pretty_json = config.pretty_json;
    let top_countries = config.top_countries;

    let mut app = App::new(config);
    let dashboard = app
        .load(data_path.clone())
        .await
        .with_context(|| format!("Failed to build dashboard from {}", data_path.display()))?;

    let rendered = match output_format {
        OutputFormat::Table => {
            render_summary(dashboard, top_countries).context("Failed to render summary")?
        }
        OutputFormat::Json if pretty_json => {
            serde_json::to_string_pretty(dashboard).context("Failed to serialize dashboard")?
        }
        OutputFormat::Json => {
            serde_json::to_string(dashboard).context("Failed to serialize dashboard")?
        }
    };

    match cli.output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote dashboard to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

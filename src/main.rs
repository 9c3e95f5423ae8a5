//! SINIT grabber main entry point
//!
//! This is the command-line interface for the SINIT archive grabber.

use clap::Parser;
use sinit_grabber::config::{load_config, validate, Config};
use sinit_grabber::output::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// SINIT grabber: download SINIT ACM archives and extract their payloads
///
/// Scans a vendor page for links to SINIT zip archives, downloads each one,
/// and writes the `.bin` files it contains into the output folder.
#[derive(Parser, Debug)]
#[command(name = "sinit-grabber")]
#[command(version = "1.0.0")]
#[command(about = "Download SINIT ACM archives and extract their payloads", long_about = None)]
struct Cli {
    /// Page to be searched for archive links
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Output folder for extracted payloads
    #[arg(long = "of", value_name = "DIR")]
    output_folder: Option<String>,

    /// Keep zip files after unzipping
    #[arg(long = "no-clean", alias = "noClean")]
    no_clean: bool,

    /// Optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::debug!("{:?}", cli);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    tracing::info!("Searching {} for archive links", config.crawler.seed_url);

    let summary = sinit_grabber::run(&config).await?;

    if !cli.quiet {
        print_summary(&summary);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sinit_grabber=info,warn"),
            1 => EnvFilter::new("sinit_grabber=debug,info"),
            2 => EnvFilter::new("sinit_grabber=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file, if any, and applies command-line overrides
fn build_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if let Some(url) = &cli.url {
        config.crawler.seed_url = url.clone();
    }
    if let Some(folder) = &cli.output_folder {
        config.output.output_folder = folder.clone();
    }
    if cli.no_clean {
        config.output.keep_archives = true;
    }

    validate(&config)?;
    Ok(config)
}

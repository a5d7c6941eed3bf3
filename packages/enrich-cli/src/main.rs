//! Operator CLI for hero image discovery
//!
//! Runs discovery for a single entity, or checks whether one URL would be
//! accepted as a direct image.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hero_image::{
    DiscoveryConfig, DiscoveryResult, EntityDescriptor, GoogleImageSearcher, HttpProbe,
    ImageDiscovery, ImageSearcher, ImageSearcherExt, StandaloneValidator, SubjectKind,
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "enrich")]
#[command(about = "Hero image discovery CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a verified hero image
    Discover {
        /// Entity name (e.g. "University of Porto")
        #[arg(long)]
        name: String,

        /// Subject kind: university or city
        #[arg(long, value_parser = parse_kind)]
        kind: SubjectKind,

        /// State, province or other region
        #[arg(long)]
        region: Option<String>,

        /// Country
        #[arg(long)]
        country: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a URL serves a direct raster image
    CheckUrl {
        /// URL to check
        url: String,
    },
}

fn parse_kind(s: &str) -> std::result::Result<SubjectKind, String> {
    s.parse().map_err(|e: hero_image::DiscoveryError| e.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hero_image=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(search_enabled = config.search.is_some(), "Configuration loaded");

    match cli.command {
        Commands::Discover {
            name,
            kind,
            region,
            country,
            json,
        } => {
            let descriptor = EntityDescriptor::new(name, kind)
                .context("Invalid entity")?
                .with_region_opt(region)
                .with_country_opt(country);
            cmd_discover(&config, &descriptor, json).await
        }
        Commands::CheckUrl { url } => cmd_check_url(&config, &url).await,
    }
}

async fn cmd_discover(config: &Config, descriptor: &EntityDescriptor, json: bool) -> Result<()> {
    let Some(credentials) = config.search.as_ref().filter(|c| c.is_complete()) else {
        bail!("image search is not configured; set IMAGE_SEARCH_API_KEY and IMAGE_SEARCH_ENGINE_ID");
    };

    let probe = HttpProbe::with_config(&config.probe_config()).context("Failed to build probe")?;
    let searcher = GoogleImageSearcher::new(credentials).with_timeout(config.search_timeout);

    tracing::info!(
        name = %descriptor.name(),
        kind = %descriptor.subject_kind(),
        budget_secs = config.discovery_timeout.as_secs(),
        "Running discovery"
    );

    let result = match config.search_requests_per_second {
        Some(rps) => discover_with(searcher.rate_limited(rps), probe, config, descriptor).await,
        None => discover_with(searcher, probe, config, descriptor).await,
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to encode result")?
        );
    } else {
        match &result {
            DiscoveryResult::Found(url) => println!("{}", url),
            DiscoveryResult::NotFound => println!("No acceptable image found"),
        }
    }
    Ok(())
}

async fn discover_with<S: ImageSearcher>(
    searcher: S,
    probe: HttpProbe,
    config: &Config,
    descriptor: &EntityDescriptor,
) -> DiscoveryResult {
    ImageDiscovery::new(searcher, probe)
        .with_config(DiscoveryConfig::new().with_timeout(config.discovery_timeout))
        .discover_with_timeout(descriptor, None)
        .await
}

async fn cmd_check_url(config: &Config, url: &str) -> Result<()> {
    let probe = HttpProbe::with_config(&config.probe_config()).context("Failed to build probe")?;
    let validator = StandaloneValidator::new(probe);
    tracing::info!(url = %url, "Checking URL");

    match validator.validate(Some(url)).await {
        Some(url) => println!("direct image: {}", url),
        None => println!("rejected: not a verifiable direct image"),
    }
    Ok(())
}

use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use stormcheck::api::fetch_kml;
use stormcheck::config::{FileConfig, OutputFormat, parse_utc_offset};
use stormcheck::geometry::Point;
use stormcheck::kml::{ParseOptions, load_kml, parse_kml};
use stormcheck::report::{render_json, render_text, report};

/// Check whether a location falls inside convective outlook hazard areas
///
/// Examples:
///   # Check Norman, OK against a downloaded Day 1 outlook
///   stormcheck --lat 35.22 --lng -97.44 --kml day1otlk.kml
///
///   # Fetch the outlook and print JSON, times in US Eastern daylight time
///   stormcheck --lat 40.71 --lng -74.00 --url https://example.test/day1otlk.kml \
///       --utc-offset -04:00 --format json
///
///   # Use a config file
///   stormcheck --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "stormcheck")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches stormcheck.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Latitude of the location to check
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the location to check
    #[arg(long, allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Outlook KML file to read
    #[arg(short = 'k', long, conflicts_with = "url")]
    kml: Option<PathBuf>,

    /// URL to download the outlook KML from
    #[arg(short = 'u', long)]
    url: Option<String>,

    /// UTC offset times are shown in, e.g. -05:00 (defaults to -06:00)
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<String>,

    /// Output format
    #[arg(short = 'f', long)]
    format: Option<OutputFormat>,

    /// Fail if any placemark in the outlook could not be parsed
    #[arg(long)]
    strict: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

enum Source {
    File(PathBuf),
    Url(String),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            Some(FileConfig::load_from(config_path)?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };
    let file_config = file_config.unwrap_or_default();

    let lat = args.lat.or(file_config.lat).unwrap_or(0.0);
    let lng = args.lng.or(file_config.lng).unwrap_or(0.0);
    let format = args.format.unwrap_or(file_config.format);
    let strict = args.strict || file_config.strict;
    let verbose = args.verbose || file_config.verbose;
    let utc_offset = args
        .utc_offset
        .clone()
        .unwrap_or_else(|| file_config.utc_offset.clone());
    let offset = parse_utc_offset(&utc_offset).context("Invalid --utc-offset")?;

    // A zero coordinate is almost always a forgotten flag
    if lat == 0.0 {
        warn!("You forgot to specify --lat FLOAT64");
    }
    if lng == 0.0 {
        warn!("You forgot to specify --lng FLOAT64");
    }

    let source = match (args.kml.clone(), args.url.clone()) {
        (Some(path), _) => Source::File(path),
        (None, Some(url)) => Source::Url(url),
        (None, None) => match (file_config.kml.clone(), file_config.url.clone()) {
            (Some(path), _) => Source::File(path),
            (None, Some(url)) => Source::Url(url),
            (None, None) => bail!("Must provide an outlook with --kml FILENAME or --url URL"),
        },
    };

    if verbose {
        eprintln!("Configuration:");
        eprintln!("  Location: ({:.4}, {:.4})", lat, lng);
        match &source {
            Source::File(path) => eprintln!("  Outlook file: {}", path.display()),
            Source::Url(url) => eprintln!("  Outlook URL: {}", url),
        }
        eprintln!("  UTC offset: {}", offset);
        eprintln!("  Format: {:?}", format);
        eprintln!("  Strict: {}", strict);
        eprintln!();
    }

    let opts = ParseOptions::new(offset);
    let ingest = match source {
        Source::File(path) => {
            let spinner = create_spinner("Reading outlook...");
            let start = Instant::now();
            let ingest = load_kml(&path, &opts)
                .with_context(|| format!("Failed to load outlook from {}", path.display()))?;
            spinner.finish_and_clear();
            info!(
                "Read {} regions from {} [{:.1}s]",
                ingest.catalog.region_count(),
                path.display(),
                start.elapsed().as_secs_f32()
            );
            ingest
        }
        Source::Url(url) => {
            let spinner = create_spinner("Downloading outlook...");
            let start = Instant::now();
            let body = fetch_kml(&url, &file_config.fetch).context("Failed to download outlook")?;
            spinner.set_message("Parsing outlook...");
            let ingest = parse_kml(&body, &opts).context("Failed to parse downloaded outlook")?;
            spinner.finish_and_clear();
            info!(
                "Fetched {} regions from {} [{:.1}s]",
                ingest.catalog.region_count(),
                url,
                start.elapsed().as_secs_f32()
            );
            ingest
        }
    };

    if !ingest.issues.is_empty() {
        if strict {
            for issue in &ingest.issues {
                eprintln!("  {}", issue);
            }
            bail!(
                "Outlook has {} unparsable placemarks (--strict)",
                ingest.issues.len()
            );
        }
        warn!("{} placemarks were skipped or have no validity window", ingest.issues.len());
    }
    if ingest.catalog.is_empty() {
        warn!("Outlook has no hazard regions, nothing to check against");
    }

    let point = Point::new(lat, lng);
    let result = report(point, &ingest.catalog);
    debug!(
        "{} matches under {} validity announcements",
        result.matches().count(),
        result.interval_announcements()
    );

    match format {
        OutputFormat::Text => print!(
            "{}",
            render_text(&result, ingest.catalog.issued.as_ref(), offset)
        ),
        OutputFormat::Json => println!(
            "{}",
            render_json(&result).context("Failed to serialize report")?
        ),
    }

    info!("Done in {:.2}s", total_start.elapsed().as_secs_f32());

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

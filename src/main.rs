use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use poi_nearby::api::HttpTransport;
use poi_nearby::config::{ConfigSearch, DEFAULT_RADIUS, FileConfig, OutputFormat};
use poi_nearby::osm::CategoryFallback;
use poi_nearby::query::{OutputMode, UnknownCategoryPolicy};
use poi_nearby::{PoiRecord, SearchRequest, find_nearby};

/// Find statues, monuments, temples, museums and landmarks near a coordinate
///
/// Examples:
///   # Museums within 250 m of the Saint Petersburg datsan
///   poi-nearby --lat 59.955232 --lon 30.323435 -r 250 -t museum
///
///   # Everything known, as JSON
///   poi-nearby --lat 48.8584 --lon 2.2945 --format json
///
///   # Worship places, keeping records whose religion did not match
///   poi-nearby --lat 59.955232 --lon 30.323435 -t church,datsan,mosque --lenient
#[derive(Parser, Debug)]
#[command(name = "poi-nearby")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches poi-nearby.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Latitude of the search centre
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the search centre
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Search radius in meters [default: 1000]
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    radius: Option<i32>,

    /// Categories to search for (comma separated or repeated).
    /// Known: statue, monument, church, datsan, mosque, hindu-temple, museum, landmark
    #[arg(short = 't', long = "category", value_delimiter = ',')]
    categories: Vec<String>,

    /// Output format
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Keep records whose category was not requested
    #[arg(long)]
    lenient: bool,

    /// What to do with category names that are not recognised
    #[arg(long)]
    unknown_categories: Option<UnknownCategoryPolicy>,

    /// How to label records whose category was not requested
    #[arg(long)]
    fallback: Option<CategoryFallback>,

    /// Report an empty website tag as-is instead of trying contact:website
    #[arg(long)]
    keep_empty_website: bool,

    /// Overpass output statement
    #[arg(long)]
    output_mode: Option<OutputMode>,

    /// Zoom level used in map links
    #[arg(long)]
    zoom: Option<u8>,

    /// Overpass API endpoint
    #[arg(long)]
    overpass_url: Option<String>,

    /// Client-side request timeout in seconds (none by default)
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let search = match args.config {
        Some(ref config_path) => ConfigSearch {
            config: Some(
                FileConfig::from_file(config_path).context("Failed to load config file")?,
            ),
            path: Some(config_path.clone()),
            skipped: Vec::new(),
        },
        None => FileConfig::load(),
    };
    let file_config = search.config.unwrap_or_default();

    let verbose = args.verbose || file_config.verbose;
    init_logging(verbose);

    for error in &search.skipped {
        tracing::warn!(%error, "ignoring config file");
    }
    if let Some(path) = &search.path {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    let (Some(lat), Some(lon)) = (args.lat.or(file_config.lat), args.lon.or(file_config.lon))
    else {
        bail!("Must provide --lat and --lon (or set lat/lon in the config file)");
    };
    let radius = args.radius.or(file_config.radius).unwrap_or(DEFAULT_RADIUS);
    let format = args.format.or(file_config.format).unwrap_or_default();

    let mut request = SearchRequest::new(lat, lon).with_radius(radius);
    if !args.categories.is_empty() {
        request = request.with_categories(args.categories.clone());
    } else if let Some(categories) = file_config.categories.clone() {
        request = request.with_categories(categories);
    }

    let mut filter = file_config.filter.clone().unwrap_or_default();
    if args.lenient {
        filter.strict_category_filter = false;
    }
    if args.keep_empty_website {
        filter.empty_website_is_missing = false;
    }
    if let Some(policy) = args.unknown_categories {
        filter.unknown_categories = policy;
    }
    if let Some(fallback) = args.fallback {
        filter.fallback = fallback;
    }
    if let Some(mode) = args.output_mode {
        filter.output_mode = mode;
    }
    if let Some(zoom) = args.zoom {
        filter.zoom = zoom;
    }

    let mut overpass = file_config.overpass.clone().unwrap_or_default();
    if let Some(url) = args.overpass_url.clone() {
        overpass.url = url;
    }
    if args.timeout.is_some() {
        overpass.timeout_secs = args.timeout;
    }

    tracing::debug!(?request, ?filter, ?overpass, "resolved configuration");

    let transport = HttpTransport::new(&overpass).context("Failed to create HTTP client")?;

    let spinner = create_spinner("Querying Overpass API...");
    let start = Instant::now();
    let records = find_nearby(&request, &transport, &filter);
    spinner.finish_and_clear();
    tracing::info!(
        records = records.len(),
        elapsed_secs = start.elapsed().as_secs_f32(),
        "search finished"
    );

    match format {
        OutputFormat::Text => print_records(&records),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&records).context("Failed to serialize records")?
        ),
    }

    Ok(())
}

fn print_records(records: &[PoiRecord]) {
    if records.is_empty() {
        println!("No objects found or the request failed.");
        return;
    }

    println!("Found objects:");
    for record in records {
        println!("Name: {}", record.name);
        println!("Category: {}", record.category);
        println!("OSM link: {}", record.osm_url);
        println!("Map link: {}", record.map_url);
        println!("Website: {}", record.website);
        println!("Coordinates: ({}, {})", record.latitude, record.longitude);
        println!("Address: {}", record.address);
        println!("{}", "-".repeat(40));
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "poi_nearby=debug"
    } else {
        "poi_nearby=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // stdout carries the records; diagnostics go to stderr
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

//! House-point enrichment pipeline.
//!
//! Loads a CSV of house locations, joins each point to the nearest street
//! within the search radius, and exports the flattened five-field CSV.

mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use callejero::join::DEFAULT_SEARCH_RADIUS_M;
use callejero::pipeline::{run, JobParams};
use callejero::roads::DEFAULT_NAME_FIELD;

use crate::config::JobFile;

#[derive(Parser, Debug)]
#[command(name = "enrich")]
#[command(about = "Join house points to the nearest street and export a flattened CSV")]
struct Args {
    /// Input CSV of house locations (columns NUM, LATITUD, LONGITUD, COD_ONE)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Road network GeoJSON (line features with a name property)
    #[arg(short, long)]
    roads: Option<PathBuf>,

    /// Working directory for intermediate artifacts
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum match distance in meters
    #[arg(long)]
    radius: Option<f64>,

    /// Property carrying the street name in the road network
    #[arg(long)]
    name_field: Option<String>,

    /// Optional TOML job file (flags override its values)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let file = match &args.config {
        Some(path) => JobFile::load_from_file(path)?,
        None => JobFile::default(),
    };

    let params = JobParams {
        input: args
            .input
            .or(file.input)
            .unwrap_or_else(|| PathBuf::from("houses.csv")),
        roads: args
            .roads
            .or(file.roads)
            .unwrap_or_else(|| PathBuf::from("roads.geojson")),
        workspace: args
            .workspace
            .or(file.workspace)
            .unwrap_or_else(|| PathBuf::from("workspace")),
        output: args
            .output
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from("houses_enriched.csv")),
        search_radius_m: args
            .radius
            .or(file.search_radius_m)
            .unwrap_or(DEFAULT_SEARCH_RADIUS_M),
        name_field: args
            .name_field
            .or(file.name_field)
            .unwrap_or_else(|| DEFAULT_NAME_FIELD.to_string()),
    };

    info!("Callejero Enrichment Pipeline");
    info!("Input: {}", params.input.display());
    info!("Roads: {}", params.roads.display());
    info!("Search radius: {} m", params.search_radius_m);

    let start = std::time::Instant::now();
    let summary = run(&params)?;

    println!("\n=== Summary ===");
    println!("Input rows: {}", summary.input_rows);
    println!("Road segments: {}", summary.road_segments);
    println!("Matched: {}", summary.matched_rows);
    println!("Dropped (no road within radius): {}", summary.dropped_rows);
    println!("Elapsed: {:.2?}", start.elapsed());
    println!("Output: {}", params.output.display());

    Ok(())
}

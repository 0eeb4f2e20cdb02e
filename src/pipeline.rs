//! Sequential pipeline orchestration.
//!
//! One-shot run: load houses, build points, index the road network, join,
//! export. Every stage blocks; any stage error aborts the run.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::export::export_csv;
use crate::join::{nearest_join, RoadSpatialIndex};
use crate::loader::load_houses;
use crate::roads::load_road_network;
use crate::workspace::{RunManifest, Workspace};

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct JobParams {
    pub input: PathBuf,
    pub roads: PathBuf,
    pub workspace: PathBuf,
    pub output: PathBuf,
    pub search_radius_m: f64,
    pub name_field: String,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub input_rows: usize,
    pub matched_rows: usize,
    pub dropped_rows: usize,
    pub road_segments: usize,
}

/// Run the whole pipeline.
pub fn run(params: &JobParams) -> Result<RunSummary> {
    let workspace = Workspace::new(&params.workspace);
    workspace.prepare()?;
    workspace.write_manifest(&RunManifest {
        started_at: Utc::now(),
        input: params.input.clone(),
        roads: params.roads.clone(),
        search_radius_m: params.search_radius_m,
    })?;

    let houses = load_houses(&params.input)?;
    let input_rows = houses.len();

    let points: Vec<_> = houses.into_iter().map(|h| h.into_point()).collect();
    workspace.write_points(&points)?;

    let segments = load_road_network(&params.roads, &params.name_field)?;
    let road_segments = segments.len();
    let index = RoadSpatialIndex::build(segments);

    let joined = nearest_join(points, &index, params.search_radius_m);
    workspace.write_joined(&joined)?;

    export_csv(&params.output, &joined)?;

    let summary = RunSummary {
        input_rows,
        matched_rows: joined.len(),
        dropped_rows: input_rows - joined.len(),
        road_segments,
    };
    info!(
        "Run complete: {} in, {} matched, {} dropped",
        summary.input_rows, summary.matched_rows, summary.dropped_rows
    );
    Ok(summary)
}

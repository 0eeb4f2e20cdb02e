//! Callejero - house-point street enrichment over a reference road network
//!
//! This library provides the pipeline stages shared by the `enrich` binary:
//! CSV ingest, point construction, nearest-road join, and export.

pub mod export;
pub mod join;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod roads;
pub mod workspace;

pub use models::{HousePoint, HouseRecord, JoinedRecord, RoadSegment};

//! Core data models for the enrichment pipeline.

pub mod house;
pub mod road;

pub use house::{HousePoint, HouseRecord, WGS84_EPSG};
pub use road::{JoinedRecord, RoadSegment};

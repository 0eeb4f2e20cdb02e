//! Road network segments and join results.

use geo::LineString;

use super::HouseRecord;

/// One line segment of the reference road network. Read-only.
#[derive(Debug, Clone)]
pub struct RoadSegment {
    /// Position of the segment in the dataset; serves as the join identifier
    pub fid: usize,

    /// Street name (FULLNAME). Roads may be unnamed.
    pub name: Option<String>,

    pub geometry: LineString<f64>,
}

/// A house paired with its nearest road segment.
#[derive(Debug, Clone)]
pub struct JoinedRecord {
    pub house: HouseRecord,

    /// fid of the matched road segment
    pub join_fid: usize,

    pub street_name: Option<String>,

    /// Measured point-to-segment distance in meters
    pub distance_m: f64,
}

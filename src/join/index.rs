//! Spatial index for fast nearest-road lookups.

use geo::{BoundingRect, Point};
use rstar::{RTree, RTreeObject, AABB};
use std::sync::Arc;
use tracing::info;

use super::geodesy::{meters_to_lat_degrees, meters_to_lon_degrees, point_line_distance_m};
use crate::models::RoadSegment;

/// Wrapper for R-tree indexing of road segments
#[derive(Clone)]
pub struct IndexedSegment {
    pub segment: Arc<RoadSegment>,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedSegment {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedSegment {
    pub fn new(segment: RoadSegment) -> Option<Self> {
        let rect = segment.geometry.bounding_rect()?;
        Some(Self {
            segment: Arc::new(segment),
            envelope: AABB::from_corners(
                [rect.min().x, rect.min().y],
                [rect.max().x, rect.max().y],
            ),
        })
    }
}

/// A segment matched within the search radius.
pub struct NearestMatch {
    pub segment: Arc<RoadSegment>,
    pub distance_m: f64,
}

/// Spatial index over the road network using an R-tree
pub struct RoadSpatialIndex {
    tree: RTree<IndexedSegment>,
}

impl RoadSpatialIndex {
    /// Build the index from road segments
    pub fn build(segments: Vec<RoadSegment>) -> Self {
        info!("Building spatial index for {} road segments...", segments.len());

        let indexed: Vec<IndexedSegment> = segments
            .into_iter()
            .filter_map(IndexedSegment::new)
            .collect();
        let tree = RTree::bulk_load(indexed);

        info!("Spatial index built with {} entries", tree.size());
        Self { tree }
    }

    /// Find the closest segment within `radius_m` meters of a point.
    ///
    /// Candidates come from an envelope query padded by the radius; the
    /// exact point-to-segment distance decides. Equal distances keep the
    /// segment that comes first in dataset order.
    pub fn nearest_within(&self, point: &Point<f64>, radius_m: f64) -> Option<NearestMatch> {
        let pad_lat = meters_to_lat_degrees(radius_m);
        let pad_lon = meters_to_lon_degrees(radius_m, point.y());
        let query = AABB::from_corners(
            [point.x() - pad_lon, point.y() - pad_lat],
            [point.x() + pad_lon, point.y() + pad_lat],
        );

        let mut best: Option<NearestMatch> = None;
        for candidate in self.tree.locate_in_envelope_intersecting(&query) {
            let distance_m = point_line_distance_m(point, &candidate.segment.geometry);
            if distance_m > radius_m {
                continue;
            }

            let closer = match &best {
                Some(current) => {
                    distance_m < current.distance_m
                        || (distance_m == current.distance_m
                            && candidate.segment.fid < current.segment.fid)
                }
                None => true,
            };
            if closer {
                best = Some(NearestMatch {
                    segment: Arc::clone(&candidate.segment),
                    distance_m,
                });
            }
        }
        best
    }

    /// Number of indexed segments
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Coord, LineString};

    fn segment(fid: usize, name: &str, coords: Vec<(f64, f64)>) -> RoadSegment {
        RoadSegment {
            fid,
            name: Some(name.to_string()),
            geometry: LineString::new(
                coords.into_iter().map(|(x, y)| Coord { x, y }).collect(),
            ),
        }
    }

    #[test]
    fn finds_nearest_segment_within_radius() {
        let index = RoadSpatialIndex::build(vec![
            segment(0, "NEAR", vec![(-69.91, 18.48), (-69.90, 18.48)]),
            segment(1, "FAR", vec![(-69.91, 18.49), (-69.90, 18.49)]),
        ]);

        // ~22 m north of NEAR, ~1 km south of FAR
        let point = Point::new(-69.905, 18.4802);
        let m = index.nearest_within(&point, 50.0).unwrap();
        assert_eq!(m.segment.name.as_deref(), Some("NEAR"));
        assert!(m.distance_m > 20.0 && m.distance_m < 25.0, "{}", m.distance_m);
    }

    #[test]
    fn no_match_outside_radius() {
        let index =
            RoadSpatialIndex::build(vec![segment(0, "ONLY", vec![(-69.91, 18.48), (-69.90, 18.48)])]);

        // ~111 m north
        let point = Point::new(-69.905, 18.481);
        assert!(index.nearest_within(&point, 50.0).is_none());
    }

    #[test]
    fn equidistant_tie_keeps_lowest_fid() {
        let coords = vec![(-69.91, 18.48), (-69.90, 18.48)];
        let index = RoadSpatialIndex::build(vec![
            segment(0, "FIRST", coords.clone()),
            segment(1, "SECOND", coords),
        ]);

        let point = Point::new(-69.905, 18.4801);
        let m = index.nearest_within(&point, 50.0).unwrap();
        assert_eq!(m.segment.fid, 0);
    }

    #[test]
    fn empty_index() {
        let index = RoadSpatialIndex::build(vec![]);
        assert!(index.is_empty());
        assert!(index
            .nearest_within(&Point::new(-69.9, 18.48), 50.0)
            .is_none());
    }
}

//! Nearest-road spatial join.

pub mod geodesy;
mod index;

pub use index::{IndexedSegment, NearestMatch, RoadSpatialIndex};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::models::{HousePoint, JoinedRecord};

/// Default maximum match distance, in meters.
pub const DEFAULT_SEARCH_RADIUS_M: f64 = 50.0;

/// Join each point to its nearest road segment within `radius_m`.
///
/// KEEP_COMMON semantics: points with no road within the radius are
/// dropped, so the result never has more rows than the input.
pub fn nearest_join(
    points: Vec<HousePoint>,
    index: &RoadSpatialIndex,
    radius_m: f64,
) -> Vec<JoinedRecord> {
    info!(
        "Joining {} points against {} segments (radius {} m)",
        points.len(),
        index.len(),
        radius_m
    );

    let pb = ProgressBar::new(points.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
            )
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut joined = Vec::with_capacity(points.len());
    let mut dropped = 0usize;

    for point in points {
        pb.inc(1);
        match index.nearest_within(&point.geometry, radius_m) {
            Some(m) => {
                joined.push(JoinedRecord {
                    house: point.house,
                    join_fid: m.segment.fid,
                    street_name: m.segment.name.clone(),
                    distance_m: m.distance_m,
                });
            }
            None => {
                dropped += 1;
                debug!(
                    "No road within {} m of ({}, {})",
                    radius_m,
                    point.geometry.x(),
                    point.geometry.y()
                );
            }
        }
    }
    pb.finish_and_clear();

    info!("Join complete: {} matched, {} dropped", joined.len(), dropped);
    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HouseRecord, RoadSegment};
    use geo::{Coord, LineString};

    fn house(num: &str, lat: f64, lon: f64) -> HousePoint {
        HouseRecord {
            num: num.to_string(),
            latitud_raw: lat.to_string(),
            longitud_raw: lon.to_string(),
            latitud: lat,
            longitud: lon,
            cod_one: format!("ONE-{num}"),
        }
        .into_point()
    }

    fn road(fid: usize, name: Option<&str>, coords: Vec<(f64, f64)>) -> RoadSegment {
        RoadSegment {
            fid,
            name: name.map(|n| n.to_string()),
            geometry: LineString::new(
                coords.into_iter().map(|(x, y)| Coord { x, y }).collect(),
            ),
        }
    }

    #[test]
    fn keep_common_drops_unmatched_points() {
        let index = RoadSpatialIndex::build(vec![road(
            0,
            Some("CALLE DUARTE"),
            vec![(-69.91, 18.48), (-69.90, 18.48)],
        )]);

        let points = vec![
            house("12", 18.4802, -69.905), // ~22 m, kept
            house("99", 18.4810, -69.905), // ~111 m, dropped
        ];

        let joined = nearest_join(points, &index, DEFAULT_SEARCH_RADIUS_M);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].house.num, "12");
        assert_eq!(joined[0].street_name.as_deref(), Some("CALLE DUARTE"));
        assert_eq!(joined[0].join_fid, 0);
        assert!(joined[0].distance_m <= DEFAULT_SEARCH_RADIUS_M);
    }

    #[test]
    fn unnamed_road_joins_with_no_name() {
        let index =
            RoadSpatialIndex::build(vec![road(0, None, vec![(-69.91, 18.48), (-69.90, 18.48)])]);

        let joined = nearest_join(vec![house("7", 18.4801, -69.905)], &index, 50.0);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].street_name, None);
    }
}

//! Reference road-network reader.
//!
//! The network is a GeoJSON FeatureCollection of line features carrying the
//! street name in a property (`FULLNAME` in the ONE dataset). The file is a
//! read-only collaborator; this tool never writes it.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use geo::{Coord, LineString};
use geojson::{GeoJson, Value};
use tracing::{info, warn};

use crate::models::RoadSegment;

/// Default property holding the street name.
pub const DEFAULT_NAME_FIELD: &str = "FULLNAME";

/// Load the road network, flattening multi-part features into one segment
/// per part. Parts of the same feature share its name.
pub fn load_road_network(path: &Path, name_field: &str) -> Result<Vec<RoadSegment>> {
    info!("Loading road network from {}", path.display());

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read road network {}", path.display()))?;
    let geojson: GeoJson = content
        .parse()
        .context("Failed to parse road network GeoJSON")?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => bail!("Road network must be a GeoJSON FeatureCollection"),
    };

    let mut segments = Vec::new();
    let mut skipped = 0usize;

    for feature in collection.features {
        let name = feature
            .properties
            .as_ref()
            .and_then(|props| props.get(name_field))
            .and_then(|value| value.as_str())
            .map(|value| value.to_string());

        let Some(geometry) = feature.geometry else {
            skipped += 1;
            continue;
        };

        match geometry.value {
            Value::LineString(positions) => {
                if let Some(line) = line_from_positions(&positions) {
                    segments.push(RoadSegment {
                        fid: segments.len(),
                        name,
                        geometry: line,
                    });
                } else {
                    skipped += 1;
                }
            }
            Value::MultiLineString(parts) => {
                let mut usable = false;
                for positions in &parts {
                    if let Some(line) = line_from_positions(positions) {
                        segments.push(RoadSegment {
                            fid: segments.len(),
                            name: name.clone(),
                            geometry: line,
                        });
                        usable = true;
                    }
                }
                if !usable {
                    skipped += 1;
                }
            }
            _ => {
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} road features without usable line geometry", skipped);
    }
    if segments.is_empty() {
        bail!(
            "Road network {} contains no line features",
            path.display()
        );
    }

    info!("Loaded {} road segments", segments.len());
    Ok(segments)
}

fn line_from_positions(positions: &[Vec<f64>]) -> Option<LineString<f64>> {
    let coords: Vec<Coord<f64>> = positions
        .iter()
        .filter_map(|position| match position.as_slice() {
            [x, y, ..] => Some(Coord { x: *x, y: *y }),
            _ => None,
        })
        .collect();

    if coords.len() < 2 {
        return None;
    }
    Some(LineString::new(coords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_geojson(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("roads.geojson");
        std::fs::write(&path, content).unwrap();
        path
    }

    const ROADS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "FULLNAME": "CALLE DUARTE" },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-69.91, 18.48], [-69.90, 18.48]]
                }
            },
            {
                "type": "Feature",
                "properties": { "FULLNAME": "AV MELLA" },
                "geometry": {
                    "type": "MultiLineString",
                    "coordinates": [
                        [[-69.93, 18.49], [-69.92, 18.49]],
                        [[-69.92, 18.49], [-69.91, 18.50]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-69.95, 18.47], [-69.94, 18.47]]
                }
            },
            {
                "type": "Feature",
                "properties": { "FULLNAME": "NOT A ROAD" },
                "geometry": {
                    "type": "Point",
                    "coordinates": [-69.90, 18.48]
                }
            }
        ]
    }"#;

    #[test]
    fn loads_and_flattens_line_features() {
        let dir = tempdir().unwrap();
        let path = write_geojson(dir.path(), ROADS);

        let segments = load_road_network(&path, DEFAULT_NAME_FIELD).unwrap();
        // 1 linestring + 2 multilinestring parts + 1 unnamed; point skipped
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].name.as_deref(), Some("CALLE DUARTE"));
        assert_eq!(segments[1].name.as_deref(), Some("AV MELLA"));
        assert_eq!(segments[2].name.as_deref(), Some("AV MELLA"));
        assert_eq!(segments[3].name, None);
        // fids follow dataset order
        assert_eq!(segments[2].fid, 2);
    }

    #[test]
    fn custom_name_field() {
        let dir = tempdir().unwrap();
        let content = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "NOMBRE": "CALLE EL CONDE" },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-69.89, 18.47], [-69.88, 18.47]]
                }
            }]
        }"#;
        let path = write_geojson(dir.path(), content);

        let segments = load_road_network(&path, "NOMBRE").unwrap();
        assert_eq!(segments[0].name.as_deref(), Some("CALLE EL CONDE"));
    }

    #[test]
    fn no_line_features_is_an_error() {
        let dir = tempdir().unwrap();
        let content = r#"{ "type": "FeatureCollection", "features": [] }"#;
        let path = write_geojson(dir.path(), content);

        assert!(load_road_network(&path, DEFAULT_NAME_FIELD).is_err());
    }
}

//! Working directory for intermediate artifacts.
//!
//! Plays the role the geodatabase workspace played for the original tool:
//! it holds the transient point layer and joined layer between stages.
//! Artifacts at the fixed names are deleted before each run, so re-runs
//! against unchanged input produce identical output.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use geojson::{Feature, FeatureCollection, GeoJson, JsonObject, Value};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use crate::models::{HousePoint, JoinedRecord, WGS84_EPSG};

pub const POINTS_ARTIFACT: &str = "points.geojson";
pub const JOINED_ARTIFACT: &str = "joined.geojson";
pub const MANIFEST: &str = "run.json";

/// Run metadata written alongside the artifacts.
#[derive(Debug, Serialize)]
pub struct RunManifest {
    pub started_at: DateTime<Utc>,
    pub input: PathBuf,
    pub roads: PathBuf,
    pub search_radius_m: f64,
}

pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory and delete artifacts left by a previous run.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create workspace {}", self.root.display()))?;

        for name in [POINTS_ARTIFACT, JOINED_ARTIFACT, MANIFEST] {
            let path = self.root.join(name);
            if path.exists() {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to delete stale artifact {}", path.display()))?;
                debug!("Deleted stale artifact {}", path.display());
            }
        }
        Ok(())
    }

    pub fn write_manifest(&self, manifest: &RunManifest) -> Result<()> {
        let path = self.root.join(MANIFEST);
        let content = serde_json::to_string_pretty(manifest)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write manifest {}", path.display()))?;
        Ok(())
    }

    /// Materialize the constructed point layer.
    pub fn write_points(&self, points: &[HousePoint]) -> Result<PathBuf> {
        let features = points
            .iter()
            .map(|p| {
                let mut properties = JsonObject::new();
                properties.insert("NUM".to_string(), json!(p.house.num));
                properties.insert("COD_ONE".to_string(), json!(p.house.cod_one));
                Feature {
                    bbox: None,
                    geometry: Some(geojson::Geometry::new(Value::Point(vec![
                        p.geometry.x(),
                        p.geometry.y(),
                    ]))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        self.write_collection(POINTS_ARTIFACT, features)
    }

    /// Materialize the joined layer.
    pub fn write_joined(&self, joined: &[JoinedRecord]) -> Result<PathBuf> {
        let features = joined
            .iter()
            .map(|j| {
                let mut properties = JsonObject::new();
                properties.insert("NUM".to_string(), json!(j.house.num));
                properties.insert("COD_ONE".to_string(), json!(j.house.cod_one));
                properties.insert("FULLNAME".to_string(), json!(j.street_name));
                properties.insert("JOIN_FID".to_string(), json!(j.join_fid));
                properties.insert("DIST_M".to_string(), json!(j.distance_m));
                Feature {
                    bbox: None,
                    geometry: Some(geojson::Geometry::new(Value::Point(vec![
                        j.house.longitud,
                        j.house.latitud,
                    ]))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        self.write_collection(JOINED_ARTIFACT, features)
    }

    fn write_collection(&self, name: &str, features: Vec<Feature>) -> Result<PathBuf> {
        let count = features.len();

        // GeoJSON dropped `crs`, but downstream GIS tools still read it
        let mut foreign_members = JsonObject::new();
        foreign_members.insert(
            "crs".to_string(),
            json!({
                "type": "name",
                "properties": { "name": format!("EPSG:{}", WGS84_EPSG) }
            }),
        );

        let collection = FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        };

        let path = self.root.join(name);
        fs::write(&path, GeoJson::from(collection).to_string())
            .with_context(|| format!("Failed to write artifact {}", path.display()))?;
        info!("Wrote {} ({} features)", path.display(), count);
        Ok(path)
    }
}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional TOML job file. CLI flags override any value set here.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct JobFile {
    pub input: Option<PathBuf>,
    pub roads: Option<PathBuf>,
    pub workspace: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub search_radius_m: Option<f64>,
    pub name_field: Option<String>,
}

impl JobFile {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read job config file")?;
        let config: JobFile = toml::from_str(&content).context("Failed to parse job config file")?;
        Ok(config)
    }
}

//! Input CSV loader.
//!
//! Reads house rows and parses coordinates eagerly: a missing coordinate
//! column or a non-numeric value aborts the whole run, with the offending
//! row identified.

use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use thiserror::Error;
use tracing::info;

use crate::models::HouseRecord;

pub const COL_NUM: &str = "NUM";
pub const COL_LATITUD: &str = "LATITUD";
pub const COL_LONGITUD: &str = "LONGITUD";
pub const COL_COD_ONE: &str = "COD_ONE";

/// Input-validation failures, distinguishable from plain IO errors.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("column '{0}' not found in input CSV")]
    MissingColumn(&'static str),

    #[error("row {row}: {column} value '{value}' is not numeric")]
    BadCoordinate {
        row: u64,
        column: &'static str,
        value: String,
    },
}

/// Load all house records from the input CSV.
pub fn load_houses(path: &Path) -> Result<Vec<HouseRecord>> {
    info!("Loading house records from {}", path.display());

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open input CSV {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };

    let num_idx = column(COL_NUM)?;
    let lat_idx = column(COL_LATITUD)?;
    let lon_idx = column(COL_LONGITUD)?;
    let cod_idx = column(COL_COD_ONE)?;

    let mut houses = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        // header occupies line 1, data starts at line 2
        let row = (i + 2) as u64;

        let latitud_raw = record.get(lat_idx).unwrap_or("").to_string();
        let longitud_raw = record.get(lon_idx).unwrap_or("").to_string();
        let latitud = parse_coordinate(&latitud_raw, COL_LATITUD, row)?;
        let longitud = parse_coordinate(&longitud_raw, COL_LONGITUD, row)?;

        houses.push(HouseRecord {
            num: record.get(num_idx).unwrap_or("").to_string(),
            latitud_raw,
            longitud_raw,
            latitud,
            longitud,
            cod_one: record.get(cod_idx).unwrap_or("").to_string(),
        });
    }

    info!("Loaded {} house records", houses.len());
    Ok(houses)
}

fn parse_coordinate(value: &str, column: &'static str, row: u64) -> Result<f64, LoadError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| LoadError::BadCoordinate {
            row,
            column,
            value: value.to_string(),
        })
}

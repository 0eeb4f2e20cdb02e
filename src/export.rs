//! Final CSV export.

use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;
use tracing::info;

use crate::models::JoinedRecord;

/// Output header, in the fixed field order of the original extract.
pub const OUTPUT_HEADER: [&str; 5] = ["NUM", "LATITUD", "LONGITUD", "COD_ONE", "FULLNAME"];

/// Write the five-field projection of the joined rows.
///
/// Missing values render as empty strings, never a placeholder. The
/// coordinate columns echo the input text untouched; fields containing
/// separators or quotes are quoted per RFC 4180.
pub fn export_csv(path: &Path, joined: &[JoinedRecord]) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create output CSV {}", path.display()))?;

    writer.write_record(OUTPUT_HEADER)?;
    for record in joined {
        writer.write_record([
            record.house.num.as_str(),
            record.house.latitud_raw.as_str(),
            record.house.longitud_raw.as_str(),
            record.house.cod_one.as_str(),
            record.street_name.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush()?;

    info!("Exported {} rows to {}", joined.len(), path.display());
    Ok(())
}

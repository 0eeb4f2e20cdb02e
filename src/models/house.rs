//! House records and their point-geometry form.

use geo::Point;
use serde::{Deserialize, Serialize};

/// EPSG code of the geographic frame all coordinates are interpreted in.
pub const WGS84_EPSG: u32 = 4326;

/// One row of the input CSV.
///
/// Coordinate fields keep the raw text next to the parsed value so the
/// export can echo input coordinates byte-for-byte.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseRecord {
    /// House number (NUM)
    pub num: String,

    /// LATITUD exactly as it appeared in the input
    pub latitud_raw: String,

    /// LONGITUD exactly as it appeared in the input
    pub longitud_raw: String,

    pub latitud: f64,
    pub longitud: f64,

    /// Unique identifier code (COD_ONE)
    pub cod_one: String,
}

impl HouseRecord {
    /// Reinterpret the record as a WGS84 point feature.
    pub fn into_point(self) -> HousePoint {
        let geometry = Point::new(self.longitud, self.latitud);
        HousePoint {
            house: self,
            geometry,
        }
    }
}

/// A house record lifted into a point feature.
#[derive(Debug, Clone)]
pub struct HousePoint {
    pub house: HouseRecord,
    pub geometry: Point<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_uses_lon_lat_order() {
        let record = HouseRecord {
            num: "12".to_string(),
            latitud_raw: "18.4800".to_string(),
            longitud_raw: "-69.9000".to_string(),
            latitud: 18.48,
            longitud: -69.9,
            cod_one: "ONE-001".to_string(),
        };

        let point = record.into_point();
        assert_eq!(point.geometry.x(), -69.9);
        assert_eq!(point.geometry.y(), 18.48);
        assert_eq!(point.house.latitud_raw, "18.4800");
    }
}

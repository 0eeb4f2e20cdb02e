//! Distance helpers for WGS84 coordinates.

use geo::{Coord, LineString, Point};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree of latitude (and of longitude at the equator).
const METERS_PER_DEGREE: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// Haversine distance between two points in meters
pub fn haversine_distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Degrees of latitude spanning `meters`.
pub fn meters_to_lat_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Degrees of longitude spanning `meters` at the given latitude.
pub fn meters_to_lon_degrees(meters: f64, lat: f64) -> f64 {
    let cos_lat = lat.to_radians().cos().max(1e-6);
    meters / (METERS_PER_DEGREE * cos_lat)
}

/// Point-to-linestring distance in meters.
///
/// Works on a local equirectangular frame centered on the point; accurate
/// to well under a meter at search-radius scale.
pub fn point_line_distance_m(point: &Point<f64>, line: &LineString<f64>) -> f64 {
    let kx = METERS_PER_DEGREE * point.y().to_radians().cos();
    let ky = METERS_PER_DEGREE;
    let project =
        |c: &Coord<f64>| -> (f64, f64) { ((c.x - point.x()) * kx, (c.y - point.y()) * ky) };

    let mut best = f64::INFINITY;
    for pair in line.0.windows(2) {
        let d = origin_segment_distance(project(&pair[0]), project(&pair[1]));
        if d < best {
            best = d;
        }
    }
    best
}

/// Distance from the origin to segment a-b in the local frame.
fn origin_segment_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (ax, ay) = a;
    let (bx, by) = b;
    let dx = bx - ax;
    let dy = by - ay;
    let len2 = dx * dx + dy * dy;

    let t = if len2 == 0.0 {
        0.0
    } else {
        ((-ax) * dx + (-ay) * dy) / len2
    };
    let t = t.clamp(0.0, 1.0);

    let cx = ax + t * dx;
    let cy = ay + t * dy;
    (cx * cx + cy * cy).sqrt()
}

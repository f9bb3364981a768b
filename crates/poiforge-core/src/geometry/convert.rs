use std::f64::consts::PI;

use super::{Coordinate, Polygon};

/// Krasovsky 1940 semi-major axis used by the GCJ-02 obfuscation
const A: f64 = 6378245.0;
/// Krasovsky 1940 first eccentricity squared
const EE: f64 = 0.00669342162296594323;

/// Bounding box inside which GCJ-02 offsets are applied
const CHINA_LON: (f64, f64) = (72.004, 137.8347);
const CHINA_LAT: (f64, f64) = (0.8293, 55.8271);

/// Errors raised while converting coordinates
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error("non-finite coordinate at index {index}")]
    NonFinite { index: usize },
}

fn transform_lat(x: f64, y: f64) -> f64 {
    let mut ret = -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * x * y + 0.2 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (y * PI).sin() + 40.0 * (y / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (160.0 * (y / 12.0 * PI).sin() + 320.0 * (y * PI / 30.0).sin()) * 2.0 / 3.0;
    ret
}

fn transform_lon(x: f64, y: f64) -> f64 {
    let mut ret = 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (x * PI).sin() + 40.0 * (x / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (150.0 * (x / 12.0 * PI).sin() + 300.0 * (x / 30.0 * PI).sin()) * 2.0 / 3.0;
    ret
}

/// True when the point lies outside the region where GCJ-02 differs from WGS84
pub fn out_of_china((lon, lat): Coordinate) -> bool {
    !(CHINA_LON.0..=CHINA_LON.1).contains(&lon) || !(CHINA_LAT.0..=CHINA_LAT.1).contains(&lat)
}

/// Convert a single GCJ-02 point to WGS84.
///
/// Uses the single-step inverse of the published forward offset, which is
/// accurate to roughly a metre inside China. Points outside China are
/// returned unchanged.
pub fn gcj02_to_wgs84(point: Coordinate) -> Coordinate {
    if out_of_china(point) {
        return point;
    }
    let (lon, lat) = point;
    let mut d_lat = transform_lat(lon - 105.0, lat - 35.0);
    let mut d_lon = transform_lon(lon - 105.0, lat - 35.0);
    let rad_lat = lat / 180.0 * PI;
    let magic = 1.0 - EE * rad_lat.sin() * rad_lat.sin();
    let sqrt_magic = magic.sqrt();
    d_lat = (d_lat * 180.0) / ((A * (1.0 - EE)) / (magic * sqrt_magic) * PI);
    d_lon = (d_lon * 180.0) / (A / sqrt_magic * rad_lat.cos() * PI);
    (lon - d_lon, lat - d_lat)
}

/// Convert a point sequence, rejecting any non-finite input.
///
/// The output has the same length and order as the input.
pub fn convert_points(points: &[Coordinate]) -> Result<Vec<Coordinate>, ConvertError> {
    points
        .iter()
        .enumerate()
        .map(|(index, &(x, y))| {
            if x.is_finite() && y.is_finite() {
                Ok(gcj02_to_wgs84((x, y)))
            } else {
                Err(ConvertError::NonFinite { index })
            }
        })
        .collect()
}

/// Convert every ring of a polygon
pub fn convert_polygon(polygon: &Polygon) -> Result<Polygon, ConvertError> {
    polygon.iter().map(|ring| convert_points(ring)).collect()
}

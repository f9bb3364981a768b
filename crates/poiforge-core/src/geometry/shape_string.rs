use serde_json::Value;

use super::normalize::{AXIS_SEPARATOR, POINT_SEPARATOR, RING_SEPARATOR};
use super::{Coordinate, Ring};

/// Default number of decimal places in emitted shape strings
pub const DEFAULT_PRECISION: usize = 6;

#[derive(thiserror::Error, Debug)]
pub enum ShapeStringError {
    #[error("only Polygon or MultiPolygon geometries can be converted, got {0}")]
    UnsupportedGeometry(String),

    #[error("malformed coordinates: {0}")]
    MalformedCoordinates(String),
}

/// Encode one ring as `lon,lat;lon,lat;...`
///
/// With `close_ring` the first vertex is repeated at the end when missing;
/// without it a repeated closing vertex is dropped.
pub fn coordinates_to_shape_string(coords: &[Coordinate], precision: usize, close_ring: bool) -> String {
    if coords.is_empty() {
        return String::new();
    }
    let mut points: Vec<Coordinate> = coords.to_vec();
    let closed = points.first() == points.last();
    if closed && !close_ring && points.len() > 1 {
        points.pop();
    } else if close_ring && !closed {
        points.push(points[0]);
    }

    points
        .iter()
        .map(|(lon, lat)| format!("{lon:.precision$}{AXIS_SEPARATOR}{lat:.precision$}"))
        .collect::<Vec<_>>()
        .join(&POINT_SEPARATOR.to_string())
}

/// Encode several rings, joined by `@`; empty rings are skipped
pub fn rings_to_shape_string(rings: &[Ring], precision: usize, close_rings: bool) -> String {
    rings
        .iter()
        .map(|ring| coordinates_to_shape_string(ring, precision, close_rings))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(&RING_SEPARATOR.to_string())
}

fn ring_from_json(ring: &Value) -> Result<Ring, ShapeStringError> {
    let points = ring
        .as_array()
        .ok_or_else(|| ShapeStringError::MalformedCoordinates("ring is not an array".to_string()))?;
    points
        .iter()
        .map(|point| {
            let pair = point.as_array().filter(|pair| pair.len() >= 2).ok_or_else(|| {
                ShapeStringError::MalformedCoordinates(format!("invalid position {point}"))
            })?;
            match (pair[0].as_f64(), pair[1].as_f64()) {
                (Some(lon), Some(lat)) => Ok((lon, lat)),
                _ => Err(ShapeStringError::MalformedCoordinates(format!("invalid position {point}"))),
            }
        })
        .collect()
}

fn rings_from_json(rings: &Value) -> Result<Vec<Ring>, ShapeStringError> {
    rings
        .as_array()
        .map(|rings| rings.iter().map(ring_from_json).collect())
        .unwrap_or_else(|| Ok(Vec::new()))
}

/// Convert a GeoJSON Feature's Polygon/MultiPolygon geometry to a shape string
pub fn feature_to_shape_string(
    feature: &Value,
    precision: usize,
    close_rings: bool,
) -> Result<String, ShapeStringError> {
    let geometry = feature.get("geometry").unwrap_or(&Value::Null);
    let geometry_type = geometry.get("type").and_then(Value::as_str).unwrap_or("");
    let coordinates = geometry.get("coordinates").unwrap_or(&Value::Null);

    let rings = match geometry_type {
        "Polygon" => rings_from_json(coordinates)?,
        "MultiPolygon" => {
            let mut rings = Vec::new();
            for polygon in coordinates.as_array().map(Vec::as_slice).unwrap_or_default() {
                rings.extend(rings_from_json(polygon)?);
            }
            rings
        }
        other => return Err(ShapeStringError::UnsupportedGeometry(other.to_string())),
    };
    Ok(rings_to_shape_string(&rings, precision, close_rings))
}

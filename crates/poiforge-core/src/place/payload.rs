//! Decoding of the map provider's POI detail response.
//!
//! The response layout is owned by the provider; only the fields used here
//! are looked at and everything else is kept verbatim in `raw`.

use serde_json::Value;

use super::{MiningShape, PlaceDetail, PlaceMetadata};
use crate::geometry::{self, ConvertError, Coordinate};

/// Errors surfaced when a detail response cannot be turned into a place
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("detail response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("detail response returned status={0}")]
    Status(String),

    #[error("detail response geometry could not be converted: {0}")]
    Geometry(#[from] ConvertError),
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn field(object: &Value, key: &str) -> String {
    text(object.get(key)).unwrap_or_default()
}

fn parse_number(value: Option<&Value>) -> Option<f64> {
    let number: f64 = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn parse_center(value: Option<&Value>) -> Option<Coordinate> {
    let text = value?.as_str()?;
    let (lon, lat) = text.split_once(',')?;
    let lon: f64 = lon.trim().parse().ok()?;
    let lat: f64 = lat.trim().parse().ok()?;
    (lon.is_finite() && lat.is_finite()).then_some((lon, lat))
}

fn parse_level(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn status_of(payload: &Value) -> String {
    match payload.get("status") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "None".to_string(),
        Some(other) => other.to_string(),
    }
}

fn build_mining_shape(raw: &Value) -> Result<Option<MiningShape>, FetchError> {
    let shape = raw.get("shape").and_then(Value::as_str).unwrap_or("");
    let gcj_rings = geometry::parse_shape_rings(shape);
    if gcj_rings.is_empty() {
        return Ok(None);
    }
    let rings = geometry::convert_polygon(&gcj_rings)?;

    let center = match parse_center(raw.get("center")) {
        Some(point) => geometry::gcj02_to_wgs84(point),
        None => rings[0][0],
    };

    Ok(Some(MiningShape {
        rings,
        level: parse_level(raw.get("level")),
        center,
        raw: raw.clone(),
    }))
}

/// Build a place from an already-decoded detail response.
///
/// `requested_id` is used when the response does not name the POI itself.
pub fn build_place_from_payload(payload: &Value, requested_id: &str) -> Result<PlaceDetail, FetchError> {
    let status = status_of(payload);
    if status != "1" {
        return Err(FetchError::Status(status));
    }

    let data = payload.get("data").cloned().unwrap_or(Value::Null);
    let base = data.get("base").cloned().unwrap_or(Value::Null);
    let shape_raw = data
        .get("spec")
        .and_then(|spec| spec.get("mining_shape"))
        .cloned()
        .unwrap_or(Value::Null);

    let mining_shape = build_mining_shape(&shape_raw)?;
    let location = match (parse_number(base.get("x")), parse_number(base.get("y"))) {
        (Some(x), Some(y)) => Some(geometry::gcj02_to_wgs84((x, y))),
        _ => None,
    };

    let poi_id = text(base.get("poiid")).unwrap_or_else(|| requested_id.to_string());
    let tag = text(base.get("tag"))
        .or_else(|| text(base.get("new_keytype")))
        .unwrap_or_default();

    match &mining_shape {
        Some(shape) => log::debug!(
            "Decoded POI {} with {} ring(s), {} vertices",
            poi_id,
            shape.rings.len(),
            shape.vertex_count()
        ),
        None => log::debug!("Decoded POI {} without outline", poi_id),
    }

    Ok(PlaceDetail {
        poi_id,
        name: field(&base, "name"),
        address: field(&base, "address"),
        telephone: field(&base, "telephone"),
        city_name: field(&base, "city_name"),
        city_adcode: field(&base, "city_adcode"),
        classify: field(&base, "classify"),
        tag,
        location,
        mining_shape,
        metadata: PlaceMetadata {
            classify: text(base.get("classify")),
            title: text(base.get("title")),
            business: text(base.get("business")),
        },
        raw: data,
    })
}

/// Decode a detail response body and build the place from it
pub fn parse_payload(body: &str, requested_id: &str) -> Result<PlaceDetail, FetchError> {
    let payload: Value = serde_json::from_str(body)?;
    build_place_from_payload(&payload, requested_id)
}

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use super::{attributes, ensure_parent, partition, ExportError, ExportReport, Exporter, Result};
use crate::geometry::{oriented, Polygon, Winding};
use crate::place::PlaceDetail;

/// Writes a single RFC 7946 FeatureCollection
#[derive(Debug, Default, Clone, Copy)]
pub struct GeoJsonExporter;

impl GeoJsonExporter {
    pub fn new() -> Self {
        Self
    }
}

fn position_rings(rings: &Polygon) -> Vec<Value> {
    rings
        .iter()
        .map(|ring| {
            let ring = oriented(ring, Winding::CounterClockwise);
            Value::Array(ring.iter().map(|&(x, y)| json!([x, y])).collect())
        })
        .collect()
}

/// Polygon for one ring, MultiPolygon with one part per ring otherwise
pub fn geometry(rings: &Polygon) -> Value {
    let parts = position_rings(rings);
    if parts.len() == 1 {
        json!({ "type": "Polygon", "coordinates": parts })
    } else {
        let polygons: Vec<Value> = parts.into_iter().map(|ring| json!([ring])).collect();
        json!({ "type": "MultiPolygon", "coordinates": polygons })
    }
}

fn feature_with_rings(place: &PlaceDetail, rings: &Polygon) -> Value {
    let properties: Map<String, Value> = attributes(place)
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect();
    json!({
        "type": "Feature",
        "properties": properties,
        "geometry": geometry(rings),
    })
}

/// Feature for a place, `None` when it has no usable outline
pub fn feature(place: &PlaceDetail) -> Option<Value> {
    let rings = place.export_rings()?;
    Some(feature_with_rings(place, &rings))
}

/// FeatureCollection of every place with an outline, plus the skipped ids
pub fn feature_collection(places: &[PlaceDetail]) -> (Value, Vec<String>) {
    let (writable, skipped) = partition(places);
    let features: Vec<Value> = writable
        .iter()
        .map(|(place, rings)| feature_with_rings(place, rings))
        .collect();
    (json!({ "type": "FeatureCollection", "features": features }), skipped)
}

impl Exporter for GeoJsonExporter {
    fn format_name(&self) -> &'static str {
        "GeoJSON"
    }

    fn extension(&self) -> &'static str {
        "geojson"
    }

    fn export_batch(&self, places: &[PlaceDetail], path: &Path) -> Result<ExportReport> {
        let (collection, skipped) = feature_collection(places);
        let written = collection["features"].as_array().map_or(0, Vec::len);
        if written == 0 {
            return Err(ExportError::NothingToExport);
        }

        ensure_parent(path)?;
        let text = serde_json::to_string_pretty(&collection)?;
        std::fs::write(path, text)?;
        log::info!(
            "Wrote {} feature(s) to {} ({} skipped)",
            written,
            path.display(),
            skipped.len()
        );

        Ok(ExportReport { path: PathBuf::from(path), written, skipped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(offset: f64) -> Vec<(f64, f64)> {
        // clockwise on purpose
        vec![
            (offset, offset),
            (offset, offset + 1.0),
            (offset + 1.0, offset + 1.0),
            (offset + 1.0, offset),
            (offset, offset),
        ]
    }

    #[test]
    fn test_single_ring_is_polygon_counter_clockwise() {
        let geometry = geometry(&vec![square(0.0)]);
        assert_eq!(geometry["type"], "Polygon");
        let ring = geometry["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 5);
        // Reversed to counter-clockwise: second vertex heads east
        assert_eq!(ring[1], json!([1.0, 0.0]));
    }

    #[test]
    fn test_multiple_rings_are_multipolygon() {
        let geometry = geometry(&vec![square(0.0), square(5.0)]);
        assert_eq!(geometry["type"], "MultiPolygon");
        assert_eq!(geometry["coordinates"].as_array().unwrap().len(), 2);
        assert_eq!(geometry["coordinates"][1][0][0], json!([5.0, 5.0]));
    }

    #[test]
    fn test_feature_properties() {
        let mut place = PlaceDetail::new("B01", "Park").with_rings(vec![square(0.0)]);
        place.address = "Road 1".to_string();
        let feature = feature(&place).unwrap();
        assert_eq!(feature["properties"]["poiid"], "B01");
        assert_eq!(feature["properties"]["address"], "Road 1");
        assert_eq!(feature["properties"]["telephone"], "");
        assert!(super::feature(&PlaceDetail::new("B02", "Bare")).is_none());
    }
}

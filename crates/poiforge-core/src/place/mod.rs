pub mod payload;
pub mod url;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::{self, Bounds, Coordinate, Polygon};

pub use payload::{build_place_from_payload, parse_payload, FetchError};
pub use url::{poi_id_from_detail_url, poi_id_from_place_url, place_url};

/// Outline polygon attached to a POI, already converted to WGS84
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningShape {
    pub rings: Polygon,
    pub level: i64,
    pub center: Coordinate,
    pub raw: Value,
}

impl MiningShape {
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.rings.iter().flatten())
    }

    pub fn vertex_count(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }
}

/// Free-form descriptive fields from the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceMetadata {
    pub classify: Option<String>,
    pub title: Option<String>,
    pub business: Option<String>,
}

/// A captured point of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    pub poi_id: String,
    pub name: String,
    pub address: String,
    pub telephone: String,
    pub city_name: String,
    pub city_adcode: String,
    pub classify: String,
    pub tag: String,
    /// WGS84 position of the POI marker, when the payload carries one
    pub location: Option<Coordinate>,
    pub mining_shape: Option<MiningShape>,
    pub metadata: PlaceMetadata,
    pub raw: Value,
}

impl PlaceDetail {
    /// Attribute-only record with no outline
    pub fn new(poi_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            poi_id: poi_id.into(),
            name: name.into(),
            address: String::new(),
            telephone: String::new(),
            city_name: String::new(),
            city_adcode: String::new(),
            classify: String::new(),
            tag: String::new(),
            location: None,
            mining_shape: None,
            metadata: PlaceMetadata::default(),
            raw: Value::Null,
        }
    }

    pub fn with_rings(mut self, rings: Polygon) -> Self {
        let center = rings.first().and_then(|ring| ring.first()).copied().unwrap_or((0.0, 0.0));
        self.mining_shape = Some(MiningShape { rings, level: 0, center, raw: Value::Null });
        self
    }

    /// Rings of the outline, if the place has a usable one
    pub fn rings(&self) -> Option<&Polygon> {
        self.mining_shape
            .as_ref()
            .map(|shape| &shape.rings)
            .filter(|rings| !rings.is_empty())
    }

    /// Closed, deduplicated rings ready for export.
    ///
    /// Rings that do not enclose an area are dropped; `None` when none is left.
    pub fn export_rings(&self) -> Option<Polygon> {
        let rings = geometry::normalize_polygon(self.rings()?.clone());
        (!rings.is_empty()).then_some(rings)
    }

    pub fn has_geometry(&self) -> bool {
        self.export_rings().is_some()
    }

    /// Name for display, falling back to the POI id
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.poi_id } else { &self.name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_geometry() {
        let bare = PlaceDetail::new("B000A1", "Park");
        assert!(!bare.has_geometry());

        let empty = PlaceDetail::new("B000A2", "Lake").with_rings(vec![]);
        assert!(!empty.has_geometry());

        let shaped = PlaceDetail::new("B000A3", "Campus")
            .with_rings(vec![vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]]);
        assert!(shaped.has_geometry());
        assert_eq!(shaped.mining_shape.as_ref().unwrap().vertex_count(), 4);

        let hollow = PlaceDetail::new("B000A4", "Line").with_rings(vec![vec![], vec![(0.0, 0.0), (1.0, 1.0)]]);
        assert!(hollow.rings().is_some());
        assert!(!hollow.has_geometry());
    }

    #[test]
    fn test_export_rings_are_closed() {
        let place = PlaceDetail::new("B000A5", "Open")
            .with_rings(vec![vec![], vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]]);
        assert_eq!(
            place.export_rings(),
            Some(vec![vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]])
        );
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        assert_eq!(PlaceDetail::new("B000A1", "").display_name(), "B000A1");
        assert_eq!(PlaceDetail::new("B000A1", "Park").display_name(), "Park");
    }
}

//! GeoJSON and Shapefile writers for captured places.
//!
//! Both exporters take a batch of places, skip the ones without an outline
//! and report how many were written and which POI ids were skipped.

pub mod dbf;
pub mod geojson;
pub mod shapefile;

use std::path::{Path, PathBuf};

use crate::geometry::Polygon;
use crate::place::PlaceDetail;

pub use geojson::GeoJsonExporter;
pub use shapefile::ShapefileExporter;

/// WKT of the geographic system every export is written in
pub const WGS84_WKT: &str = concat!(
    r#"GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563]],"#,
    r#"PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433]]"#
);

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("POI {0} has no polygon outline and cannot be exported")]
    MissingGeometry(String),

    #[error("none of the selected POIs has a usable polygon outline")]
    NothingToExport,

    #[error("shapefile too large: {0}")]
    TooLarge(String),
}

/// Outcome of a successful export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// Main output file (`.geojson` or `.shp`)
    pub path: PathBuf,
    pub written: usize,
    /// POI ids skipped for lacking geometry, in input order
    pub skipped: Vec<String>,
}

impl ExportReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// A serializer for a batch of places
pub trait Exporter {
    /// Human readable format name
    fn format_name(&self) -> &'static str;

    /// File extension of the main output, without the dot
    fn extension(&self) -> &'static str;

    /// Write every place that has geometry; fails with
    /// [`ExportError::NothingToExport`] when none has.
    fn export_batch(&self, places: &[PlaceDetail], path: &Path) -> Result<ExportReport>;

    /// Write a single place, which must have geometry
    fn export_one(&self, place: &PlaceDetail, path: &Path) -> Result<PathBuf> {
        if !place.has_geometry() {
            return Err(ExportError::MissingGeometry(place.poi_id.clone()));
        }
        self.export_batch(std::slice::from_ref(place), path)
            .map(|report| report.path)
    }
}

/// Split places into writable ones, paired with their normalized rings, and
/// the ids of those lacking usable geometry
pub(crate) fn partition(places: &[PlaceDetail]) -> (Vec<(&PlaceDetail, Polygon)>, Vec<String>) {
    let mut writable = Vec::new();
    let mut skipped = Vec::new();
    for place in places {
        match place.export_rings() {
            Some(rings) => writable.push((place, rings)),
            None => {
                log::warn!("Skipping POI {} without polygon outline", place.poi_id);
                skipped.push(place.poi_id.clone());
            }
        }
    }
    (writable, skipped)
}

/// Create the parent directory of an output path
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Attribute columns shared by both formats, in output order
pub(crate) fn attributes(place: &PlaceDetail) -> [(&'static str, &str); 5] {
    [
        ("name", place.name.as_str()),
        ("address", place.address.as_str()),
        ("telephone", place.telephone.as_str()),
        ("poiid", place.poi_id.as_str()),
        ("tag", place.tag.as_str()),
    ]
}

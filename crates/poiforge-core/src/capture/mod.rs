//! Capture session: places collected while browsing, and batch export of them.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::export::{ExportError, ExportReport, Exporter, GeoJsonExporter, ShapefileExporter};
use crate::place::PlaceDetail;

#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    #[error("select at least one export format")]
    NoFormatSelected,

    #[error("export file name must not be empty")]
    EmptyName,

    #[error("nothing has been captured yet")]
    EmptySession,

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// What a batch export should produce and where
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchExportOptions {
    pub directory: PathBuf,
    pub base_name: String,
    pub save_geojson: bool,
    pub save_shapefile: bool,
}

impl BatchExportOptions {
    pub fn new(directory: impl Into<PathBuf>, base_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            base_name: base_name.into(),
            save_geojson: true,
            save_shapefile: true,
        }
    }

    /// Timestamped default name, e.g. `capture_20240517_101500`
    pub fn timestamped_name() -> String {
        chrono::Local::now().format("capture_%Y%m%d_%H%M%S").to_string()
    }

    pub fn geojson_path(&self) -> PathBuf {
        self.directory.join(format!("{}.geojson", self.base_name))
    }

    pub fn shapefile_path(&self) -> PathBuf {
        self.directory.join(format!("{}.shp", self.base_name))
    }

    pub fn validate(&self) -> Result<(), CaptureError> {
        if !(self.save_geojson || self.save_shapefile) {
            return Err(CaptureError::NoFormatSelected);
        }
        if self.base_name.trim().is_empty() {
            return Err(CaptureError::EmptyName);
        }
        Ok(())
    }
}

/// Result of a batch export across the selected formats
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub reports: Vec<(&'static str, ExportReport)>,
    /// Union of the ids skipped by any format, sorted
    pub skipped: Vec<String>,
}

/// Places captured while browsing, in arrival order
#[derive(Debug, Default)]
pub struct CaptureSession {
    places: Vec<PlaceDetail>,
    /// Detected ids awaiting their payload, in detection order
    pending: Vec<String>,
    active: bool,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.pending.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn places(&self) -> &[PlaceDetail] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn contains(&self, poi_id: &str) -> bool {
        self.places.iter().any(|place| place.poi_id == poi_id)
    }

    /// Record a POI id seen while capturing.
    ///
    /// Returns `false` when capture is off or the id is already captured or
    /// waiting for its payload.
    pub fn note_detected(&mut self, poi_id: &str) -> bool {
        if !self.active || self.contains(poi_id) || self.is_pending(poi_id) {
            return false;
        }
        self.pending.push(poi_id.to_string());
        true
    }

    pub fn is_pending(&self, poi_id: &str) -> bool {
        self.pending.iter().any(|id| id == poi_id)
    }

    /// Pending ids, oldest detection first
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Give up waiting for a POI's payload
    pub fn drop_pending(&mut self, poi_id: &str) -> bool {
        let Some(index) = self.pending.iter().position(|id| id == poi_id) else {
            return false;
        };
        self.pending.remove(index);
        true
    }

    /// Store a place, replacing an earlier capture of the same POI.
    ///
    /// Returns `true` when the place was new.
    pub fn store(&mut self, place: PlaceDetail) -> bool {
        self.pending.retain(|id| *id != place.poi_id);
        match self.places.iter_mut().find(|existing| existing.poi_id == place.poi_id) {
            Some(existing) => {
                *existing = place;
                false
            }
            None => {
                self.places.push(place);
                true
            }
        }
    }

    pub fn remove(&mut self, poi_id: &str) -> Option<PlaceDetail> {
        let index = self.places.iter().position(|place| place.poi_id == poi_id)?;
        Some(self.places.remove(index))
    }

    pub fn clear(&mut self) {
        self.places.clear();
        self.pending.clear();
    }

    /// Default batch name for the current contents, `gaode_<count>`
    pub fn default_export_name(&self) -> String {
        format!("gaode_{}", self.places.len())
    }

    pub fn default_export_options(&self, directory: &Path) -> BatchExportOptions {
        BatchExportOptions::new(directory, self.default_export_name())
    }

    /// Export the captured places in every selected format.
    ///
    /// The session is cleared only when every selected format succeeded.
    pub fn run_batch_export(&mut self, options: &BatchExportOptions) -> Result<BatchSummary, CaptureError> {
        options.validate()?;
        if self.places.is_empty() {
            return Err(CaptureError::EmptySession);
        }

        let mut reports = Vec::new();
        let mut skipped = BTreeSet::new();

        if options.save_geojson {
            let exporter = GeoJsonExporter::new();
            let report = exporter.export_batch(&self.places, &options.geojson_path())?;
            skipped.extend(report.skipped.iter().cloned());
            reports.push((exporter.format_name(), report));
        }
        if options.save_shapefile {
            let exporter = ShapefileExporter::new();
            let report = exporter.export_batch(&self.places, &options.shapefile_path())?;
            skipped.extend(report.skipped.iter().cloned());
            reports.push((exporter.format_name(), report));
        }

        log::info!(
            "Batch export of {} place(s) finished, {} skipped",
            self.places.len(),
            skipped.len()
        );
        self.clear();
        Ok(BatchSummary { reports, skipped: skipped.into_iter().collect() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shaped(id: &str, name: &str) -> PlaceDetail {
        PlaceDetail::new(id, name)
            .with_rings(vec![vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]])
    }

    #[test]
    fn test_store_replaces_same_poi() {
        let mut session = CaptureSession::new();
        assert!(session.store(shaped("A", "first")));
        assert!(session.store(shaped("B", "other")));
        assert!(!session.store(shaped("A", "second")));
        assert_eq!(session.len(), 2);
        assert_eq!(session.places()[0].name, "second");
    }

    #[test]
    fn test_detection_requires_active_session_and_dedups() {
        let mut session = CaptureSession::new();
        assert!(!session.note_detected("A"));

        session.start();
        assert!(session.note_detected("A"));
        assert!(!session.note_detected("A"));
        assert_eq!(session.pending_count(), 1);

        session.store(shaped("A", "a"));
        assert_eq!(session.pending_count(), 0);
        assert!(!session.note_detected("A"));

        session.stop();
        assert!(!session.is_active());
    }

    #[test]
    fn test_pending_keeps_detection_order() {
        let mut session = CaptureSession::new();
        session.start();
        for id in ["B0C", "B0A", "B0D", "B0B"] {
            assert!(session.note_detected(id));
        }
        assert!(session.drop_pending("B0D"));
        assert!(!session.drop_pending("B0D"));
        session.store(shaped("B0A", "a"));

        let pending: Vec<&str> = session.pending().collect();
        assert_eq!(pending, vec!["B0C", "B0B"]);
        assert!(session.is_pending("B0B"));
    }

    #[test]
    fn test_options_validation() {
        let mut options = BatchExportOptions::new("/tmp", "batch");
        assert!(options.validate().is_ok());
        options.save_geojson = false;
        options.save_shapefile = false;
        assert!(matches!(options.validate(), Err(CaptureError::NoFormatSelected)));

        let options = BatchExportOptions::new("/tmp", "  ");
        assert!(matches!(options.validate(), Err(CaptureError::EmptyName)));
    }

    #[test]
    fn test_default_names() {
        let mut session = CaptureSession::new();
        session.store(shaped("A", "a"));
        session.store(shaped("B", "b"));
        assert_eq!(session.default_export_name(), "gaode_2");
        assert!(BatchExportOptions::timestamped_name().starts_with("capture_"));

        let options = session.default_export_options(Path::new("out"));
        assert_eq!(options.geojson_path(), PathBuf::from("out/gaode_2.geojson"));
        assert_eq!(options.shapefile_path(), PathBuf::from("out/gaode_2.shp"));
    }

    #[test]
    fn test_empty_session_export_fails() {
        let mut session = CaptureSession::new();
        let options = BatchExportOptions::new("/tmp", "x");
        assert!(matches!(session.run_batch_export(&options), Err(CaptureError::EmptySession)));
    }
}

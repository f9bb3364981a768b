// PoiForge Core Library
// Re-export all modules for external use

pub mod capture;
pub mod export;
pub mod geometry;
pub mod place;
pub mod platform;
pub mod settings;

pub use capture::{BatchExportOptions, CaptureSession};
pub use export::{ExportError, ExportReport, Exporter, GeoJsonExporter, ShapefileExporter};
pub use geometry::{Coordinate, Polygon, Ring};
pub use place::{FetchError, MiningShape, PlaceDetail};
pub use settings::Settings;

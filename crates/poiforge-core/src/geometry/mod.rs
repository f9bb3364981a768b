/// Geometry handling for captured POI outlines
///
/// Coordinates are `(longitude, latitude)` pairs. A polygon is a list of
/// independent rings, one per part of the provider's shape string.

pub mod bounds;
pub mod convert;
pub mod normalize;
pub mod orientation;
pub mod shape_string;

/// `(x, y)` = `(longitude, latitude)` in degrees
pub type Coordinate = (f64, f64);

/// Ordered vertices of one polygon part
pub type Ring = Vec<Coordinate>;

/// One or more rings; each ring is its own part, never a hole
pub type Polygon = Vec<Ring>;

pub use bounds::{fit_to_view, Bounds};
pub use convert::{convert_points, convert_polygon, gcj02_to_wgs84, out_of_china, ConvertError};
pub use normalize::{normalize_polygon, normalize_ring, parse_shape_rings};
pub use orientation::{oriented, signed_area, Winding};
pub use shape_string::{feature_to_shape_string, rings_to_shape_string, ShapeStringError};

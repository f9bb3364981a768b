// Custom log types for different event categories
pub const LOG_TYPE_CAPTURE: &str = "capture";
pub const LOG_TYPE_EXPORT: &str = "export";

// Persisted dock layout, next to settings.json
pub const DOCK_STATE_FILE: &str = "dock_state.json";

// Polygon preview styling
pub const PREVIEW_PADDING: f64 = 10.0;
pub const PREVIEW_MIN_SIZE: f32 = 200.0;

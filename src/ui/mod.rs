pub mod about_panel;
pub mod capture_panel;
pub mod captured_panel;
pub mod export_dialog;
pub mod place_panel;
pub mod preview;
pub mod selection;
pub mod settings_panel;
pub mod tabs;

// Re-export the show functions for each panel
pub use about_panel::AboutPanel;
pub use capture_panel::show_capture_panel;
pub use captured_panel::show_captured_panel;
pub use export_dialog::show_batch_export_dialog;
pub use place_panel::{show_details_panel, show_raw_json_panel};
pub use preview::show_preview_panel;
pub use settings_panel::show_settings_panel;

// Re-export tab-related types
pub use tabs::{Tab, TabKind, TabViewer};

// Re-export banner helpers
pub use selection::initialize_and_show_banner;

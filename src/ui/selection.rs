use egui_lens::ReactiveEventLogger;
use poiforge_core::platform::banner;
use poiforge_core::settings;

/// Initialize and display the application banner in the event log
pub fn initialize_and_show_banner(logger: &ReactiveEventLogger) {
    let mut app_banner = banner::Banner::new();
    app_banner.format();
    logger.log_info(&app_banner.message);

    match settings::config_dir() {
        Some(dir) => logger.log_info(&format!("Settings directory: {}", dir.display())),
        None => logger.log_warning("No config directory available; settings will not persist"),
    }
}

use egui_lens::ReactiveEventLogger;

use crate::app::PoiForgeApp;

pub fn show_settings_panel(ui: &mut egui::Ui, app: &mut PoiForgeApp) {
    let logger_state = app.logger_state.clone();
    let log_colors = app.log_colors.clone();
    let logger = ReactiveEventLogger::with_colors(&logger_state, &log_colors);

    ui.heading("Application Settings");
    ui.separator();

    // Batch export defaults
    ui.group(|ui| {
        ui.label("Batch Export Defaults");
        ui.checkbox(&mut app.settings.save_geojson, "Save GeoJSON");
        ui.checkbox(&mut app.settings.save_shapefile, "Save Shapefile");
        ui.horizontal(|ui| {
            ui.label("Directory:");
            ui.monospace(app.settings.export_dir().display().to_string());
            if ui.button("Browse...").clicked() {
                if let Some(dir) = rfd::FileDialog::new()
                    .set_directory(app.settings.export_dir())
                    .pick_folder()
                {
                    logger.log_info(&format!("Export directory set to {}", dir.display()));
                    app.settings.last_export_dir = Some(dir);
                }
            }
        });
    });

    ui.add_space(20.0);

    // Shape strings
    ui.group(|ui| {
        ui.label("Shape Strings");
        ui.horizontal(|ui| {
            ui.label("Decimal places:");
            ui.add(egui::DragValue::new(&mut app.settings.shape_precision).range(0..=12));
        });
    });

    ui.add_space(20.0);

    // Capture and log
    ui.group(|ui| {
        ui.label("Capture");
        ui.checkbox(&mut app.settings.capture_on_startup, "Start capture when the application opens");

        ui.checkbox(
            &mut app.settings.show_log_timestamps,
            "Show timestamps in the event log (next launch)",
        );
    });

    ui.add_space(20.0);

    if ui.button("💾 Save settings").clicked() {
        app.save_settings();
        logger.log_info("Settings saved");
    }
}

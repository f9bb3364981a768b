use poiforge_core::capture::BatchExportOptions;

use crate::app::PoiForgeApp;

enum DialogAction {
    Export,
    Cancel,
}

/// Batch export window, shown while `app.batch_dialog` is set
pub fn show_batch_export_dialog(ctx: &egui::Context, app: &mut PoiForgeApp) {
    let Some(options) = app.batch_dialog.as_mut() else {
        return;
    };

    let mut action = None;
    let mut open = true;
    let place_count = app.session.len();
    let shapeless = app.session.places().iter().filter(|p| !p.has_geometry()).count();

    egui::Window::new("Batch Export")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(format!("{} captured place(s)", place_count));
            if shapeless > 0 {
                ui.colored_label(
                    egui::Color32::from_rgb(230, 180, 90),
                    format!("{} without polygon will be skipped", shapeless),
                );
            }
            ui.separator();

            egui::Grid::new("batch_export_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Directory:");
                    ui.horizontal(|ui| {
                        ui.monospace(options.directory.display().to_string());
                        if ui.button("Browse...").clicked() {
                            if let Some(dir) = rfd::FileDialog::new()
                                .set_directory(&options.directory)
                                .pick_folder()
                            {
                                options.directory = dir;
                            }
                        }
                    });
                    ui.end_row();

                    ui.label("File name:");
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut options.base_name);
                        if ui.small_button("⏱").on_hover_text("Use a timestamped name").clicked() {
                            options.base_name = BatchExportOptions::timestamped_name();
                        }
                    });
                    ui.end_row();

                    ui.label("Formats:");
                    ui.horizontal(|ui| {
                        ui.checkbox(&mut options.save_geojson, "GeoJSON");
                        ui.checkbox(&mut options.save_shapefile, "Shapefile");
                    });
                    ui.end_row();
                });

            if let Err(e) = options.validate() {
                ui.colored_label(egui::Color32::from_rgb(230, 120, 120), e.to_string());
            }

            ui.add_space(10.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Cancel").clicked() {
                    action = Some(DialogAction::Cancel);
                }
                if ui
                    .add_enabled(options.validate().is_ok(), egui::Button::new("Export"))
                    .clicked()
                {
                    action = Some(DialogAction::Export);
                }
            });
        });

    if !open {
        action = Some(DialogAction::Cancel);
    }

    match action {
        Some(DialogAction::Export) => {
            if let Some(options) = app.batch_dialog.take() {
                app.run_batch_export(options);
            }
        }
        Some(DialogAction::Cancel) => app.batch_dialog = None,
        None => {}
    }
}

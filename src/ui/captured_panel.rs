use egui_extras::{Column, TableBuilder};

use crate::app::PoiForgeApp;

enum RowAction {
    Select(String),
    Remove(String),
}

/// List of places held by the capture session
pub fn show_captured_panel(ui: &mut egui::Ui, app: &mut PoiForgeApp) {
    ui.horizontal(|ui| {
        ui.heading(format!("Captured ({})", app.session.len()));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!app.session.is_empty(), egui::Button::new("💾 Batch export..."))
                .clicked()
            {
                app.open_batch_dialog();
            }
        });
    });
    ui.separator();

    if app.session.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("Nothing captured. Start capture and load detail responses.");
        });
        return;
    }

    let selected = app.current.as_ref().map(|p| p.poi_id.clone());
    let mut action = None;

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::exact(110.0)) // POI id
        .column(Column::remainder()) // Name
        .column(Column::exact(70.0)) // Vertices
        .column(Column::exact(30.0)) // Remove
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("POI id");
            });
            header.col(|ui| {
                ui.strong("Name");
            });
            header.col(|ui| {
                ui.strong("Vertices");
            });
            header.col(|_ui| {});
        })
        .body(|mut body| {
            for place in app.session.places() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        let is_selected = selected.as_deref() == Some(place.poi_id.as_str());
                        if ui.selectable_label(is_selected, &place.poi_id).clicked() {
                            action = Some(RowAction::Select(place.poi_id.clone()));
                        }
                    });
                    row.col(|ui| {
                        ui.label(place.display_name());
                    });
                    row.col(|ui| match &place.mining_shape {
                        Some(shape) if place.has_geometry() => {
                            ui.label(shape.vertex_count().to_string());
                        }
                        _ => {
                            ui.colored_label(egui::Color32::from_rgb(230, 180, 90), "none");
                        }
                    });
                    row.col(|ui| {
                        if ui.small_button("✖").on_hover_text("Remove").clicked() {
                            action = Some(RowAction::Remove(place.poi_id.clone()));
                        }
                    });
                });
            }
        });

    match action {
        Some(RowAction::Select(poi_id)) => app.select_captured(&poi_id),
        Some(RowAction::Remove(poi_id)) => app.remove_captured(&poi_id),
        None => {}
    }
}

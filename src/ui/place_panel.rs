use poiforge_core::geometry;

use crate::app::PoiForgeApp;

fn field(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.label(egui::RichText::new(label).strong());
    if value.is_empty() {
        ui.weak("-");
    } else {
        ui.label(value);
    }
    ui.end_row();
}

/// Attributes of the current place with single-place export
pub fn show_details_panel(ui: &mut egui::Ui, app: &mut PoiForgeApp) {
    let Some(place) = app.current.as_ref() else {
        ui.centered_and_justified(|ui| {
            ui.label("No place loaded");
        });
        return;
    };
    let has_geometry = place.has_geometry();

    ui.heading(place.display_name());
    ui.separator();

    egui::Grid::new("place_details")
        .num_columns(2)
        .striped(true)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            field(ui, "POI id", &place.poi_id);
            field(ui, "Address", &place.address);
            field(ui, "Telephone", &place.telephone);
            field(ui, "City", &format!("{} {}", place.city_name, place.city_adcode).trim().to_string());
            field(ui, "Classify", &place.classify);
            field(ui, "Tag", &place.tag);
            let location = place
                .location
                .map(|(lon, lat)| format!("{:.6}, {:.6}", lon, lat))
                .unwrap_or_default();
            field(ui, "Location (WGS 84)", &location);
            match &place.mining_shape {
                Some(shape) => {
                    field(ui, "Outline", &format!("{} ring(s), {} vertices", shape.rings.len(), shape.vertex_count()));
                    field(ui, "Level", &shape.level.to_string());
                }
                None => field(ui, "Outline", ""),
            }
        });

    let shape_string = place
        .rings()
        .map(|rings| geometry::rings_to_shape_string(rings, app.settings.shape_precision, true));

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(has_geometry, egui::Button::new("Save GeoJSON..."))
            .clicked()
        {
            app.export_current_geojson();
        }
        if ui
            .add_enabled(has_geometry, egui::Button::new("Save Shapefile..."))
            .clicked()
        {
            app.export_current_shapefile();
        }
        if let Some(text) = shape_string {
            if ui.button("📋 Copy shape string").clicked() {
                ui.ctx().copy_text(text);
            }
        }
    });
    if !has_geometry {
        ui.colored_label(
            egui::Color32::from_rgb(230, 180, 90),
            "This place has no polygon outline, so there is nothing to export.",
        );
    }
}

/// Pretty-printed detail response of the current place
pub fn show_raw_json_panel(ui: &mut egui::Ui, app: &mut PoiForgeApp) {
    let Some(place) = app.current.as_ref() else {
        ui.centered_and_justified(|ui| {
            ui.label("No place loaded");
        });
        return;
    };

    let mut text = serde_json::to_string_pretty(&place.raw).unwrap_or_else(|e| format!("<{}>", e));
    egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
        ui.add(
            egui::TextEdit::multiline(&mut text)
                .code_editor()
                .interactive(false)
                .desired_width(f32::INFINITY),
        );
    });
}

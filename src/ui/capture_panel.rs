use crate::app::PoiForgeApp;

/// Capture controls: URL detection, POI id, response import and pending list
pub fn show_capture_panel(ui: &mut egui::Ui, app: &mut PoiForgeApp) {
    ui.heading("Capture");
    ui.separator();

    ui.group(|ui| {
        ui.label("Detail request or place URL");
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut app.url_input)
                    .hint_text("https://ditu.amap.com/detail/get/detail?id=...")
                    .desired_width(ui.available_width() - 70.0),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Detect").clicked() || submitted {
                app.detect_from_url();
            }
        });
    });

    ui.add_space(8.0);

    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label("POI id:");
            ui.add(egui::TextEdit::singleline(&mut app.poi_input).desired_width(160.0));
            if ui.button("🌐 Open page").clicked() {
                app.open_place_page(ui.ctx());
            }
        });
        ui.horizontal(|ui| {
            if ui.button("📂 Import response...").clicked() {
                let requested = app.poi_input.trim().to_string();
                let requested = (!requested.is_empty()).then_some(requested);
                app.open_payload_files(requested.as_deref());
            }
            if ui
                .add_enabled(!app.payload_input.trim().is_empty(), egui::Button::new("Parse pasted"))
                .clicked()
            {
                app.parse_pasted_payload();
            }
        });
        ui.label("Paste a detail response:");
        egui::ScrollArea::vertical()
            .id_salt("payload_input")
            .max_height(120.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut app.payload_input)
                        .code_editor()
                        .desired_rows(5)
                        .desired_width(f32::INFINITY),
                );
            });
    });

    ui.add_space(8.0);

    // Ids seen in URLs whose response has not been loaded yet
    let pending: Vec<String> = app.session.pending().map(str::to_string).collect();
    ui.collapsing(format!("Pending ({})", pending.len()), |ui| {
        if pending.is_empty() {
            ui.label("No pending POIs");
        }
        for poi_id in pending {
            ui.horizontal(|ui| {
                ui.monospace(&poi_id);
                if ui.small_button("Use id").clicked() {
                    app.poi_input = poi_id.clone();
                }
                if ui.small_button("✖").on_hover_text("Forget this id").clicked() {
                    app.session.drop_pending(&poi_id);
                }
            });
        }
    });
}

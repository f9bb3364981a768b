use poiforge_core::platform::parameters::gui::VERSION;

pub struct AboutPanel;

impl AboutPanel {
    fn credit(ui: &mut egui::Ui, name: &str, url: &str, author: Option<&str>) {
        ui.vertical_centered(|ui| {
            ui.horizontal(|ui| {
                ui.hyperlink_to(
                    egui::RichText::new(name)
                        .size(12.0)
                        .color(egui::Color32::from_rgb(100, 150, 255)),
                    url,
                );
                if let Some(author) = author {
                    ui.label(
                        egui::RichText::new(format!(" ({})", author))
                            .size(12.0)
                            .color(egui::Color32::from_rgb(150, 150, 150)),
                    );
                }
            });
        });
    }

    pub fn render(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);

            egui::Frame::new().show(ui, |ui| {
                ui.set_width(220.0);
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("PoiForge").size(28.0).strong());

                    ui.add_space(10.0);

                    ui.label(
                        egui::RichText::new(format!("version {}", VERSION))
                            .color(egui::Color32::from_rgb(150, 150, 150))
                            .size(16.0)
                            .strong(),
                    );
                    ui.add_space(10.0);

                    ui.label(
                        egui::RichText::new("POI outline capture and export")
                            .size(16.0)
                            .strong()
                            .italics(),
                    );
                    ui.label(
                        egui::RichText::new("GCJ-02 outlines saved as WGS 84 GeoJSON and Shapefile")
                            .size(12.0)
                            .color(egui::Color32::from_rgb(150, 150, 150)),
                    );

                    ui.add_space(10.0);

                    ui.label(
                        egui::RichText::new("Built with:")
                            .size(12.0)
                            .color(egui::Color32::from_rgb(150, 150, 150)),
                    );

                    ui.add_space(5.0);

                    Self::credit(ui, "egui", "https://github.com/emilk/egui", None);
                    Self::credit(ui, "egui_dock", "https://github.com/Adanos020/egui_dock", None);
                    Self::credit(ui, "egui_mobius", "https://github.com/saturn77/egui_mobius", Some("@saturn77"));
                });
            });
        });
    }
}

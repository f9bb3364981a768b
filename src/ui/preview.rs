use egui::{Color32, Pos2, Sense, Shape, Stroke};

use poiforge_core::geometry::{fit_to_view, Coordinate};

use crate::app::PoiForgeApp;
use crate::constants::{PREVIEW_MIN_SIZE, PREVIEW_PADDING};

const RING_COLORS: [Color32; 4] = [
    Color32::from_rgb(100, 150, 255),
    Color32::from_rgb(140, 220, 140),
    Color32::from_rgb(230, 180, 90),
    Color32::from_rgb(220, 120, 200),
];

/// Draw the outline of the current place scaled to the panel
pub fn show_preview_panel(ui: &mut egui::Ui, app: &mut PoiForgeApp) {
    let Some(place) = app.current.as_ref() else {
        ui.centered_and_justified(|ui| {
            ui.label("Load a detail response to preview its outline");
        });
        return;
    };
    let Some(rings) = place.rings() else {
        ui.centered_and_justified(|ui| {
            ui.label(format!("{} has no polygon outline", place.display_name()));
        });
        return;
    };

    let size = ui.available_size().max(egui::vec2(PREVIEW_MIN_SIZE, PREVIEW_MIN_SIZE));
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, Color32::from_gray(24));

    // Fit all rings together so their relative placement is preserved
    let all_points: Vec<Coordinate> = rings.iter().flatten().copied().collect();
    let fitted = fit_to_view(&all_points, rect.width() as f64, rect.height() as f64, PREVIEW_PADDING);

    let mut offset = 0;
    for (index, ring) in rings.iter().enumerate() {
        let screen: Vec<Pos2> = fitted[offset..offset + ring.len()]
            .iter()
            .map(|&(x, y)| Pos2::new(rect.left() + x as f32, rect.top() + y as f32))
            .collect();
        offset += ring.len();

        let color = RING_COLORS[index % RING_COLORS.len()];
        painter.add(Shape::closed_line(screen, Stroke::new(1.5, color)));
    }

    if let Some(bounds) = place.mining_shape.as_ref().and_then(|shape| shape.bounds()) {
        painter.text(
            rect.left_bottom() + egui::vec2(6.0, -6.0),
            egui::Align2::LEFT_BOTTOM,
            format!(
                "{:.6}, {:.6}  to  {:.6}, {:.6}",
                bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y
            ),
            egui::FontId::monospace(11.0),
            Color32::from_gray(160),
        );
    }
}

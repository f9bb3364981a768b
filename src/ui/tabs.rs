use serde::{Deserialize, Serialize};

use egui_lens::ReactiveEventLogger;

use crate::app::PoiForgeApp;
use crate::ui;

/// Define the tabs for the DockArea
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabKind {
    Capture,
    Captured,
    Details,
    Preview,
    RawJson,
    EventLog,
    Settings,
}

/// Tab container struct for DockArea
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tab {
    pub kind: TabKind,
}

impl Tab {
    pub fn new(kind: TabKind) -> Self {
        Self { kind }
    }

    pub fn title(&self) -> String {
        match self.kind {
            TabKind::Capture => "Capture".to_string(),
            TabKind::Captured => "Captured POIs".to_string(),
            TabKind::Details => "Details".to_string(),
            TabKind::Preview => "Outline".to_string(),
            TabKind::RawJson => "Raw JSON".to_string(),
            TabKind::EventLog => "Event Log".to_string(),
            TabKind::Settings => "Settings".to_string(),
        }
    }

    pub fn content(&self, ui: &mut egui::Ui, app: &mut PoiForgeApp) {
        match self.kind {
            TabKind::Capture => ui::show_capture_panel(ui, app),
            TabKind::Captured => ui::show_captured_panel(ui, app),
            TabKind::Details => ui::show_details_panel(ui, app),
            TabKind::Preview => ui::show_preview_panel(ui, app),
            TabKind::RawJson => ui::show_raw_json_panel(ui, app),
            TabKind::EventLog => {
                let logger = ReactiveEventLogger::with_colors(&app.logger_state, &app.log_colors);
                logger.show(ui);
            }
            TabKind::Settings => ui::show_settings_panel(ui, app),
        }
    }
}

pub struct TabViewer<'a> {
    pub app: &'a mut PoiForgeApp,
}

impl egui_dock::TabViewer for TabViewer<'_> {
    type Tab = Tab;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        tab.title().into()
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut Self::Tab) {
        tab.content(ui, self.app);
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use egui_dock::{DockArea, DockState, NodeIndex, Style};

/// egui_lens imports
use egui_lens::{LogColors, ReactiveEventLogger, ReactiveEventLoggerState};
use egui_mobius_reactive::Dynamic;

use poiforge_core::capture::{BatchExportOptions, CaptureSession};
use poiforge_core::export::{Exporter, GeoJsonExporter, ShapefileExporter};
use poiforge_core::place::{self, FetchError, PlaceDetail};
use poiforge_core::platform::parameters::gui::VERSION;
use poiforge_core::settings::{self, Settings};

use crate::constants::{DOCK_STATE_FILE, LOG_TYPE_CAPTURE, LOG_TYPE_EXPORT};
use crate::ui::{self, Tab, TabKind, TabViewer};

/// The main application struct
pub struct PoiForgeApp {
    /// Places collected while capture is on
    pub session: CaptureSession,

    /// Place shown in the detail and preview tabs
    pub current: Option<PlaceDetail>,

    pub settings: Settings,

    // Logger state and colors
    pub logger_state: Dynamic<ReactiveEventLoggerState>,
    pub log_colors: Dynamic<LogColors>,

    // Text inputs
    pub poi_input: String,
    pub url_input: String,
    pub payload_input: String,

    /// Open batch export dialog, if any
    pub batch_dialog: Option<BatchExportOptions>,
    pub show_about_modal: bool,

    dock_state: DockState<Tab>,
}

impl Drop for PoiForgeApp {
    fn drop(&mut self) {
        // Save dock state when application closes
        self.save_dock_state();
        self.save_settings();
    }
}

impl PoiForgeApp {
    /// **Create a new instance of the PoiForgeApp**
    ///
    /// Loads persisted settings and dock layout, sets up the event logger and
    /// prints the startup banner into it.
    pub fn new() -> Self {
        let settings = Settings::load_or_default();

        let mut initial_logger_state = ReactiveEventLoggerState::new();
        initial_logger_state.show_timestamps = settings.show_log_timestamps;
        let logger_state = Dynamic::new(initial_logger_state);
        let log_colors = Dynamic::new(LogColors::default());

        let dock_state = Self::load_dock_state().unwrap_or_else(Self::create_default_dock_state);

        let mut session = CaptureSession::new();
        if settings.capture_on_startup {
            session.start();
        }

        let app = Self {
            session,
            current: None,
            settings,
            logger_state,
            log_colors,
            poi_input: String::new(),
            url_input: String::new(),
            payload_input: String::new(),
            batch_dialog: None,
            show_about_modal: false,
            dock_state,
        };

        {
            let logger = ReactiveEventLogger::with_colors(&app.logger_state, &app.log_colors);
            ui::initialize_and_show_banner(&logger);
        }
        app
    }

    fn create_default_dock_state() -> DockState<Tab> {
        let mut dock_state = DockState::new(vec![Tab::new(TabKind::Preview), Tab::new(TabKind::RawJson)]);
        let surface = dock_state.main_surface_mut();

        // Left column: capture controls over the captured list
        let [right, left] = surface.split_left(
            NodeIndex::root(),
            0.32,
            vec![Tab::new(TabKind::Capture), Tab::new(TabKind::Settings)],
        );
        surface.split_below(left, 0.55, vec![Tab::new(TabKind::Captured)]);

        // Right column: details and log under the preview
        let [_preview, details] = surface.split_below(right, 0.6, vec![Tab::new(TabKind::Details)]);
        surface.split_right(details, 0.5, vec![Tab::new(TabKind::EventLog)]);

        dock_state
    }

    /// Ingest the outcome of decoding a detail response
    pub fn accept_payload(&mut self, result: Result<PlaceDetail, FetchError>, source: &str) {
        let logger_state = self.logger_state.clone();
        let log_colors = self.log_colors.clone();
        let logger = ReactiveEventLogger::with_colors(&logger_state, &log_colors);

        match result {
            Ok(place) => {
                if !place.has_geometry() {
                    logger.log_warning(&format!(
                        "POI {} ({}) has no polygon outline; it can only be kept as attributes",
                        place.poi_id,
                        place.display_name()
                    ));
                } else {
                    logger.log_info(&format!("Loaded {} from {}", place.display_name(), source));
                }

                if self.session.is_active() {
                    let is_new = self.session.store(place.clone());
                    let verb = if is_new { "Captured" } else { "Updated" };
                    logger.log_custom(
                        LOG_TYPE_CAPTURE,
                        &format!("{} {} ({} total)", verb, place.poi_id, self.session.len()),
                    );
                }
                self.poi_input = place.poi_id.clone();
                self.current = Some(place);
            }
            Err(e) => {
                log::warn!("Failed to decode payload from {}: {}", source, e);
                logger.log_error(&format!("Could not read detail response from {}: {}", source, e));
            }
        }
    }

    /// Decode the pasted response text, keyed by the POI id field
    pub fn parse_pasted_payload(&mut self) {
        let requested = self.poi_input.trim().to_string();
        let result = place::parse_payload(&self.payload_input, &requested);
        if result.is_ok() {
            self.payload_input.clear();
        }
        self.accept_payload(result, "pasted text");
    }

    /// Read a saved detail response; the file stem is the fallback POI id
    pub fn import_payload_file(&mut self, path: &Path, requested_id: Option<&str>) {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let requested = requested_id.unwrap_or(&stem).to_string();
        let source = path.display().to_string();

        match fs::read_to_string(path) {
            Ok(body) => {
                let result = place::parse_payload(&body, &requested);
                self.accept_payload(result, &source);
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", source, e);
                let logger = ReactiveEventLogger::with_colors(&self.logger_state, &self.log_colors);
                logger.log_error(&format!("Could not read {}: {}", source, e));
            }
        }
    }

    /// Pick one or more saved detail responses and import them
    pub fn open_payload_files(&mut self, requested_id: Option<&str>) {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("Detail response", &["json", "txt"])
            .pick_files()
        {
            for path in paths {
                self.import_payload_file(&path, requested_id);
            }
        }
    }

    /// Recognize a POI id from a pasted detail-endpoint or place URL
    pub fn detect_from_url(&mut self) {
        let logger_state = self.logger_state.clone();
        let log_colors = self.log_colors.clone();
        let logger = ReactiveEventLogger::with_colors(&logger_state, &log_colors);

        let url = self.url_input.trim();
        let Some(poi_id) = place::poi_id_from_detail_url(url).or_else(|| place::poi_id_from_place_url(url)) else {
            logger.log_warning(&format!("No POI id found in {}", url));
            return;
        };

        self.poi_input = poi_id.clone();
        self.url_input.clear();
        if self.session.note_detected(&poi_id) {
            logger.log_custom(LOG_TYPE_CAPTURE, &format!("Detected POI {}, waiting for its detail response", poi_id));
        } else if self.session.is_active() {
            logger.log_info(&format!("POI {} already captured or pending", poi_id));
        } else {
            logger.log_info(&format!("Recognized POI {} (capture is off)", poi_id));
        }
    }

    /// Open the place page in the system browser
    pub fn open_place_page(&self, ctx: &egui::Context) {
        let poi_id = self.poi_input.trim();
        let logger = ReactiveEventLogger::with_colors(&self.logger_state, &self.log_colors);
        if poi_id.is_empty() {
            logger.log_warning("Enter a POI id first");
            return;
        }
        let url = place::place_url(poi_id);
        ctx.open_url(egui::OpenUrl::new_tab(&url));
        logger.log_info(&format!("Opened {}", url));
    }

    pub fn toggle_capture(&mut self) {
        let logger_state = self.logger_state.clone();
        let log_colors = self.log_colors.clone();
        let logger = ReactiveEventLogger::with_colors(&logger_state, &log_colors);
        if self.session.is_active() {
            self.session.stop();
            logger.log_custom(LOG_TYPE_CAPTURE, &format!("Capture stopped, {} place(s) held", self.session.len()));
        } else {
            self.session.start();
            logger.log_custom(LOG_TYPE_CAPTURE, "Capture started");
        }
    }

    /// Save the current place with the given exporter through a save dialog
    pub fn export_current(&mut self, exporter: &dyn Exporter) {
        let logger = ReactiveEventLogger::with_colors(&self.logger_state, &self.log_colors);
        let Some(place) = self.current.as_ref() else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter(exporter.format_name(), &[exporter.extension()])
            .set_directory(self.settings.export_dir())
            .set_file_name(format!("{}.{}", place.poi_id, exporter.extension()))
            .save_file()
        else {
            return;
        };

        match exporter.export_one(place, &path) {
            Ok(saved) => {
                logger.log_custom(
                    LOG_TYPE_EXPORT,
                    &format!("{} saved to {}", exporter.format_name(), saved.display()),
                );
                self.settings.last_export_dir = saved.parent().map(Path::to_path_buf);
            }
            Err(e) => logger.log_error(&format!("{} export failed: {}", exporter.format_name(), e)),
        }
    }

    pub fn export_current_geojson(&mut self) {
        self.export_current(&GeoJsonExporter::new());
    }

    pub fn export_current_shapefile(&mut self) {
        self.export_current(&ShapefileExporter::new());
    }

    pub fn open_batch_dialog(&mut self) {
        let logger = ReactiveEventLogger::with_colors(&self.logger_state, &self.log_colors);
        if self.session.is_empty() {
            logger.log_warning("Nothing captured yet");
            return;
        }
        self.batch_dialog = Some(self.settings.batch_options(self.session.default_export_name()));
    }

    /// Run the batch export configured in the dialog
    pub fn run_batch_export(&mut self, options: BatchExportOptions) {
        let logger_state = self.logger_state.clone();
        let log_colors = self.log_colors.clone();
        let logger = ReactiveEventLogger::with_colors(&logger_state, &log_colors);

        match self.session.run_batch_export(&options) {
            Ok(summary) => {
                for (format, report) in &summary.reports {
                    logger.log_custom(
                        LOG_TYPE_EXPORT,
                        &format!("{} -> {} ({} written)", format, report.path.display(), report.written),
                    );
                }
                if !summary.skipped.is_empty() {
                    logger.log_warning(&format!(
                        "Skipped {} POI(s) without polygon: {}",
                        summary.skipped.len(),
                        summary.skipped.join(", ")
                    ));
                }
                self.settings.remember_batch(&options);
                self.save_settings();
            }
            Err(e) => logger.log_error(&format!("Batch export failed: {}", e)),
        }
    }

    pub fn select_captured(&mut self, poi_id: &str) {
        if let Some(place) = self.session.places().iter().find(|p| p.poi_id == poi_id) {
            self.current = Some(place.clone());
        }
    }

    pub fn remove_captured(&mut self, poi_id: &str) {
        if self.session.remove(poi_id).is_some() {
            let logger = ReactiveEventLogger::with_colors(&self.logger_state, &self.log_colors);
            logger.log_custom(LOG_TYPE_CAPTURE, &format!("Removed {} from capture list", poi_id));
        }
    }

    fn show_version_button(&mut self, ui: &mut egui::Ui) {
        if ui
            .button(egui::RichText::new(format!("PoiForge v{}", VERSION)).color(egui::Color32::from_rgb(180, 200, 255)))
            .clicked()
        {
            self.show_about_modal = true;
        }
    }
}

impl PoiForgeApp {
    pub fn save_settings(&self) {
        let Some(dir) = settings::config_dir() else {
            return;
        };
        if let Err(e) = self.settings.save_to_dir(&dir) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    fn dock_state_path() -> Option<PathBuf> {
        settings::config_dir().map(|dir| dir.join(DOCK_STATE_FILE))
    }

    fn save_dock_state(&self) {
        let Some(path) = Self::dock_state_path() else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(&self.dock_state) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    log::warn!("Failed to write dock state: {}", e);
                }
            }
            Err(e) => log::warn!("Failed to serialize dock state: {}", e),
        }
    }

    fn load_dock_state() -> Option<DockState<Tab>> {
        let json = fs::read_to_string(Self::dock_state_path()?).ok()?;
        match serde_json::from_str(&json) {
            Ok(state) => Some(state),
            Err(e) => {
                log::warn!("Ignoring saved dock layout: {}", e);
                None
            }
        }
    }
}

/// Implement the eframe::App trait for PoiForgeApp
///
/// The update loop handles keyboard shortcuts, the top ribbon, the dock area
/// and the modal windows.
impl eframe::App for PoiForgeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // F11 toggles fullscreen
        let (toggle_fullscreen, fullscreen) =
            ctx.input(|i| (i.key_pressed(egui::Key::F11), i.viewport().fullscreen.unwrap_or(false)));
        if toggle_fullscreen {
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
        }

        // Ribbon at the top
        egui::TopBottomPanel::top("capture_ribbon").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 10.0;

                let (label, color) = if self.session.is_active() {
                    ("⏹ Stop capture", egui::Color32::from_rgb(230, 120, 120))
                } else {
                    ("⏺ Start capture", egui::Color32::from_rgb(140, 220, 140))
                };
                if ui.button(egui::RichText::new(label).color(color)).clicked() {
                    self.toggle_capture();
                }

                ui.label(format!(
                    "Captured: {}   Pending: {}",
                    self.session.len(),
                    self.session.pending_count()
                ));

                if ui.button("📂 Import responses...").clicked() {
                    self.open_payload_files(None);
                }

                if ui
                    .add_enabled(!self.session.is_empty(), egui::Button::new("💾 Batch export..."))
                    .clicked()
                {
                    self.open_batch_dialog();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.show_version_button(ui);
                });
            });
        });

        // Main dock area below the ribbon
        let mut dock_state = self.dock_state.clone();
        let mut tab_viewer = TabViewer { app: self };
        let mut style = Style::from_egui(ctx.style().as_ref());
        style.dock_area_padding = None;
        style.tab_bar.fill_tab_bar = true;

        DockArea::new(&mut dock_state)
            .style(style)
            .show_add_buttons(false)
            .show_close_buttons(false)
            .show(ctx, &mut tab_viewer);

        self.dock_state = dock_state;

        ui::show_batch_export_dialog(ctx, self);

        if self.show_about_modal {
            egui::Window::new("About PoiForge")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui::AboutPanel::render(ui);
                    ui.add_space(20.0);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            self.show_about_modal = false;
                        }
                    });
                });
        }
    }
}

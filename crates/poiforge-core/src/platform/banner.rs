use crate::platform::parameters::gui;

#[derive(Default, Debug)]
pub struct Banner {
    pub message: String,
}

impl Banner {
    pub fn new() -> Banner {
        Banner {
            message: String::new(),
        }
    }

    pub fn format(&mut self) {
        self.message = format!("\n**** Welcome to {}, Version {}", gui::APPLICATION_NAME, gui::VERSION);
        self.message += &format!("\n**** Today is {}", chrono::Local::now().format("%m-%d-%Y %H:%M:%S"));

        self.message += "\n\nOUTPUT FORMATS";
        self.message += "\nGeoJSON          : RFC 7946 FeatureCollection";
        self.message += "\nShapefile        : .shp/.shx/.dbf/.prj (WGS 84)";
        self.message += "\nCoordinates      : GCJ-02 -> WGS 84\n";
    }
}

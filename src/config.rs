use crate::locale::Locale;
use std::time::Duration;

pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#;
pub const STORAGE_KEY: &str = "workouts";

/// Controller settings. `Default` matches the stock web build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tile_url: String,
    pub attribution: String,
    /// Zoom used when the map first centers on the user.
    pub initial_zoom: u8,
    /// Zoom used when panning to a workout.
    pub focus_zoom: u8,
    pub pan_duration: Duration,
    pub storage_key: String,
    pub locale: Locale,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_url: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
            initial_zoom: 13,
            focus_zoom: 16,
            pan_duration: Duration::from_secs(1),
            storage_key: STORAGE_KEY.to_string(),
            locale: Locale::default(),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

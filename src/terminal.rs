//! Collaborators for running the controller from a terminal.

use crate::error::GeolocationError;
use crate::ports::{Geolocation, MapWidget, View};
use crate::render::{Popup, SidebarRow};
use crate::types::{Coords, WorkoutId, WorkoutKind};
use std::time::Duration;

/// Keeps the sidebar in memory and reports alerts on stderr.
#[derive(Debug, Default)]
pub struct TerminalView {
    rows: Vec<SidebarRow>,
    alerts: Vec<String>,
    form_open: bool,
    extra_field: Option<WorkoutKind>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> &[SidebarRow] {
        &self.rows
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub const fn form_open(&self) -> bool {
        self.form_open
    }

    pub const fn extra_field(&self) -> Option<WorkoutKind> {
        self.extra_field
    }

    pub fn print_rows(&self) {
        for row in &self.rows {
            println!("{}", row.to_line());
        }
    }
}

impl View for TerminalView {
    fn show_form(&mut self) {
        self.form_open = true;
    }

    fn hide_form(&mut self) {
        self.form_open = false;
    }

    fn show_extra_field(&mut self, kind: WorkoutKind) {
        self.extra_field = Some(kind);
    }

    fn insert_row(&mut self, row: &SidebarRow) {
        self.rows.insert(0, row.clone());
    }

    fn remove_row(&mut self, id: &WorkoutId) {
        self.rows.retain(|r| &r.id != id);
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
        self.alerts.push(message.to_string());
    }
}

/// A map with nothing to draw on: tracks markers and camera, logs the rest.
#[derive(Debug, Default)]
pub struct HeadlessMap {
    next_marker: u64,
    live_markers: Vec<u64>,
    center: Option<(Coords, u8)>,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn center(&self) -> Option<(Coords, u8)> {
        self.center
    }

    pub fn marker_count(&self) -> usize {
        self.live_markers.len()
    }
}

impl MapWidget for HeadlessMap {
    type Marker = u64;

    fn set_view(&mut self, center: Coords, zoom: u8) {
        self.center = Some((center, zoom));
    }

    fn add_tile_layer(&mut self, url_template: &str, _attribution: &str) {
        tracing::trace!(url_template, "tile layer");
    }

    fn add_marker(&mut self, at: Coords, popup: &Popup) -> u64 {
        let id = self.next_marker;
        self.next_marker += 1;
        self.live_markers.push(id);
        tracing::debug!(marker = id, %at, popup = %popup.content, "marker added");
        id
    }

    fn remove_marker(&mut self, marker: u64) {
        self.live_markers.retain(|m| *m != marker);
        tracing::debug!(marker, "marker removed");
    }

    fn fly_to(&mut self, center: Coords, zoom: u8, pan: Duration) {
        self.center = Some((center, zoom));
        println!("map centered on {center} at zoom {zoom} ({:.1}s pan)", pan.as_secs_f64());
    }
}

/// Position source backed by a configured coordinate, if any.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Option<Coords>);

impl Geolocation for FixedPosition {
    fn current_position(&mut self) -> Result<Coords, GeolocationError> {
        self.0.ok_or(GeolocationError::Unavailable)
    }
}

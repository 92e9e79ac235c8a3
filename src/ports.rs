//! External collaborators the controller drives.
//!
//! The controller never renders, stores or locates anything itself; hosts
//! plug a map widget, a presentation surface, a key-value store, a position
//! source and a clock in through these traits.

use crate::error::{GeolocationError, StorageError};
use crate::render::{Popup, SidebarRow};
use crate::types::{Coords, WorkoutId, WorkoutKind};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Slippy map widget.
pub trait MapWidget {
    /// Opaque marker handle owned by the widget.
    type Marker;

    fn set_view(&mut self, center: Coords, zoom: u8);
    fn add_tile_layer(&mut self, url_template: &str, attribution: &str);
    /// Adds a marker with a bound popup and opens the popup.
    fn add_marker(&mut self, at: Coords, popup: &Popup) -> Self::Marker;
    fn remove_marker(&mut self, marker: Self::Marker);
    /// Animated pan to `center` at `zoom`.
    fn fly_to(&mut self, center: Coords, zoom: u8, pan: Duration);
}

/// Sidebar list, workout form and blocking alerts.
pub trait View {
    /// Reveals the form and focuses the distance field.
    fn show_form(&mut self);
    /// Clears every form field and hides the form.
    fn hide_form(&mut self);
    /// Shows the cadence row for running, the climb row for cycling.
    fn show_extra_field(&mut self, kind: WorkoutKind);
    /// Inserts a row right after the form, so newer rows sit on top.
    fn insert_row(&mut self, row: &SidebarRow);
    fn remove_row(&mut self, id: &WorkoutId);
    fn alert(&mut self, message: &str);
}

/// String key-value store.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One-shot current position lookup.
pub trait Geolocation {
    fn current_position(&mut self) -> Result<Coords, GeolocationError>;
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

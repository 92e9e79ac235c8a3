//! Application controller.
//!
//! Owns the workout list, the marker table and the pending map click, and
//! turns host events (map clicks, form submits, sidebar clicks, position
//! fixes) into model changes, render calls and store writes. Handlers run
//! to completion one at a time; nothing here is shared across threads.

use crate::config::Settings;
use crate::dlog;
use crate::error::{GeolocationError, SubmitError};
use crate::form::FormInput;
use crate::ports::{Clock, Geolocation, MapWidget, Storage, SystemClock, View};
use crate::render::{Popup, SidebarRow};
use crate::storage::{decode_workouts, encode_workouts};
use crate::types::{Coords, Workout, WorkoutId, WorkoutKind};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Hidden,
    AwaitingInput,
}

/// Part of a sidebar row that received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    DeleteButton,
    Body,
}

pub struct App<M: MapWidget, S, V, C = SystemClock> {
    settings: Settings,
    storage: S,
    view: V,
    clock: C,
    map: Option<M>,
    workouts: Vec<Workout>,
    markers: HashMap<WorkoutId, M::Marker>,
    pending: Option<Coords>,
    form: FormState,
}

impl<M, S, V> App<M, S, V, SystemClock>
where
    M: MapWidget,
    S: Storage,
    V: View,
{
    pub fn new(settings: Settings, storage: S, view: V) -> Self {
        Self::with_clock(settings, storage, view, SystemClock)
    }
}

impl<M, S, V, C> App<M, S, V, C>
where
    M: MapWidget,
    S: Storage,
    V: View,
    C: Clock,
{
    pub fn with_clock(settings: Settings, storage: S, view: V, clock: C) -> Self {
        Self {
            settings,
            storage,
            view,
            clock,
            map: None,
            workouts: Vec::new(),
            markers: HashMap::new(),
            pending: None,
            form: FormState::Hidden,
        }
    }

    /// Loads stored workouts and lists them in the sidebar.
    ///
    /// Markers wait for the map unless it is already up. A missing or
    /// unreadable store counts as empty. Returns the number of workouts loaded.
    pub fn load(&mut self) -> usize {
        let key = self.settings.storage_key.as_str();
        let blob = match self.storage.get(key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                dlog!("no stored workouts key={key}");
                return 0;
            }
            Err(e) => {
                tracing::warn!(key, err = %e, "reading stored workouts failed; starting empty");
                return 0;
            }
        };

        self.workouts = decode_workouts(&blob, self.settings.locale);
        tracing::info!(count = self.workouts.len(), "loaded stored workouts");

        for w in &self.workouts {
            self.view
                .insert_row(&SidebarRow::for_workout(w, self.settings.locale));
        }
        self.render_missing_markers();
        self.workouts.len()
    }

    /// Asks for the current position and brings the map up around it.
    ///
    /// On failure the user is alerted and the app keeps working without a map.
    pub fn acquire_map<G: Geolocation>(
        &mut self,
        geo: &mut G,
        map: M,
    ) -> Result<(), GeolocationError> {
        match geo.current_position() {
            Ok(center) => {
                self.load_map(map, center);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(err = %e, "no position; map unavailable");
                self.view.alert(self.settings.locale.no_position_alert());
                Err(e)
            }
        }
    }

    /// Position fix delivered: center the map, add tiles, draw every marker.
    ///
    /// A replaced map takes its markers with it, so all of them are redrawn
    /// on the new one.
    pub fn load_map(&mut self, mut map: M, center: Coords) {
        map.set_view(center, self.settings.initial_zoom);
        map.add_tile_layer(&self.settings.tile_url, &self.settings.attribution);
        tracing::info!(%center, zoom = self.settings.initial_zoom, "map loaded");
        if self.map.replace(map).is_some() {
            dlog!("map replaced; dropping {} stale markers", self.markers.len());
            self.markers.clear();
        }
        self.render_missing_markers();
    }

    /// Map click: remember where, open the form. A second click before
    /// submitting just moves the pending location.
    pub fn map_clicked(&mut self, at: Coords) {
        if self.map.is_none() {
            dlog!("map click before map load ignored at={at}");
            return;
        }
        self.pending = Some(at);
        self.form = FormState::AwaitingInput;
        self.view.show_form();
    }

    pub fn kind_changed(&mut self, kind: WorkoutKind) {
        self.view.show_extra_field(kind);
    }

    /// Form submit. Invalid input alerts the user and changes nothing.
    pub fn submit(&mut self, input: &FormInput) -> Result<WorkoutId, SubmitError> {
        let Some(at) = self.pending else {
            tracing::warn!("form submitted without a picked location");
            return Err(SubmitError::NoLocation);
        };

        let valid = match input.validate() {
            Ok(v) => v,
            Err(e) => {
                dlog!("rejected form input: {e}");
                self.view.alert(self.settings.locale.invalid_input_alert());
                return Err(e.into());
            }
        };

        let now = self.clock.now();
        let id = self.next_id(now.timestamp_millis());
        let workout = Workout::new(
            id.clone(),
            now,
            at,
            valid.distance,
            valid.duration,
            valid.extra,
            self.settings.locale,
        );
        tracing::info!(id = %id, kind = %workout.kind(), at = %at, "workout added");

        self.render_marker(&workout);
        self.view
            .insert_row(&SidebarRow::for_workout(&workout, self.settings.locale));
        self.workouts.push(workout);

        self.pending = None;
        self.form = FormState::Hidden;
        self.view.hide_form();

        self.persist();
        Ok(id)
    }

    /// Removes a workout, its marker and its row. An unknown id still
    /// removes the row but leaves the list and the store untouched.
    pub fn delete(&mut self, id: &WorkoutId) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.id() != id);
        let removed = self.workouts.len() != before;

        if let Some(marker) = self.markers.remove(id)
            && let Some(map) = self.map.as_mut()
        {
            map.remove_marker(marker);
        }

        if removed {
            tracing::info!(id = %id, "workout deleted");
            self.persist();
        } else {
            dlog!("delete of unknown workout id={id}");
        }

        self.view.remove_row(id);
        removed
    }

    /// Pans the map to a workout. Unknown ids and a missing map are no-ops.
    pub fn pan_to(&mut self, id: &WorkoutId) -> bool {
        let Some(w) = self.workout(id) else {
            dlog!("pan to unknown workout id={id}");
            return false;
        };
        let at = w.coords();
        let Some(map) = self.map.as_mut() else {
            dlog!("pan before map load id={id}");
            return false;
        };
        map.fly_to(at, self.settings.focus_zoom, self.settings.pan_duration);
        true
    }

    /// Sidebar click routing: the delete button deletes, anything else pans.
    pub fn row_clicked(&mut self, id: &WorkoutId, target: RowTarget) -> bool {
        match target {
            RowTarget::DeleteButton => self.delete(id),
            RowTarget::Body => self.pan_to(id),
        }
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn workout(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn has_marker(&self, id: &WorkoutId) -> bool {
        self.markers.contains_key(id)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub const fn form_state(&self) -> FormState {
        self.form
    }

    pub const fn pending_location(&self) -> Option<Coords> {
        self.pending
    }

    pub const fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Ids come from the creation time; on a clash the time is nudged
    /// forward a millisecond at a time.
    fn next_id(&self, mut ms: i64) -> WorkoutId {
        loop {
            let id = WorkoutId::from_millis(ms);
            if self.workout(&id).is_none() {
                return id;
            }
            ms = ms.saturating_add(1);
        }
    }

    fn render_marker(&mut self, w: &Workout) {
        let Some(map) = self.map.as_mut() else {
            return;
        };
        let marker = map.add_marker(w.coords(), &Popup::for_workout(w));
        if let Some(old) = self.markers.insert(w.id().clone(), marker) {
            map.remove_marker(old);
        }
    }

    fn render_missing_markers(&mut self) {
        let Some(map) = self.map.as_mut() else {
            return;
        };
        for w in &self.workouts {
            if !self.markers.contains_key(w.id()) {
                let marker = map.add_marker(w.coords(), &Popup::for_workout(w));
                self.markers.insert(w.id().clone(), marker);
            }
        }
    }

    fn persist(&mut self) {
        let blob = match encode_workouts(&self.workouts) {
            Ok(b) => b,
            Err(e) => {
                tracing::error!(err = %e, "encoding workouts failed; not saved");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.settings.storage_key, &blob) {
            tracing::error!(err = %e, "saving workouts failed");
        } else {
            dlog!("saved workouts count={}", self.workouts.len());
        }
    }
}

use crate::locale::Locale;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Latitude/longitude pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(c: Coords) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lng)
    }
}

impl FromStr for Coords {
    type Err = String;

    /// Parses `"LAT,LNG"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LAT,LNG, got {s:?}"))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|e| format!("bad longitude {lng:?}: {e}"))?;
        if !lat.is_finite() || !lng.is_finite() {
            return Err(format!("coordinates must be finite: {s:?}"));
        }
        Ok(Self { lat, lng })
    }
}

/// Workout identifier: the trailing ten digits of the creation time in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn from_millis(ms: i64) -> Self {
        let s = ms.to_string();
        let start = s.len().saturating_sub(10);
        Self(s[start..].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkoutId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for WorkoutId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Running => "🏃‍♂️",
            Self::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(Self::Running),
            "cycling" => Ok(Self::Cycling),
            other => Err(other.to_string()),
        }
    }
}

/// The user-supplied, kind-specific value of a new workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extra {
    /// Cadence, steps/min.
    Cadence(f64),
    /// Elevation gain, meters. May be zero or negative.
    Climb(f64),
}

/// Kind-specific fields, tagged by `type` in the stored form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Metrics {
    Running {
        temp: f64,
        #[serde(default)]
        pace: f64,
    },
    Cycling {
        climb: f64,
        #[serde(default)]
        speed: f64,
    },
}

impl Metrics {
    fn compute(extra: Extra, distance: f64, duration: f64) -> Self {
        match extra {
            Extra::Cadence(temp) => Self::Running {
                temp,
                pace: pace(distance, duration),
            },
            Extra::Climb(climb) => Self::Cycling {
                climb,
                speed: speed(distance, duration),
            },
        }
    }

    pub const fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running { .. } => WorkoutKind::Running,
            Self::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub const fn extra(&self) -> Extra {
        match *self {
            Self::Running { temp, .. } => Extra::Cadence(temp),
            Self::Cycling { climb, .. } => Extra::Climb(climb),
        }
    }
}

/// Minutes per kilometer. Not guarded: a zero distance yields inf or NaN.
pub fn pace(distance: f64, duration: f64) -> f64 {
    duration / distance
}

/// `distance / duration / 60`, kept exactly as recorded by earlier releases.
pub fn speed(distance: f64, duration: f64) -> f64 {
    distance / duration / 60.0
}

/// A recorded workout. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    id: WorkoutId,
    date: DateTime<Utc>,
    #[serde(default)]
    clicks: u32,
    coords: Coords,
    /// km
    distance: f64,
    /// min
    duration: f64,
    #[serde(default)]
    description: String,
    #[serde(flatten)]
    metrics: Metrics,
}

impl Workout {
    pub fn new(
        id: WorkoutId,
        date: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        extra: Extra,
        locale: Locale,
    ) -> Self {
        let metrics = Metrics::compute(extra, distance, duration);
        Self {
            id,
            date,
            clicks: 0,
            coords,
            distance,
            duration,
            description: locale.describe(metrics.kind(), date),
            metrics,
        }
    }

    /// Rebuilds derived fields of a record read back from storage.
    ///
    /// Metrics are recomputed from distance and duration; the stored
    /// description is kept unless it is missing.
    #[must_use]
    pub fn restored(mut self, locale: Locale) -> Self {
        self.metrics = Metrics::compute(self.metrics.extra(), self.distance, self.duration);
        if self.description.is_empty() {
            self.description = locale.describe(self.kind(), self.date);
        }
        self
    }

    pub const fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub const fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub const fn clicks(&self) -> u32 {
        self.clicks
    }

    pub const fn coords(&self) -> Coords {
        self.coords
    }

    pub const fn distance(&self) -> f64 {
        self.distance
    }

    pub const fn duration(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub const fn kind(&self) -> WorkoutKind {
        self.metrics.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn running_pace_is_duration_over_distance() {
        let w = Workout::new(
            "1".into(),
            at(),
            Coords::new(50.45, 30.52),
            5.0,
            25.0,
            Extra::Cadence(170.0),
            Locale::Uk,
        );
        assert_eq!(w.kind(), WorkoutKind::Running);
        match *w.metrics() {
            Metrics::Running { temp, pace } => {
                assert!((pace - 5.0).abs() < 1e-12);
                assert!((temp - 170.0).abs() < f64::EPSILON);
            }
            Metrics::Cycling { .. } => panic!("expected running"),
        }
        assert!(w.description().starts_with("Пробіжка"));
    }

    #[test]
    fn cycling_speed_uses_literal_formula() {
        let w = Workout::new(
            "2".into(),
            at(),
            Coords::new(0.0, 0.0),
            20.0,
            60.0,
            Extra::Climb(300.0),
            Locale::En,
        );
        let Metrics::Cycling { speed, climb } = *w.metrics() else {
            panic!("expected cycling");
        };
        assert!((speed - 20.0 / 60.0 / 60.0).abs() < 1e-15);
        assert!((speed - 0.005_555_555).abs() < 1e-6);
        assert!((climb - 300.0).abs() < f64::EPSILON);
        assert!(w.description().starts_with("Cycling"));
    }

    #[test]
    fn zero_distance_pace_is_not_finite() {
        assert!(pace(0.0, 10.0).is_infinite());
        assert!(pace(0.0, 0.0).is_nan());
    }

    #[test]
    fn id_keeps_last_ten_digits() {
        assert_eq!(WorkoutId::from_millis(1_714_564_800_123).as_str(), "4564800123");
        assert_eq!(WorkoutId::from_millis(42).as_str(), "42");
    }

    #[test]
    fn stored_form_is_flat_and_tagged() {
        let w = Workout::new(
            "1714564800".into(),
            at(),
            Coords::new(1.5, 2.5),
            10.0,
            50.0,
            Extra::Cadence(160.0),
            Locale::En,
        );
        let v = serde_json::to_value(&w).unwrap();
        assert_eq!(v["type"], "running");
        assert_eq!(v["coords"], serde_json::json!([1.5, 2.5]));
        assert_eq!(v["temp"], 160.0);
        assert_eq!(v["pace"], 5.0);
        assert_eq!(v["clicks"], 0);
        assert_eq!(v["id"], "1714564800");
    }

    #[test]
    fn restored_recomputes_metrics_and_fills_description() {
        let raw = serde_json::json!({
            "id": "77",
            "date": "2024-05-01T12:00:00Z",
            "coords": [1.0, 2.0],
            "distance": 30.0,
            "duration": 90.0,
            "type": "cycling",
            "climb": -40.0
        });
        let w: Workout = serde_json::from_value(raw).unwrap();
        let w = w.restored(Locale::En);
        let Metrics::Cycling { speed, climb } = *w.metrics() else {
            panic!("expected cycling");
        };
        assert!((speed - 30.0 / 90.0 / 60.0).abs() < 1e-15);
        assert!((climb + 40.0).abs() < f64::EPSILON);
        assert!(w.description().starts_with("Cycling "));
    }

    #[test]
    fn coords_parse_from_cli_text() {
        let c: Coords = "50.45, 30.52".parse().unwrap();
        assert_eq!(c, Coords::new(50.45, 30.52));
        assert!("50.45".parse::<Coords>().is_err());
        assert!("nan,1".parse::<Coords>().is_err());
    }
}

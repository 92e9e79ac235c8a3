use crate::error::InputError;
use crate::types::{Extra, WorkoutKind};

/// Raw values of the workout form as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub temp: String,
    pub climb: String,
}

/// A form that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidForm {
    pub distance: f64,
    pub duration: f64,
    pub extra: Extra,
}

/// Numeric coercion of a text field: blank is zero, garbage is NaN.
pub fn coerce(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    s.parse().unwrap_or(f64::NAN)
}

fn finite(field: &'static str, v: f64) -> Result<f64, InputError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(InputError::NotFinite { field })
    }
}

fn positive(field: &'static str, v: f64) -> Result<f64, InputError> {
    if v > 0.0 {
        Ok(v)
    } else {
        Err(InputError::NotPositive { field })
    }
}

impl FormInput {
    /// Checks the fields relevant to the selected kind.
    ///
    /// Running needs distance, duration and cadence all finite and positive.
    /// Cycling needs them finite, but only distance and duration positive:
    /// climb may be zero or negative.
    pub fn validate(&self) -> Result<ValidForm, InputError> {
        let kind: WorkoutKind = self
            .kind
            .trim()
            .parse()
            .map_err(InputError::UnknownKind)?;

        let distance = finite("distance", coerce(&self.distance))?;
        let duration = finite("duration", coerce(&self.duration))?;

        let extra = match kind {
            WorkoutKind::Running => {
                let temp = finite("cadence", coerce(&self.temp))?;
                positive("distance", distance)?;
                positive("duration", duration)?;
                Extra::Cadence(positive("cadence", temp)?)
            }
            WorkoutKind::Cycling => {
                let climb = finite("climb", coerce(&self.climb))?;
                positive("distance", distance)?;
                positive("duration", duration)?;
                Extra::Climb(climb)
            }
        };

        Ok(ValidForm {
            distance,
            duration,
            extra,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(distance: &str, duration: &str, temp: &str) -> FormInput {
        FormInput {
            kind: "running".into(),
            distance: distance.into(),
            duration: duration.into(),
            temp: temp.into(),
            ..FormInput::default()
        }
    }

    fn cycling(distance: &str, duration: &str, climb: &str) -> FormInput {
        FormInput {
            kind: "cycling".into(),
            distance: distance.into(),
            duration: duration.into(),
            climb: climb.into(),
            ..FormInput::default()
        }
    }

    #[test]
    fn coerce_follows_form_semantics() {
        assert!((coerce(" 5 ") - 5.0).abs() < f64::EPSILON);
        assert!(coerce("").abs() < f64::EPSILON);
        assert!(coerce("abc").is_nan());
        assert!(coerce("1e2").is_finite());
    }

    #[test]
    fn running_accepts_positive_values() {
        let v = running("5", "25", "170").validate().unwrap();
        assert!((v.distance - 5.0).abs() < f64::EPSILON);
        assert_eq!(v.extra, Extra::Cadence(170.0));
    }

    #[test]
    fn running_rejects_non_positive_cadence() {
        assert_eq!(
            running("5", "25", "0").validate(),
            Err(InputError::NotPositive { field: "cadence" })
        );
    }

    #[test]
    fn blank_distance_is_not_positive() {
        assert_eq!(
            running("", "25", "170").validate(),
            Err(InputError::NotPositive { field: "distance" })
        );
    }

    #[test]
    fn non_numeric_and_infinite_values_are_rejected() {
        assert_eq!(
            running("five", "25", "170").validate(),
            Err(InputError::NotFinite { field: "distance" })
        );
        assert_eq!(
            cycling("10", "inf", "3").validate(),
            Err(InputError::NotFinite { field: "duration" })
        );
        assert_eq!(
            cycling("10", "30", "up").validate(),
            Err(InputError::NotFinite { field: "climb" })
        );
    }

    #[test]
    fn cycling_allows_negative_or_zero_climb() {
        let v = cycling("20", "60", "-120").validate().unwrap();
        assert_eq!(v.extra, Extra::Climb(-120.0));
        assert!(cycling("20", "60", "").validate().is_ok());
    }

    #[test]
    fn cycling_still_requires_positive_duration() {
        assert_eq!(
            cycling("20", "-1", "10").validate(),
            Err(InputError::NotPositive { field: "duration" })
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let mut f = running("1", "1", "1");
        f.kind = "swimming".into();
        assert_eq!(
            f.validate(),
            Err(InputError::UnknownKind("swimming".into()))
        );
    }
}

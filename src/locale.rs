use crate::types::WorkoutKind;
use chrono::{DateTime, Local, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Language used for workout descriptions, units and alerts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Uk,
    En,
}

impl Locale {
    pub const fn kind_label(self, kind: WorkoutKind) -> &'static str {
        match (self, kind) {
            (Self::Uk, WorkoutKind::Running) => "Пробіжка",
            (Self::Uk, WorkoutKind::Cycling) => "Велотренування",
            (Self::En, WorkoutKind::Running) => "Running",
            (Self::En, WorkoutKind::Cycling) => "Cycling",
        }
    }

    /// Short numeric date in the locale's conventional order, rendered in local time.
    pub fn format_date(self, date: DateTime<Utc>) -> String {
        let local = date.with_timezone(&Local);
        match self {
            Self::Uk => local.format("%d.%m.%Y").to_string(),
            Self::En => local.format("%-m/%-d/%Y").to_string(),
        }
    }

    pub fn describe(self, kind: WorkoutKind, date: DateTime<Utc>) -> String {
        format!("{} {}", self.kind_label(kind), self.format_date(date))
    }

    pub const fn invalid_input_alert(self) -> &'static str {
        match self {
            Self::Uk => "ти шо вводиш?",
            Self::En => "Inputs have to be positive numbers!",
        }
    }

    pub const fn no_position_alert(self) -> &'static str {
        match self {
            Self::Uk => "Неможливо отримати місцезнаходження",
            Self::En => "Could not get your position",
        }
    }

    pub const fn units(self) -> Units {
        match self {
            Self::Uk => Units {
                km: "км",
                min: "хв",
                min_per_km: "хв/км",
                km_per_h: "км/год",
                steps_per_min: "крок/хв",
                m: "м",
            },
            Self::En => Units {
                km: "km",
                min: "min",
                min_per_km: "min/km",
                km_per_h: "km/h",
                steps_per_min: "spm",
                m: "m",
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Units {
    pub km: &'static str,
    pub min: &'static str,
    pub min_per_km: &'static str,
    pub km_per_h: &'static str,
    pub steps_per_min: &'static str,
    pub m: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn description_joins_label_and_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        let uk = Locale::Uk.describe(WorkoutKind::Running, date);
        assert!(uk.starts_with("Пробіжка "));
        assert!(uk.ends_with(".2024"));

        let en = Locale::En.describe(WorkoutKind::Cycling, date);
        assert!(en.starts_with("Cycling "));
        assert!(en.ends_with("/2024"));
    }

    #[test]
    fn uk_date_is_day_first() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        let s = Locale::Uk.format_date(date);
        assert_eq!(s.len(), "07.03.2024".len());
        assert_eq!(&s[2..3], ".");
        assert_eq!(&s[3..5], "03");
    }

    #[test]
    fn en_date_is_month_first_without_padding() {
        let date = Utc.with_ymd_and_hms(2024, 3, 17, 12, 0, 0).unwrap();
        let s = Locale::En.format_date(date);
        assert!(s.starts_with("3/"), "{s}");
        assert!(s.ends_with("/2024"), "{s}");
        assert!(!s.contains("/0"), "{s}");
    }
}

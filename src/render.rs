use crate::locale::Locale;
use crate::types::{Metrics, Workout, WorkoutId, WorkoutKind};
use std::fmt::Write as _;

/// Popup bound to a workout's marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub content: String,
    pub class_name: String,
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl Popup {
    pub fn for_workout(w: &Workout) -> Self {
        let kind = w.kind();
        Self {
            content: format!("{} {}", kind.emoji(), w.description()),
            class_name: format!("{kind}-popup"),
            max_width: 200,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

/// One sidebar entry, keyed by workout id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarRow {
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub title: String,
    pub details: Vec<Detail>,
}

impl SidebarRow {
    pub fn for_workout(w: &Workout, locale: Locale) -> Self {
        let u = locale.units();
        let mut details = vec![
            Detail {
                icon: w.kind().emoji(),
                value: w.distance().to_string(),
                unit: u.km,
            },
            Detail {
                icon: "⏱",
                value: w.duration().to_string(),
                unit: u.min,
            },
        ];

        match *w.metrics() {
            Metrics::Running { temp, pace } => {
                details.push(Detail {
                    icon: "⏱",
                    value: format!("{pace:.2}"),
                    unit: u.min_per_km,
                });
                details.push(Detail {
                    icon: "👟",
                    value: temp.to_string(),
                    unit: u.steps_per_min,
                });
            }
            Metrics::Cycling { climb, speed } => {
                details.push(Detail {
                    icon: "📏",
                    value: format!("{speed:.2}"),
                    unit: u.km_per_h,
                });
                details.push(Detail {
                    icon: "⛰️",
                    value: climb.to_string(),
                    unit: u.m,
                });
            }
        }

        Self {
            id: w.id().clone(),
            kind: w.kind(),
            title: w.description().to_string(),
            details,
        }
    }

    /// Sidebar list item markup.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let _ = writeln!(
            html,
            r#"<li class="workout workout--{}" data-id="{}">"#,
            self.kind,
            escape(self.id.as_str())
        );
        let _ = writeln!(
            html,
            r#"  <h2 class="workout__title">{}</h2>"#,
            escape(&self.title)
        );
        html.push_str("  <button class=\"workout__btn\">🗑️</button>\n");
        for d in &self.details {
            let _ = writeln!(
                html,
                r#"  <div class="workout__details"><span class="workout__icon">{}</span><span class="workout__value">{}</span><span class="workout__unit">{}</span></div>"#,
                d.icon,
                escape(&d.value),
                d.unit
            );
        }
        html.push_str("</li>\n");
        html
    }

    /// Single-line form for text surfaces.
    pub fn to_line(&self) -> String {
        let details = self
            .details
            .iter()
            .map(|d| format!("{} {} {}", d.icon, d.value, d.unit))
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\t{}\t{details}", self.id, self.title)
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coords, Extra};
    use chrono::{TimeZone, Utc};

    fn cycling(locale: Locale) -> Workout {
        Workout::new(
            "1234567890".into(),
            Utc.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).unwrap(),
            Coords::new(48.0, 24.0),
            20.0,
            60.0,
            Extra::Climb(300.0),
            locale,
        )
    }

    #[test]
    fn popup_carries_kind_class_and_icon() {
        let p = Popup::for_workout(&cycling(Locale::En));
        assert_eq!(p.class_name, "cycling-popup");
        assert!(p.content.starts_with("🚴‍♀️ Cycling "));
        assert!(!p.auto_close);
        assert!(!p.close_on_click);
        assert_eq!((p.min_width, p.max_width), (100, 200));
    }

    #[test]
    fn cycling_row_shows_speed_and_climb() {
        let row = SidebarRow::for_workout(&cycling(Locale::En), Locale::En);
        let values: Vec<_> = row.details.iter().map(|d| d.value.as_str()).collect();
        assert_eq!(values, ["20", "60", "0.01", "300"]);
        assert_eq!(row.details[2].unit, "km/h");
    }

    #[test]
    fn html_row_is_keyed_by_id() {
        let html = SidebarRow::for_workout(&cycling(Locale::Uk), Locale::Uk).to_html();
        assert!(html.starts_with(r#"<li class="workout workout--cycling" data-id="1234567890">"#));
        assert!(html.contains(r#"<button class="workout__btn">"#));
        assert!(html.contains("Велотренування"));
        assert!(html.contains("км/год"));
    }

    #[test]
    fn title_keeps_stored_language_while_units_follow_locale() {
        let row = SidebarRow::for_workout(&cycling(Locale::En), Locale::Uk);
        assert!(row.title.starts_with("Cycling "));
        assert_eq!(row.details[0].unit, "км");
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(escape(r#"<a href="x">&"#), "&lt;a href=&quot;x&quot;&gt;&amp;");
    }
}

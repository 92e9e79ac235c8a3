use crate::locale::Locale;
use crate::types::{Coords, WorkoutKind};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_STORE: &str = "pinfit-workouts.json";

#[derive(Parser, Debug)]
#[command(
    name = "pinfit",
    about = "Log runs and rides pinned to map locations"
)]
pub struct Cli {
    /// Store file holding the saved workouts.
    #[arg(long, env = "PINFIT_STORE", default_value = DEFAULT_STORE, global = true)]
    pub store: PathBuf,

    /// Language for descriptions, units and alerts.
    #[arg(long, value_enum, default_value_t = Locale::Uk, global = true)]
    pub locale: Locale,

    /// Current position used to center the map. Without it, geolocation is unavailable.
    #[arg(long, env = "PINFIT_POSITION", value_name = "LAT,LNG", global = true)]
    pub position: Option<Coords>,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Record a workout at a map location.
    Add {
        #[arg(value_enum)]
        kind: WorkoutKind,

        /// Where the workout happened (the map click).
        #[arg(long, value_name = "LAT,LNG")]
        at: Coords,

        /// Distance in km.
        #[arg(long)]
        distance: String,

        /// Duration in minutes.
        #[arg(long)]
        duration: String,

        /// Cadence in steps/min (running).
        #[arg(long, default_value = "")]
        cadence: String,

        /// Elevation gain in meters (cycling). May be negative.
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        climb: String,
    },
    /// Print saved workouts, newest first.
    List,
    /// Delete a workout by id.
    Delete { id: String },
    /// Center the map on a workout.
    Show { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_cycling_with_negative_climb() {
        let cli = Cli::try_parse_from([
            "pinfit", "--locale", "en", "add", "cycling", "--at", "50.4,30.5", "--distance",
            "20", "--duration", "60", "--climb", "-15",
        ])
        .unwrap();
        assert_eq!(cli.locale, Locale::En);
        match cli.cmd {
            Cmd::Add {
                kind, at, climb, ..
            } => {
                assert_eq!(kind, WorkoutKind::Cycling);
                assert_eq!(at, Coords::new(50.4, 30.5));
                assert_eq!(climb, "-15");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn verbosity_flags_count() {
        let cli = Cli::try_parse_from(["pinfit", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.cmd, Cmd::List));
    }
}

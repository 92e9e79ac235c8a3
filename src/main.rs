#![deny(warnings, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::Parser;
use pinfit::app::App;
use pinfit::cli::{self, Cmd};
use pinfit::config::Settings;
use pinfit::form::FormInput;
use pinfit::storage::FileStorage;
use pinfit::terminal::{FixedPosition, HeadlessMap, TerminalView};
use pinfit::types::WorkoutId;
use pinfit::utils;

#[macro_use]
extern crate pinfit;

type TerminalApp = App<HeadlessMap, FileStorage, TerminalView>;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let settings = Settings::default().with_locale(cli.locale);
    dlog!(
        "store={} locale={:?} position={:?}",
        cli.store.display(),
        cli.locale,
        cli.position
    );

    let mut app: TerminalApp = App::new(settings, FileStorage::new(&cli.store), TerminalView::new());
    app.load();

    match cli.cmd {
        Cmd::Add {
            kind,
            at,
            distance,
            duration,
            cadence,
            climb,
        } => {
            // Without a configured position the map opens on the workout itself.
            let mut geo = FixedPosition(cli.position.or(Some(at)));
            app.acquire_map(&mut geo, HeadlessMap::new())
                .context("opening the map for the new workout")?;

            app.map_clicked(at);
            app.kind_changed(kind);
            let input = FormInput {
                kind: kind.to_string(),
                distance,
                duration,
                temp: cadence,
                climb,
            };
            let id = app.submit(&input).context("workout not saved")?;
            if let Some(w) = app.workout(&id) {
                println!("{id}\t{}", w.description());
            }
        }
        Cmd::List => {
            if app.workouts().is_empty() {
                tracing::info!(store = %cli.store.display(), "no workouts saved yet");
            }
            app.view().print_rows();
        }
        Cmd::Delete { id } => {
            let id = WorkoutId::from(id);
            if !app.delete(&id) {
                tracing::warn!(id = %id, "no workout with that id");
            }
        }
        Cmd::Show { id } => {
            let mut geo = FixedPosition(cli.position);
            app.acquire_map(&mut geo, HeadlessMap::new())
                .context("showing a workout needs --position")?;
            let id = WorkoutId::from(id);
            if !app.pan_to(&id) {
                tracing::warn!(id = %id, "no workout with that id");
            }
        }
    }

    Ok(())
}

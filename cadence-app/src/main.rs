//! Cadence terminal interval timer
//!
//! Runs a workout from the catalog in the terminal. A tick task and a
//! stdin task feed one event queue; the controller task owns all workout
//! state and redraws the screen after every event.

mod channels;
mod controller;
mod display;
mod input;
mod tasks;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use cadence_catalog::{CatalogLoader, CatalogSource, Settings};
use cadence_core::config::{clamp_rest, ElapsedPolicy};
use clap::{ArgAction, Parser};
use tokio::sync::Notify;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::channels::event_channel;
use crate::controller::Controller;
use crate::display::TerminalObserver;
use crate::tasks::{controller_task, input_task, tick_task};

#[derive(Parser, Debug)]
#[command(name = "cadence", version, about = "Interval workout timer")]
struct Cli {
    /// Workout catalog (JSON)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Settings file (TOML); defaults to ./cadence.toml if present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rest between sets, superset exercises, and exercises (seconds)
    #[arg(long)]
    rest: Option<i64>,

    /// Workout to load, by catalog position
    #[arg(long, default_value_t = 1)]
    workout: usize,

    /// Keep the total elapsed clock running while waiting for reps
    #[arg(long)]
    include_rep_wait: bool,

    /// Do not ring the terminal bell
    #[arg(long)]
    quiet: bool,

    /// Log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Apply command-line overrides on top of file and environment settings
    fn apply(&self, settings: &mut Settings) {
        if let Some(catalog) = &self.catalog {
            settings.catalog = catalog.clone();
        }
        if let Some(rest) = self.rest {
            settings.rest_seconds = clamp_rest(Some(rest));
        }
        if self.include_rep_wait {
            settings.elapsed_policy = ElapsedPolicy::IncludeRepWait;
        }
        if self.quiet {
            settings.sound = false;
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(?cli, "starting");

    let mut settings =
        Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    cli.apply(&mut settings);

    let (catalog, source) = CatalogLoader::from_settings(&settings).load();
    if source == CatalogSource::Cache {
        warn!(
            path = %settings.catalog.display(),
            "catalog unavailable, using cached copy"
        );
    }

    let mut controller = Controller::new(catalog, settings.session_config());
    controller.set_sound(settings.sound);
    let index = cli.workout.saturating_sub(1);
    if !controller.catalog().is_empty() && !controller.select_workout(index) {
        warn!(workout = cli.workout, "falling back to the first workout");
        controller.select_workout(0);
    }

    let (events, queue) = event_channel();
    let tick_restart = Arc::new(Notify::new());
    tokio::spawn(tick_task(events.clone(), tick_restart.clone()));
    tokio::spawn(input_task(events));

    let observer = TerminalObserver::new(std::io::stdout());
    let mut screen = std::io::stdout();
    controller_task(controller, observer, &mut screen, queue, tick_restart)
        .await
        .context("terminal output failed")?;

    info!("bye");
    Ok(())
}

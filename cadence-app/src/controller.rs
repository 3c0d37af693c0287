//! Controller coordinating the catalog and the sequencer
//!
//! The controller:
//! - Owns the loaded catalog and the selected workout
//! - Turns user commands into sequencer commands
//! - Refuses routine and rest changes while a step is counting down
//! - Drops cues while sound is off

use cadence_catalog::{Catalog, Workout};
use cadence_core::config::{clamp_rest, SessionConfig};
use cadence_core::sequencer::{Sequencer, Snapshot, WindowRow};
use cadence_core::traits::{Notification, Notifications};
use tracing::{debug, info, warn};

use crate::input::InputCommand;

/// Application controller
pub struct Controller {
    sequencer: Sequencer,
    catalog: Catalog,
    /// Currently selected workout index
    selected: Option<usize>,
    /// Whether cues reach the observer
    sound: bool,
}

impl Controller {
    /// Create a controller with nothing selected
    pub fn new(catalog: Catalog, config: SessionConfig) -> Self {
        Self {
            sequencer: Sequencer::new(config),
            catalog,
            selected: None,
            sound: true,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Get selected workout index
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Get selected workout
    pub fn workout(&self) -> Option<&Workout> {
        self.selected.and_then(|i| self.catalog.get(i))
    }

    /// Whether cues are audible
    pub fn sound(&self) -> bool {
        self.sound
    }

    pub fn set_sound(&mut self, on: bool) {
        self.sound = on;
    }

    /// Whether the step countdown is running
    pub fn is_running(&self) -> bool {
        self.sequencer.state().clock_running()
    }

    /// Current rest duration (seconds)
    pub fn rest_s(&self) -> u32 {
        self.sequencer.config().rest_s
    }

    pub fn snapshot(&self) -> Snapshot {
        self.sequencer.snapshot()
    }

    pub fn visible_window(&self) -> Vec<WindowRow<'_>> {
        self.sequencer.visible_window()
    }

    /// Process a user command
    ///
    /// Quit and List are handled by the caller.
    pub fn process_input(&mut self, input: InputCommand) -> Notifications {
        let out = match input {
            InputCommand::Toggle => self.sequencer.toggle(),
            InputCommand::Pause => self.sequencer.pause(),
            InputCommand::Resume => self.sequencer.resume(),
            InputCommand::ConfirmReps => self.sequencer.confirm_reps(),
            InputCommand::Reset => self.sequencer.reset(),
            InputCommand::SelectWorkout(index) => {
                self.select_workout(index);
                Notifications::new()
            }
            InputCommand::SetRest(secs) => {
                self.set_rest(secs);
                Notifications::new()
            }
            InputCommand::ToggleSound => {
                self.sound = !self.sound;
                info!(sound = self.sound, "sound toggled");
                Notifications::new()
            }
            InputCommand::List | InputCommand::Quit => Notifications::new(),
        };
        self.audible(out)
    }

    /// Advance the clock by one second
    pub fn tick(&mut self) -> Notifications {
        let out = self.sequencer.tick();
        self.audible(out)
    }

    fn audible(&self, mut out: Notifications) -> Notifications {
        if !self.sound {
            out.retain(|n| !matches!(n, Notification::Cue(_)));
        }
        out
    }

    /// Select and load a workout
    pub fn select_workout(&mut self, index: usize) -> bool {
        if !self.sequencer.state().accepts_plan_change() {
            debug!(index, "workout change ignored while running");
            return false;
        }

        let Some(workout) = self.catalog.get(index) else {
            warn!(index = index + 1, "no such workout");
            return false;
        };

        let rest_s = self.rest_s();
        if !self.sequencer.load_plan(&workout.exercises, rest_s) {
            return false;
        }

        info!(
            workout = %workout.name,
            steps = self.sequencer.steps().len(),
            total_s = self.sequencer.plan_total_s(),
            "workout loaded"
        );
        self.selected = Some(index);
        true
    }

    /// Change the rest duration and rebuild the selected workout
    pub fn set_rest(&mut self, raw: i64) -> bool {
        if !self.sequencer.state().accepts_plan_change() {
            debug!(raw, "rest change ignored while running");
            return false;
        }

        let rest_s = clamp_rest(Some(raw));
        let config = SessionConfig {
            rest_s,
            ..*self.sequencer.config()
        };
        if !self.sequencer.set_config(config) {
            return false;
        }
        info!(rest_s, "rest duration changed");

        match self.selected {
            Some(index) => self.select_workout(index),
            None => true,
        }
    }
}

//! Workout sequencing engine
//!
//! Owns the expanded step list, the cursor, the per-step countdown, and the
//! whole-workout elapsed clock. Both clocks advance from the same `tick`, so
//! they never drift apart.
//!
//! Commands are total over every state: a command that does not apply is a
//! no-op and returns no notifications.

use alloc::vec::Vec;

use super::snapshot::{Controls, PrimaryAction, Progress, Snapshot, StepView};
use super::window::{visible_window, WindowRow};
use crate::config::{SessionConfig, URGENT_WINDOW_S};
use crate::plan::{expand, total_duration, ExerciseSpec, Step};
use crate::state::{Event, RunState};
use crate::traits::{Cue, Notification, Notifications};

/// Step sequencer
///
/// Tracks progress through a loaded plan and reports what changed.
#[derive(Debug, Clone)]
pub struct Sequencer {
    /// Current run state
    state: RunState,
    /// Expanded plan (replaced wholesale on load)
    steps: Vec<Step>,
    /// Index of the current step; `steps.len()` once finished
    cursor: usize,
    /// Seconds left on the current step
    remaining_s: u32,
    /// Whole-workout elapsed seconds
    elapsed_total_s: u32,
    /// Set by the first start after a load or reset
    clock_started: bool,
    /// Session configuration
    config: SessionConfig,
}

impl Sequencer {
    /// Create an empty sequencer
    pub fn new(config: SessionConfig) -> Self {
        Self {
            state: RunState::Idle,
            steps: Vec::new(),
            cursor: 0,
            remaining_s: 0,
            elapsed_total_s: 0,
            clock_started: false,
            config,
        }
    }

    /// Get session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Replace session configuration
    ///
    /// Rejected while running. A new rest duration only takes effect on the
    /// next [`Sequencer::load_plan`].
    pub fn set_config(&mut self, config: SessionConfig) -> bool {
        if !self.state.accepts_plan_change() {
            return false;
        }
        self.config = config;
        true
    }

    /// Expand and load a plan
    ///
    /// Rejected while running. Returns whether the plan was loaded.
    pub fn load_plan(&mut self, specs: &[ExerciseSpec], rest_s: u32) -> bool {
        if !self.state.accepts_plan_change() {
            return false;
        }
        self.config.rest_s = rest_s;
        self.load_steps(expand(specs, rest_s))
    }

    /// Load an already expanded step list
    ///
    /// Rejected while running. An empty list leaves the sequencer idle with
    /// no workout.
    pub fn load_steps(&mut self, steps: Vec<Step>) -> bool {
        if !self.state.accepts_plan_change() {
            return false;
        }
        self.steps = steps;
        self.rewind();
        self.apply(Event::PlanLoaded);
        true
    }

    /// Return to the first step, idle
    pub fn reset(&mut self) -> Notifications {
        self.rewind();
        self.apply(Event::Reset);

        let mut out = Notifications::new();
        self.push_progress(&mut out);
        out
    }

    /// Start (or resume) the countdown
    ///
    /// On a rep-driven step this only moves to awaiting confirmation.
    pub fn start(&mut self) -> Notifications {
        let mut out = Notifications::new();
        let Some(step) = self.current() else {
            return out;
        };
        let rep_driven = step.is_rep_driven();
        let recovery = step.is_recovery();

        match self.state {
            RunState::Idle => {
                self.clock_started = true;
                if rep_driven {
                    self.apply(Event::EnteredRepStep);
                } else {
                    self.apply(Event::Start);
                    if !recovery {
                        push(&mut out, Notification::Cue(Cue::StepStart));
                    }
                }
                self.push_progress(&mut out);
            }
            RunState::PausedMidStep => {
                self.apply(Event::Resume);
                self.push_progress(&mut out);
            }
            _ => {}
        }

        out
    }

    /// Freeze the countdown
    pub fn pause(&mut self) -> Notifications {
        let mut out = Notifications::new();
        if self.state.clock_running() {
            self.apply(Event::Pause);
            self.push_progress(&mut out);
        }
        out
    }

    /// Resume a paused countdown
    pub fn resume(&mut self) -> Notifications {
        if self.state == RunState::PausedMidStep {
            self.start()
        } else {
            Notifications::new()
        }
    }

    /// Pause when running, otherwise start
    pub fn toggle(&mut self) -> Notifications {
        if self.state.clock_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Confirm the reps of the current step and advance
    pub fn confirm_reps(&mut self) -> Notifications {
        let mut out = Notifications::new();
        if self.state == RunState::AwaitingRepConfirmation {
            self.apply(Event::ConfirmReps);
            push(&mut out, Notification::Cue(Cue::RepsConfirmed));
            self.advance(&mut out);
        }
        out
    }

    /// Advance both clocks by one second
    ///
    /// Call once per second from the host clock.
    pub fn tick(&mut self) -> Notifications {
        let mut out = Notifications::new();

        if self.state.clock_running() {
            self.tick_running(&mut out);
        } else if self.state == RunState::AwaitingRepConfirmation
            && self.clock_started
            && self.config.elapsed_policy.counts_rep_wait()
        {
            self.elapsed_total_s = self.elapsed_total_s.saturating_add(1);
            self.push_progress(&mut out);
        }

        out
    }

    /// Tick while in Running state
    fn tick_running(&mut self, out: &mut Notifications) {
        let Some(step) = self.current() else {
            return;
        };
        let rep_driven = step.is_rep_driven();
        let recovery = step.is_recovery();

        if rep_driven {
            // Rep steps never count down
            self.apply(Event::EnteredRepStep);
            self.push_progress(out);
            return;
        }

        self.remaining_s = self.remaining_s.saturating_sub(1);
        self.elapsed_total_s = self.elapsed_total_s.saturating_add(1);

        if self.remaining_s > 0 {
            if !recovery && self.remaining_s <= self.config.countdown_s {
                push(out, Notification::Cue(Cue::Countdown(self.remaining_s)));
            }
            self.push_progress(out);
        } else {
            self.advance(out);
        }
    }

    /// Move the cursor to the next step, or finish
    fn advance(&mut self, out: &mut Notifications) {
        self.cursor = (self.cursor + 1).min(self.steps.len());

        let Some(next) = self.steps.get(self.cursor) else {
            self.remaining_s = 0;
            self.apply(Event::PlanFinished);
            push(out, Notification::Cue(Cue::Finished));
            push(out, Notification::Finished);
            return;
        };

        self.remaining_s = next.duration_s;
        let view = StepView::from(next);
        let recovery = next.is_recovery();
        let rep_driven = next.is_rep_driven();

        push(
            out,
            Notification::StepTransition {
                step: view,
                is_rest: recovery,
            },
        );
        if !recovery {
            push(out, Notification::Cue(Cue::StepStart));
        }

        self.apply(if rep_driven {
            Event::EnteredRepStep
        } else {
            Event::EnteredTimedStep
        });
        self.push_progress(out);
    }

    /// Rewind cursor and clocks to the first step
    fn rewind(&mut self) {
        self.cursor = 0;
        self.remaining_s = self.steps.first().map_or(0, |s| s.duration_s);
        self.elapsed_total_s = 0;
        self.clock_started = false;
    }

    fn apply(&mut self, event: Event) {
        self.state = self.state.transition(event);
    }

    fn push_progress(&self, out: &mut Notifications) {
        if let Some(progress) = self.progress() {
            push(out, Notification::Tick(progress));
        }
    }

    /// Get current run state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Get the loaded steps
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Get cursor position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get current step (None when empty or finished)
    pub fn current(&self) -> Option<&Step> {
        self.steps.get(self.cursor)
    }

    /// Whether a non-empty plan is loaded
    pub fn has_workout(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Seconds left on the current step
    pub fn remaining_s(&self) -> u32 {
        self.remaining_s
    }

    /// Whole-workout elapsed seconds
    pub fn elapsed_total_s(&self) -> u32 {
        self.elapsed_total_s
    }

    /// Whole-workout remaining seconds
    ///
    /// Current countdown plus every step after the cursor.
    pub fn remaining_total_s(&self) -> u32 {
        if self.cursor >= self.steps.len() {
            return 0;
        }
        self.remaining_s
            .saturating_add(total_duration(&self.steps[self.cursor + 1..]))
    }

    /// Sum of all step durations
    pub fn plan_total_s(&self) -> u32 {
        total_duration(&self.steps)
    }

    /// Duration of the first work step, shown before the first start
    pub fn starting_duration_s(&self) -> u32 {
        self.steps
            .iter()
            .find(|s| !s.is_rest())
            .or_else(|| self.steps.first())
            .map_or(0, |s| s.duration_s)
    }

    /// Whether nothing has happened since the last load or reset
    pub fn is_untouched(&self) -> bool {
        self.state == RunState::Idle && self.cursor == 0 && !self.clock_started
    }

    /// Countdown and totals for the current step
    pub fn progress(&self) -> Option<Progress> {
        let step = self.current()?;
        Some(Progress {
            step: StepView::from(step),
            remaining_s: self.remaining_s,
            elapsed_total_s: self.elapsed_total_s,
            remaining_total_s: self.remaining_total_s(),
        })
    }

    /// Rows a UI should list
    pub fn visible_window(&self) -> Vec<WindowRow<'_>> {
        visible_window(&self.steps, self.cursor)
    }

    /// Which controls a UI should offer
    pub fn controls(&self) -> Controls {
        if !self.has_workout() {
            return Controls::no_workout();
        }

        let initial = if self.is_untouched() {
            PrimaryAction::Start
        } else {
            PrimaryAction::Resume
        };

        match self.state {
            RunState::Finished => Controls {
                primary: PrimaryAction::Start,
                primary_enabled: false,
                confirm_visible: false,
                reset_enabled: true,
                plan_locked: false,
            },
            RunState::Running => Controls {
                primary: PrimaryAction::Pause,
                primary_enabled: true,
                confirm_visible: false,
                reset_enabled: true,
                plan_locked: true,
            },
            RunState::AwaitingRepConfirmation => Controls {
                primary: initial,
                primary_enabled: false,
                confirm_visible: true,
                reset_enabled: true,
                plan_locked: false,
            },
            RunState::Idle | RunState::PausedMidStep => Controls {
                primary: initial,
                primary_enabled: true,
                confirm_visible: false,
                reset_enabled: !self.is_untouched(),
                plan_locked: false,
            },
        }
    }

    /// Full display state
    pub fn snapshot(&self) -> Snapshot {
        let current = self.current().map(StepView::from);
        let urgent = self.state.clock_running()
            && current
                .as_ref()
                .is_some_and(|s| !s.is_recovery && !s.is_rep_driven())
            && self.remaining_s <= URGENT_WINDOW_S;
        let display_s = if self.is_untouched() {
            self.starting_duration_s()
        } else {
            self.remaining_s
        };

        Snapshot {
            state: self.state,
            current,
            position: self.cursor,
            total_steps: self.steps.len(),
            remaining_s: self.remaining_s,
            display_s,
            elapsed_total_s: self.elapsed_total_s,
            remaining_total_s: self.remaining_total_s(),
            plan_total_s: self.plan_total_s(),
            urgent,
            controls: self.controls(),
        }
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

fn push(out: &mut Notifications, notification: Notification) {
    let _ = out.push(notification);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ElapsedPolicy;
    use crate::plan::RestKind;
    use alloc::vec;

    fn cues(out: &Notifications) -> Vec<Cue> {
        out.iter()
            .filter_map(|n| match n {
                Notification::Cue(cue) => Some(*cue),
                _ => None,
            })
            .collect()
    }

    fn loaded(plan: &[ExerciseSpec], rest_s: u32) -> Sequencer {
        let mut seq = Sequencer::default();
        assert!(seq.load_plan(plan, rest_s));
        seq
    }

    #[test]
    fn test_sequencer_creation() {
        let seq = Sequencer::default();
        assert_eq!(seq.state(), RunState::Idle);
        assert!(!seq.has_workout());
        assert_eq!(seq.controls(), Controls::no_workout());
        assert_eq!(seq.snapshot().headline(), "NO WORKOUT LOADED");
    }

    #[test]
    fn test_load_plan() {
        let seq = loaded(&[ExerciseSpec::timed("Plank", 30)], 5);

        assert_eq!(seq.state(), RunState::Idle);
        assert_eq!(seq.cursor(), 0);
        assert_eq!(seq.remaining_s(), 30);
        assert_eq!(seq.remaining_total_s(), 30);
        assert!(seq.is_untouched());
    }

    #[test]
    fn test_start_emits_step_start() {
        let mut seq = loaded(&[ExerciseSpec::timed("Plank", 30)], 5);

        let out = seq.start();
        assert_eq!(seq.state(), RunState::Running);
        assert_eq!(cues(&out), vec![Cue::StepStart]);
        assert!(matches!(out.last(), Some(Notification::Tick(_))));
    }

    #[test]
    fn test_countdown_cues() {
        let mut seq = loaded(&[ExerciseSpec::timed("Plank", 5)], 5);
        seq.start();

        assert!(cues(&seq.tick()).is_empty()); // 4 left
        assert_eq!(cues(&seq.tick()), vec![Cue::Countdown(3)]);
        assert_eq!(cues(&seq.tick()), vec![Cue::Countdown(2)]);
        assert_eq!(cues(&seq.tick()), vec![Cue::Countdown(1)]);

        let out = seq.tick();
        assert_eq!(cues(&out), vec![Cue::Finished]);
        assert_eq!(out.last(), Some(&Notification::Finished));
        assert_eq!(seq.state(), RunState::Finished);
        assert_eq!(seq.cursor(), 1);
    }

    #[test]
    fn test_no_countdown_on_rest() {
        let mut seq = loaded(
            &[ExerciseSpec::timed("A", 1), ExerciseSpec::timed("B", 10)],
            3,
        );
        seq.start();

        // A expires, rest begins without a start cue
        let out = seq.tick();
        assert!(cues(&out).is_empty());
        assert!(matches!(
            out.first(),
            Some(Notification::StepTransition { is_rest: true, .. })
        ));
        assert_eq!(seq.current().and_then(|s| s.rest), Some(RestKind::BetweenExercises));

        // 3s rest: no countdown beeps
        assert!(cues(&seq.tick()).is_empty());
        assert!(cues(&seq.tick()).is_empty());

        // Rest expires, B starts with a gong
        let out = seq.tick();
        assert_eq!(cues(&out), vec![Cue::StepStart]);
        assert_eq!(seq.remaining_s(), 10);
    }

    #[test]
    fn test_pause_resume() {
        let mut seq = loaded(&[ExerciseSpec::timed("Plank", 30)], 5);
        seq.start();
        seq.tick();

        assert!(!seq.pause().is_empty());
        assert_eq!(seq.state(), RunState::PausedMidStep);

        // Ticks while paused change nothing
        let before = seq.snapshot();
        assert!(seq.tick().is_empty());
        assert_eq!(seq.snapshot(), before);

        // Idempotent pause
        assert!(seq.pause().is_empty());
        assert_eq!(seq.snapshot(), before);

        // Resuming mid-step plays no gong
        let out = seq.resume();
        assert!(cues(&out).is_empty());
        assert_eq!(seq.state(), RunState::Running);
        assert_eq!(seq.remaining_s(), 29);
    }

    #[test]
    fn test_toggle() {
        let mut seq = loaded(&[ExerciseSpec::timed("Plank", 30)], 5);

        seq.toggle();
        assert_eq!(seq.state(), RunState::Running);
        seq.toggle();
        assert_eq!(seq.state(), RunState::PausedMidStep);
        seq.toggle();
        assert_eq!(seq.state(), RunState::Running);
    }

    #[test]
    fn test_rep_step_waits_for_confirmation() {
        let mut seq = loaded(
            &[ExerciseSpec::reps("Push-up", 10), ExerciseSpec::timed("Plank", 20)],
            0,
        );

        seq.start();
        assert_eq!(seq.state(), RunState::AwaitingRepConfirmation);

        // No automatic expiry
        for _ in 0..5 {
            assert!(seq.tick().is_empty());
        }
        assert_eq!(seq.cursor(), 0);

        let out = seq.confirm_reps();
        assert_eq!(cues(&out), vec![Cue::RepsConfirmed, Cue::StepStart]);
        assert_eq!(seq.state(), RunState::Running);
        assert_eq!(seq.cursor(), 1);
        assert_eq!(seq.remaining_s(), 20);
    }

    #[test]
    fn test_consecutive_rep_steps() {
        let mut seq = loaded(&[ExerciseSpec::reps("Pull-up", 5).sets(2)], 0);
        seq.start();

        seq.confirm_reps();
        assert_eq!(seq.state(), RunState::AwaitingRepConfirmation);
        assert_eq!(seq.cursor(), 1);

        let out = seq.confirm_reps();
        assert_eq!(seq.state(), RunState::Finished);
        assert_eq!(out.last(), Some(&Notification::Finished));
    }

    #[test]
    fn test_timed_step_into_rep_step() {
        let mut seq = loaded(
            &[ExerciseSpec::timed("Plank", 1), ExerciseSpec::reps("Squat", 12)],
            0,
        );
        seq.start();

        seq.tick();
        assert_eq!(seq.state(), RunState::AwaitingRepConfirmation);
        assert!(seq.controls().confirm_visible);
        assert_eq!(seq.snapshot().clock_text().as_str(), "--:--");
    }

    #[test]
    fn test_confirm_outside_rep_wait_is_noop() {
        let mut seq = loaded(&[ExerciseSpec::timed("Plank", 30)], 5);
        assert!(seq.confirm_reps().is_empty());
        seq.start();
        assert!(seq.confirm_reps().is_empty());
        assert_eq!(seq.cursor(), 0);
    }

    #[test]
    fn test_elapsed_policy() {
        let plan = [ExerciseSpec::reps("Push-up", 10)];

        let mut seq = loaded(&plan, 0);
        seq.start();
        seq.tick();
        assert_eq!(seq.elapsed_total_s(), 0);

        let mut seq = Sequencer::new(SessionConfig {
            elapsed_policy: ElapsedPolicy::IncludeRepWait,
            ..SessionConfig::default()
        });
        seq.load_plan(&plan, 0);

        // Not started yet: clock stays put
        seq.tick();
        assert_eq!(seq.elapsed_total_s(), 0);

        seq.start();
        seq.tick();
        seq.tick();
        assert_eq!(seq.elapsed_total_s(), 2);
    }

    #[test]
    fn test_load_rejected_while_running() {
        let mut seq = loaded(&[ExerciseSpec::timed("Plank", 30)], 5);
        seq.start();

        assert!(!seq.load_plan(&[ExerciseSpec::timed("Other", 10)], 5));
        assert!(!seq.set_config(SessionConfig::with_rest(9)));
        assert_eq!(seq.steps()[0].label, "Plank");

        seq.pause();
        assert!(seq.load_plan(&[ExerciseSpec::timed("Other", 10)], 5));
        assert_eq!(seq.state(), RunState::Idle);
        assert_eq!(seq.steps()[0].label, "Other");
    }

    #[test]
    fn test_reset() {
        let mut seq = loaded(
            &[ExerciseSpec::timed("A", 2), ExerciseSpec::timed("B", 4)],
            1,
        );
        seq.start();
        for _ in 0..4 {
            seq.tick();
        }
        assert_eq!(seq.cursor(), 2);

        seq.reset();
        assert_eq!(seq.state(), RunState::Idle);
        assert_eq!(seq.cursor(), 0);
        assert_eq!(seq.remaining_s(), 2);
        assert_eq!(seq.elapsed_total_s(), 0);
        assert!(seq.is_untouched());
    }

    #[test]
    fn test_finished_is_terminal_until_reset() {
        let mut seq = loaded(&[ExerciseSpec::timed("A", 1)], 0);
        seq.start();
        seq.tick();
        assert_eq!(seq.state(), RunState::Finished);

        assert!(seq.start().is_empty());
        assert!(seq.tick().is_empty());
        assert_eq!(seq.remaining_total_s(), 0);

        let snapshot = seq.snapshot();
        assert_eq!(snapshot.headline(), "WORKOUT COMPLETE!");
        assert!(!snapshot.controls.primary_enabled);
        assert!(snapshot.controls.reset_enabled);

        seq.reset();
        assert_eq!(seq.state(), RunState::Idle);
    }

    #[test]
    fn test_empty_plan() {
        let mut seq = Sequencer::default();
        assert!(seq.load_plan(&[ExerciseSpec::timed("", 30)], 5));

        assert!(!seq.has_workout());
        assert_eq!(seq.state(), RunState::Idle);
        assert!(seq.start().is_empty());
        assert!(seq.tick().is_empty());
        assert_eq!(seq.snapshot().clock_text().as_str(), "00:00");
    }

    #[test]
    fn test_controls() {
        let mut seq = loaded(&[ExerciseSpec::timed("Plank", 30)], 5);

        let controls = seq.controls();
        assert_eq!(controls.primary, PrimaryAction::Start);
        assert!(!controls.reset_enabled);

        seq.start();
        let controls = seq.controls();
        assert_eq!(controls.primary, PrimaryAction::Pause);
        assert!(controls.plan_locked);

        seq.pause();
        let controls = seq.controls();
        assert_eq!(controls.primary, PrimaryAction::Resume);
        assert!(controls.reset_enabled);
        assert!(!controls.plan_locked);
    }

    #[test]
    fn test_urgent_window() {
        let mut seq = loaded(&[ExerciseSpec::timed("Plank", 12)], 5);
        seq.start();

        seq.tick();
        assert!(!seq.snapshot().urgent);
        seq.tick();
        assert!(seq.snapshot().urgent);

        seq.pause();
        assert!(!seq.snapshot().urgent);
    }

    #[test]
    fn test_leading_rest_display() {
        let mut seq = Sequencer::default();
        seq.load_steps(vec![
            Step::rest(RestKind::BetweenExercises, 5, 0),
            Step::work("Squat".into(), 40, None, 1),
        ]);

        // Cursor stays on the genuine first step
        assert_eq!(seq.cursor(), 0);
        assert_eq!(seq.remaining_s(), 5);
        assert_eq!(seq.snapshot().clock_text().as_str(), "00:40");
    }

    #[test]
    fn test_total_remaining_tracks_countdown() {
        let mut seq = loaded(
            &[ExerciseSpec::timed("A", 3), ExerciseSpec::timed("B", 4)],
            2,
        );
        assert_eq!(seq.remaining_total_s(), 9);

        seq.start();
        seq.tick();
        assert_eq!(seq.remaining_total_s(), 8);
        assert_eq!(seq.elapsed_total_s(), 1);
    }

    #[test]
    fn test_huge_durations_saturate_totals() {
        let seq = loaded(
            &[ExerciseSpec::timed("A", 10), ExerciseSpec::timed("B", 10)],
            u32::MAX,
        );
        assert_eq!(seq.snapshot().plan_total_s, u32::MAX);

        let mut seq = loaded(
            &[ExerciseSpec::timed("A", u32::MAX), ExerciseSpec::timed("B", 10)],
            3,
        );
        assert_eq!(seq.remaining_total_s(), u32::MAX);

        seq.start();
        seq.tick();
        assert_eq!(seq.remaining_s(), u32::MAX - 1);
        assert_eq!(seq.snapshot().remaining_total_s, u32::MAX);
    }

    #[test]
    fn test_authored_cool_down_is_quiet() {
        let mut seq = loaded(
            &[ExerciseSpec::timed("Squat", 1), ExerciseSpec::timed("Cool down", 4)],
            0,
        );
        seq.start();

        // Squat expires onto the cool down: transition, but no gong
        let out = seq.tick();
        assert!(cues(&out).is_empty());
        assert!(matches!(
            out.first(),
            Some(Notification::StepTransition { is_rest: true, .. })
        ));
        assert!(!seq.current().is_some_and(Step::is_rest));

        // No countdown beeps over the final seconds
        for _ in 0..3 {
            assert!(cues(&seq.tick()).is_empty());
        }

        let out = seq.tick();
        assert_eq!(cues(&out), vec![Cue::Finished]);
        assert_eq!(seq.state(), RunState::Finished);
    }

    #[test]
    fn test_cool_down_first_has_no_start_gong() {
        let mut seq = loaded(&[ExerciseSpec::timed("Cool Down Walk", 5)], 0);

        let out = seq.start();
        assert_eq!(seq.state(), RunState::Running);
        assert!(cues(&out).is_empty());
    }
}

//! Read-only views handed to renderers
//!
//! Snapshots are copies: holding one never borrows the sequencer.

use alloc::string::String;
use core::fmt::Write;

use crate::plan::{Side, Step};
use crate::state::RunState;

/// Formatted clock text (`MM:SS`)
pub type ClockText = heapless::String<16>;

/// Clock text shown for rep-driven steps
pub const REPS_CLOCK: &str = "--:--";

/// Render seconds as `MM:SS`
pub fn format_clock(seconds: u32) -> ClockText {
    let mut text = ClockText::new();
    let _ = write!(text, "{:02}:{:02}", seconds / 60, seconds % 60);
    text
}

/// Display copy of a step
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepView {
    pub ordinal: usize,
    pub label: String,
    pub duration_s: u32,
    pub reps: Option<u32>,
    /// Inserted rest step
    pub is_rest: bool,
    /// Rest or cool-down, by flag or by name
    pub is_recovery: bool,
    pub side: Option<Side>,
}

impl StepView {
    /// Whether the step waits for a rep confirmation
    pub fn is_rep_driven(&self) -> bool {
        !self.is_rest && self.reps.is_some_and(|r| r > 0)
    }
}

impl From<&Step> for StepView {
    fn from(step: &Step) -> Self {
        Self {
            ordinal: step.ordinal,
            label: step.label.clone(),
            duration_s: step.duration_s,
            reps: step.reps,
            is_rest: step.is_rest(),
            is_recovery: step.is_recovery(),
            side: step.side,
        }
    }
}

/// Countdown and totals for the tick hook
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Progress {
    /// Current step
    pub step: StepView,
    /// Seconds left on the current step
    pub remaining_s: u32,
    /// Whole-workout elapsed seconds
    pub elapsed_total_s: u32,
    /// Whole-workout remaining seconds
    pub remaining_total_s: u32,
}

/// Label of the primary start/pause control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PrimaryAction {
    Start,
    Resume,
    Pause,
}

impl PrimaryAction {
    /// Button text
    pub fn label(self) -> &'static str {
        match self {
            PrimaryAction::Start => "Start Workout",
            PrimaryAction::Resume => "Resume",
            PrimaryAction::Pause => "Pause",
        }
    }
}

/// Which controls a UI should offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Controls {
    pub primary: PrimaryAction,
    pub primary_enabled: bool,
    /// Offer the "done" button for rep-driven steps
    pub confirm_visible: bool,
    pub reset_enabled: bool,
    /// Routine and rest duration cannot be changed
    pub plan_locked: bool,
}

impl Controls {
    /// Controls with nothing loaded
    pub const fn no_workout() -> Self {
        Self {
            primary: PrimaryAction::Start,
            primary_enabled: false,
            confirm_visible: false,
            reset_enabled: false,
            plan_locked: false,
        }
    }
}

/// Full display state of the sequencer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub state: RunState,
    /// Current step (None when empty or finished)
    pub current: Option<StepView>,
    /// Cursor position
    pub position: usize,
    pub total_steps: usize,
    /// Seconds left on the current step
    pub remaining_s: u32,
    /// Seconds shown on the clock; before the first start this is the
    /// first work step's duration
    pub display_s: u32,
    pub elapsed_total_s: u32,
    pub remaining_total_s: u32,
    /// Sum of all step durations
    pub plan_total_s: u32,
    /// Final seconds of a running work step
    pub urgent: bool,
    pub controls: Controls,
}

impl Snapshot {
    /// Whether a non-empty plan is loaded
    pub fn has_workout(&self) -> bool {
        self.total_steps > 0
    }

    /// Clock text for the current step
    pub fn clock_text(&self) -> ClockText {
        match &self.current {
            Some(step) if step.is_rep_driven() => {
                let mut text = ClockText::new();
                let _ = text.push_str(REPS_CLOCK);
                text
            }
            Some(_) => format_clock(self.display_s),
            None => format_clock(0),
        }
    }

    /// Headline text for the current step
    pub fn headline(&self) -> String {
        if !self.has_workout() {
            return "NO WORKOUT LOADED".into();
        }
        match (&self.current, self.state) {
            (_, RunState::Finished) => "WORKOUT COMPLETE!".into(),
            (Some(step), _) => step.label.to_uppercase(),
            (None, _) => "GET READY".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0).as_str(), "00:00");
        assert_eq!(format_clock(75).as_str(), "01:15");
        assert_eq!(format_clock(3600).as_str(), "60:00");
        assert_eq!(format_clock(6001).as_str(), "100:01");
    }

    #[test]
    fn test_step_view_from_step() {
        let step = Step::work("Cool down stretch".into(), 60, None, 4);
        let view = StepView::from(&step);

        assert_eq!(view.ordinal, 4);
        assert!(!view.is_rest);
        assert!(view.is_recovery);
        assert!(!view.is_rep_driven());
    }

    #[test]
    fn test_primary_labels() {
        assert_eq!(PrimaryAction::Start.label(), "Start Workout");
        assert_eq!(PrimaryAction::Pause.label(), "Pause");
    }
}

//! Run-state definition
//!
//! Whether the clock counts, and which commands are honored, is a function
//! of the current state and an event.

use super::events::Event;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sequencer run states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RunState {
    /// Loaded (or reset), clock not started
    #[default]
    Idle,
    /// Counting down a timed step
    Running,
    /// Countdown frozen by the user
    PausedMidStep,
    /// Waiting for the user to confirm a rep-driven step
    AwaitingRepConfirmation,
    /// Every step completed
    Finished,
}

impl RunState {
    /// Check if the per-step countdown advances on ticks
    pub fn clock_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// Check if the plan or rest duration may be replaced
    pub fn accepts_plan_change(&self) -> bool {
        !matches!(self, RunState::Running)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use RunState::*;

        match (self, event) {
            // Reset and reload are valid everywhere
            (_, Reset) => Idle,
            (_, PlanLoaded) => Idle,

            // Idle transitions
            (Idle, Start) => Running,
            (Idle, EnteredRepStep) => AwaitingRepConfirmation,

            // Running transitions
            (Running, Pause) => PausedMidStep,
            (Running, EnteredTimedStep) => Running,
            (Running, EnteredRepStep) => AwaitingRepConfirmation,
            (Running, PlanFinished) => Finished,

            // PausedMidStep transitions
            (PausedMidStep, Resume) => Running,
            (PausedMidStep, Start) => Running,

            // AwaitingRepConfirmation transitions
            // Confirming hands the clock back until the sequencer reports
            // which step it moved onto
            (AwaitingRepConfirmation, ConfirmReps) => Running,
            (AwaitingRepConfirmation, EnteredTimedStep) => Running,
            (AwaitingRepConfirmation, EnteredRepStep) => AwaitingRepConfirmation,
            (AwaitingRepConfirmation, PlanFinished) => Finished,

            // Default: stay in current state
            _ => self,
        }
    }
}

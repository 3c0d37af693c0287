//! Events that trigger run-state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // User commands
    /// User pressed start
    Start,
    /// User pressed pause
    Pause,
    /// User pressed resume
    Resume,
    /// User confirmed the reps of the current step
    ConfirmReps,
    /// User reset the workout
    Reset,
    /// A new plan replaced the old one
    PlanLoaded,

    // Sequencer events
    /// Cursor moved onto a timed step (or a start resolved to one)
    EnteredTimedStep,
    /// Cursor moved onto a rep-driven step (or a start resolved to one)
    EnteredRepStep,
    /// Cursor moved past the last step
    PlanFinished,
}

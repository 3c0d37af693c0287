//! Notification seam for renderers and audio cues
//!
//! The sequencer never calls out directly. Every command returns the
//! notifications it produced, and the host hands them to an observer with
//! [`dispatch`]. Observers only read; they never touch sequencer state.

use crate::sequencer::{Progress, StepView};

/// Maximum notifications a single command can produce
pub const MAX_NOTIFICATIONS: usize = 6;

/// Notifications produced by one command or tick
pub type Notifications = heapless::Vec<Notification, MAX_NOTIFICATIONS>;

/// Audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cue {
    /// A work step begins (gong)
    StepStart,
    /// Seconds left on a work step (blink)
    Countdown(u32),
    /// User confirmed a rep-driven step (blink)
    RepsConfirmed,
    /// Workout complete (beep)
    Finished,
}

/// Something an observer should react to
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notification {
    /// Countdown or totals changed
    Tick(Progress),
    /// Cursor moved onto a new step
    StepTransition {
        step: StepView,
        /// Rest or cool-down step; completion chimes are suppressed
        is_rest: bool,
    },
    /// Play a cue
    Cue(Cue),
    /// Cursor moved past the last step
    Finished,
}

/// Observer of sequencer notifications
pub trait WorkoutObserver {
    /// Countdown or totals changed
    fn on_tick(&mut self, progress: &Progress);

    /// Cursor moved onto a new step
    fn on_step_transition(&mut self, step: &StepView, is_rest: bool);

    /// Workout complete
    fn on_finished(&mut self);

    /// Play a cue
    ///
    /// Silent by default, for observers that only render.
    fn on_cue(&mut self, _cue: Cue) {}
}

/// Deliver notifications to an observer, in order
pub fn dispatch<O: WorkoutObserver + ?Sized>(observer: &mut O, notifications: &[Notification]) {
    for notification in notifications {
        match notification {
            Notification::Tick(progress) => observer.on_tick(progress),
            Notification::StepTransition { step, is_rest } => {
                observer.on_step_transition(step, *is_rest)
            }
            Notification::Cue(cue) => observer.on_cue(*cue),
            Notification::Finished => observer.on_finished(),
        }
    }
}

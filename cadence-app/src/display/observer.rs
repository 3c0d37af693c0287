//! Audio cue stand-in
//!
//! A terminal has no gong or beeper; every cue rings the bell once, and
//! the workout end rings it three times.

use std::io::Write;

use cadence_core::sequencer::{Progress, StepView};
use cadence_core::traits::{Cue, WorkoutObserver};
use tracing::{debug, info, trace};

/// Terminal bell
const BELL: &[u8] = b"\x07";

/// Observer that logs transitions and rings the bell on cues
///
/// Muting happens upstream: the controller drops cues while sound is off.
pub struct TerminalObserver<W: Write> {
    out: W,
}

impl<W: Write> TerminalObserver<W> {
    /// Create an observer writing bells to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn ring(&mut self, times: usize) {
        for _ in 0..times {
            if let Err(e) = self.out.write_all(BELL) {
                debug!(error = %e, "bell failed");
                return;
            }
        }
        let _ = self.out.flush();
    }

    /// Consume the observer and return its writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> WorkoutObserver for TerminalObserver<W> {
    fn on_tick(&mut self, progress: &Progress) {
        trace!(
            step = %progress.step.label,
            remaining_s = progress.remaining_s,
            elapsed_total_s = progress.elapsed_total_s,
            "tick"
        );
    }

    fn on_step_transition(&mut self, step: &StepView, is_rest: bool) {
        info!(step = %step.label, ordinal = step.ordinal, is_rest, "step started");
    }

    fn on_finished(&mut self) {
        info!("workout complete");
    }

    fn on_cue(&mut self, cue: Cue) {
        debug!(?cue, "cue");
        match cue {
            Cue::Finished => self.ring(3),
            Cue::StepStart | Cue::Countdown(_) | Cue::RepsConfirmed => self.ring(1),
        }
    }
}

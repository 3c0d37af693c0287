//! Step sequencer
//!
//! Walks an expanded plan under a single one-second clock, tracking the
//! current step, its countdown, and whole-workout totals.

pub mod engine;
pub mod snapshot;
pub mod window;

pub use engine::Sequencer;
pub use snapshot::{format_clock, ClockText, Controls, PrimaryAction, Progress, Snapshot, StepView};
pub use window::{visible_window, RowStatus, WindowRow};

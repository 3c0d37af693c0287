//! Workout plans
//!
//! Converts declarative exercise schemas into the flat step sequence the
//! sequencer walks.

pub mod exercise;
pub mod expand;
pub mod step;

pub use exercise::ExerciseSpec;
pub use expand::{expand, total_duration};
pub use step::{RestKind, Side, Step};

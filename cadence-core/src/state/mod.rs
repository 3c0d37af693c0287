//! Run-state machine for the sequencer
//!
//! Defines the authoritative lifecycle of a loaded workout.
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::RunState;

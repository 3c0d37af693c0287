//! Collaborator traits
//!
//! These define the interface between the sequencer and whatever renders
//! its state or plays its cues.

pub mod notify;

pub use notify::{dispatch, Cue, Notification, Notifications, WorkoutObserver, MAX_NOTIFICATIONS};

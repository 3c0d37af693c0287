//! Platform-agnostic core logic for the Cadence interval timer
//!
//! This crate contains all workout logic that does not depend on a
//! particular terminal, speaker, or storage backend:
//!
//! - Workout plan data model and plan expansion
//! - Run-state machine for the countdown engine
//! - Step sequencer (countdown, pause/resume, rep confirmation)
//! - Notification seam for renderers and audio cues
//! - Session configuration

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod plan;
pub mod sequencer;
pub mod state;
pub mod traits;

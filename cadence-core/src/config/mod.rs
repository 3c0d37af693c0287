//! Configuration types
//!
//! Session-level knobs that shape plan expansion and sequencing.

pub mod types;

pub use types::*;

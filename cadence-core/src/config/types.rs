//! Session configuration definitions
//!
//! These values are normally filled from the host settings file and then
//! handed to the sequencer when a routine is loaded.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rest duration used when the user has not entered one
pub const DEFAULT_REST_S: u32 = 3;

/// Smallest rest duration accepted from user input
pub const MIN_REST_S: u32 = 1;

/// Largest rest duration accepted from user input (one hour)
pub const MAX_REST_S: u32 = 3_600;

/// Largest duration a single step may have (one day)
pub const MAX_STEP_S: u32 = 86_400;

/// Final seconds of a work step that produce a countdown cue
pub const COUNTDOWN_WINDOW_S: u32 = 3;

/// Final seconds of a work step shown as urgent
pub const URGENT_WINDOW_S: u32 = 10;

/// When the whole-workout elapsed clock advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElapsedPolicy {
    /// Count only while a timed step is running
    #[default]
    TimedOnly,
    /// Also count while waiting for a rep confirmation, once started
    IncludeRepWait,
}

impl ElapsedPolicy {
    /// Whether ticks during a rep wait add to elapsed time
    pub fn counts_rep_wait(self) -> bool {
        self == ElapsedPolicy::IncludeRepWait
    }
}

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Rest inserted between sets, group members, and exercises (seconds)
    pub rest_s: u32,
    /// Elapsed clock policy
    pub elapsed_policy: ElapsedPolicy,
    /// Countdown cue window (seconds)
    pub countdown_s: u32,
}

impl SessionConfig {
    /// Config with a specific rest duration and defaults elsewhere
    pub fn with_rest(rest_s: u32) -> Self {
        Self {
            rest_s,
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rest_s: DEFAULT_REST_S,
            elapsed_policy: ElapsedPolicy::TimedOnly,
            countdown_s: COUNTDOWN_WINDOW_S,
        }
    }
}

/// Normalize a user-entered rest duration
///
/// Missing or zero input falls back to [`DEFAULT_REST_S`]; anything else is
/// kept within [`MIN_REST_S`]..=[`MAX_REST_S`].
pub fn clamp_rest(raw: Option<i64>) -> u32 {
    match raw {
        None | Some(0) => DEFAULT_REST_S,
        Some(v) => v.clamp(MIN_REST_S as i64, MAX_REST_S as i64) as u32,
    }
}

//! Expanded steps
//!
//! Steps are the atomic units of sequencing. Each one is either counted
//! down for `duration_s` seconds or, when `reps` is set, held until the user
//! confirms it. Steps are never modified after expansion.

use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a rest step was inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RestKind {
    /// After a left/right pair
    AfterBilateral,
    /// Between sets of one exercise, or between group rounds
    BetweenSets,
    /// Between members of a group round
    BetweenGroupMembers,
    /// Between top-level plan entries
    BetweenExercises,
}

impl RestKind {
    /// Display label for the rest step
    pub fn label(self) -> &'static str {
        match self {
            RestKind::AfterBilateral => "Rest after bilateral",
            RestKind::BetweenSets => "Rest between sets",
            RestKind::BetweenGroupMembers => "Rest between superset exercises",
            RestKind::BetweenExercises => "Rest between exercises",
        }
    }
}

/// Body side of a bilateral half
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Label suffix without the separator
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// A single step of an expanded plan
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    /// Display name, including set and side annotations
    pub label: String,
    /// Countdown length in seconds (0 for rep-driven steps)
    pub duration_s: u32,
    /// Repetitions requiring manual confirmation
    pub reps: Option<u32>,
    /// Set when the step exists purely for recovery
    pub rest: Option<RestKind>,
    /// Body side for bilateral halves
    pub side: Option<Side>,
    /// Position in the full sequence
    pub ordinal: usize,
}

impl Step {
    /// Create a work step
    pub fn work(label: String, duration_s: u32, reps: Option<u32>, ordinal: usize) -> Self {
        Self {
            label,
            duration_s: if reps.is_some() { 0 } else { duration_s },
            reps,
            rest: None,
            side: None,
            ordinal,
        }
    }

    /// Create a rest step
    pub fn rest(kind: RestKind, duration_s: u32, ordinal: usize) -> Self {
        Self {
            label: kind.label().into(),
            duration_s,
            reps: None,
            rest: Some(kind),
            side: None,
            ordinal,
        }
    }

    /// Whether this step was inserted as a rest
    pub fn is_rest(&self) -> bool {
        self.rest.is_some()
    }

    /// Whether this step waits for a rep confirmation instead of a timer
    pub fn is_rep_driven(&self) -> bool {
        !self.is_rest() && self.reps.is_some_and(|r| r > 0)
    }

    /// Whether cues should treat this step as recovery time
    ///
    /// Covers inserted rests as well as authored steps named like a rest
    /// or cool down.
    pub fn is_recovery(&self) -> bool {
        if self.is_rest() {
            return true;
        }
        let label = self.label.to_lowercase();
        label.contains("rest") || label.contains("cool down")
    }
}

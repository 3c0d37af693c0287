//! Exercise schema as authored in a workout plan

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One entry of a workout plan
///
/// Either a single exercise, or a group (superset) whose members are
/// performed back-to-back and repeated `sets` times.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExerciseSpec {
    /// Display title; entries with a blank title are dropped
    pub title: String,
    /// Work duration in seconds
    pub duration_s: Option<u32>,
    /// Repetitions; takes priority over `duration_s`
    pub reps: Option<u32>,
    /// Number of sets (or rounds for a group)
    pub sets: u32,
    /// Performed once per body side
    pub bilateral: bool,
    /// Group members, if this entry is a superset
    pub group: Option<Vec<ExerciseSpec>>,
}

impl ExerciseSpec {
    /// A timed exercise
    pub fn timed(title: &str, duration_s: u32) -> Self {
        Self {
            title: title.into(),
            duration_s: Some(duration_s),
            reps: None,
            sets: 1,
            bilateral: false,
            group: None,
        }
    }

    /// A rep-driven exercise
    pub fn reps(title: &str, reps: u32) -> Self {
        Self {
            title: title.into(),
            duration_s: None,
            reps: Some(reps),
            sets: 1,
            bilateral: false,
            group: None,
        }
    }

    /// A superset of `members`
    pub fn group(members: Vec<ExerciseSpec>) -> Self {
        Self {
            title: String::new(),
            duration_s: None,
            reps: None,
            sets: 1,
            bilateral: false,
            group: Some(members),
        }
    }

    /// Set the number of sets (rounds for a group)
    pub fn sets(mut self, sets: u32) -> Self {
        self.sets = sets;
        self
    }

    /// Mark as bilateral
    pub fn bilateral(mut self) -> Self {
        self.bilateral = true;
        self
    }

    /// Also give a duration (ignored when reps are present)
    pub fn with_duration(mut self, duration_s: u32) -> Self {
        self.duration_s = Some(duration_s);
        self
    }

    /// Trimmed title, or None if blank
    pub fn title(&self) -> Option<&str> {
        let title = self.title.trim();
        if title.is_empty() {
            None
        } else {
            Some(title)
        }
    }

    /// Positive rep count, if any
    pub fn rep_count(&self) -> Option<u32> {
        self.reps.filter(|&r| r > 0)
    }

    /// Set count, at least 1
    pub fn set_count(&self) -> u32 {
        self.sets.max(1)
    }

    /// Resolved countdown length for each emitted step
    ///
    /// Rep-driven exercises use 0 even when a duration was also given.
    /// Timed exercises get at least one second.
    pub fn effective_duration(&self) -> u32 {
        if self.rep_count().is_some() {
            0
        } else {
            self.duration_s.unwrap_or(0).max(1)
        }
    }

    /// Whether this entry is a group
    pub fn is_group(&self) -> bool {
        self.group.is_some()
    }
}

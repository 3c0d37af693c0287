//! Plan expansion
//!
//! Flattens nested exercise schemas into the ordered step sequence, placing
//! rest steps between sets, group members, group rounds, and plan entries.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use super::exercise::ExerciseSpec;
use super::step::{RestKind, Side, Step};

/// Expand a plan into steps
///
/// Pure and deterministic. Entries with a blank title (and groups with no
/// titled members) produce nothing and do not attract rest steps. No rest
/// steps are produced when `rest_s` is 0.
pub fn expand(specs: &[ExerciseSpec], rest_s: u32) -> Vec<Step> {
    let mut expansion = Expansion::new(rest_s);
    let mut entries = specs.iter().filter(|spec| produces_steps(spec)).peekable();

    while let Some(spec) = entries.next() {
        match &spec.group {
            Some(members) => expansion.group(members, spec.set_count()),
            None => expansion.exercise(spec, false),
        }

        if entries.peek().is_some() {
            expansion.rest(RestKind::BetweenExercises);
        }
    }

    expansion.steps
}

/// Sum of all step durations (seconds), saturating at `u32::MAX`
pub fn total_duration(steps: &[Step]) -> u32 {
    steps
        .iter()
        .fold(0u32, |total, s| total.saturating_add(s.duration_s))
}

fn produces_steps(spec: &ExerciseSpec) -> bool {
    match &spec.group {
        Some(members) => members.iter().any(|m| m.title().is_some()),
        None => spec.title().is_some(),
    }
}

struct Expansion {
    steps: Vec<Step>,
    rest_s: u32,
}

impl Expansion {
    fn new(rest_s: u32) -> Self {
        Self {
            steps: Vec::new(),
            rest_s,
        }
    }

    fn work(&mut self, label: String, duration_s: u32, reps: Option<u32>, side: Option<Side>) {
        let mut step = Step::work(label, duration_s, reps, self.steps.len());
        step.side = side;
        self.steps.push(step);
    }

    fn rest(&mut self, kind: RestKind) {
        if self.rest_s == 0 {
            return;
        }
        let step = Step::rest(kind, self.rest_s, self.steps.len());
        self.steps.push(step);
    }

    /// One superset: every round runs all members back-to-back
    fn group(&mut self, members: &[ExerciseSpec], rounds: u32) {
        let members: Vec<&ExerciseSpec> = members.iter().filter(|m| m.title().is_some()).collect();

        for round in 1..=rounds {
            for (i, member) in members.iter().enumerate() {
                self.exercise(member, true);
                if i + 1 < members.len() {
                    self.rest(RestKind::BetweenGroupMembers);
                }
            }

            if round < rounds {
                self.rest(RestKind::BetweenSets);
            }
        }
    }

    /// Single-exercise rule; nested groups inside a group are not recursed
    fn exercise(&mut self, spec: &ExerciseSpec, in_group: bool) {
        let Some(title) = spec.title() else {
            return;
        };

        let sets = spec.set_count();
        let duration_s = spec.effective_duration();
        let reps = spec.rep_count();

        for set in 1..=sets {
            let label = if sets > 1 {
                format!("{title} (Set {set}/{sets})")
            } else {
                String::from(title)
            };

            if spec.bilateral {
                for side in [Side::Left, Side::Right] {
                    self.work(
                        format!("{label} - {}", side.as_str()),
                        duration_s,
                        reps,
                        Some(side),
                    );
                }
                // Standalone pairs always get a breather, even after the last set
                if set < sets || !in_group {
                    self.rest(RestKind::AfterBilateral);
                }
            } else {
                self.work(label, duration_s, reps, None);
                if !in_group && set < sets {
                    self.rest(RestKind::BetweenSets);
                }
            }
        }
    }
}

//! Commands typed on stdin
//!
//! One command per line. Letters match the on-screen hint line.

/// A user command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Start, or pause when running
    Toggle,
    Pause,
    Resume,
    /// Confirm the reps of the current step
    ConfirmReps,
    Reset,
    /// Select a workout by zero-based catalog index
    SelectWorkout(usize),
    /// Set the rest duration (seconds, unclamped)
    SetRest(i64),
    /// Turn audible cues on or off
    ToggleSound,
    /// List the catalog
    List,
    Quit,
}

impl InputCommand {
    /// Parse a line of input
    ///
    /// A line of only spaces toggles, like the space bar. Workout numbers
    /// are one-based on screen.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if !line.is_empty() && line.trim().is_empty() {
            return Some(InputCommand::Toggle);
        }

        let mut words = line.split_whitespace();
        let command = words.next()?.to_ascii_lowercase();
        let arg = words.next();

        match (command.as_str(), arg) {
            ("s" | "start", None) => Some(InputCommand::Toggle),
            ("p" | "pause", None) => Some(InputCommand::Pause),
            ("r" | "resume", None) => Some(InputCommand::Resume),
            ("d" | "done", None) => Some(InputCommand::ConfirmReps),
            ("x" | "reset", None) => Some(InputCommand::Reset),
            ("m" | "mute", None) => Some(InputCommand::ToggleSound),
            ("l" | "list", None) => Some(InputCommand::List),
            ("q" | "quit", None) => Some(InputCommand::Quit),
            ("w" | "workout", Some(n)) => n
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .map(|n| InputCommand::SelectWorkout(n - 1)),
            ("b" | "rest", Some(secs)) => secs.parse::<i64>().ok().map(InputCommand::SetRest),
            _ => None,
        }
    }
}

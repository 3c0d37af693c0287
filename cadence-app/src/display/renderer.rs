//! Screen rendering
//!
//! Builds text screens for the terminal. The whole screen is redrawn after
//! every handled event.

use std::io::{self, Write};

use cadence_core::sequencer::{format_clock, RowStatus, Snapshot, WindowRow};

/// Terminal control: clear screen and home the cursor
const CLEAR: &str = "\x1b[2J\x1b[H";

/// Rule under the title
const RULE: &str = "----------------------------------------";

/// A screen buffer
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Screen {
    lines: Vec<String>,
}

impl Screen {
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Clear the screen
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Append a line of text
    pub fn push_line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Get a line of text
    pub fn get_line(&self, row: usize) -> &str {
        self.lines.get(row).map_or("", String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write the screen to a terminal
    pub fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        out.write_all(CLEAR.as_bytes())?;
        for line in &self.lines {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}

/// Screen renderer for the workout views
pub struct Renderer {
    screen: Screen,
}

impl Renderer {
    pub const fn new() -> Self {
        Self {
            screen: Screen::new(),
        }
    }

    /// Get the current screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Render the workout screen
    ///
    /// # Arguments
    /// * `title` - Selected workout name, if any
    /// * `snapshot` - Sequencer display state
    /// * `rows` - Visible window of the plan
    /// * `rest_s` - Current rest duration
    /// * `sound` - Whether cues are audible
    pub fn render_workout(
        &mut self,
        title: Option<&str>,
        snapshot: &Snapshot,
        rows: &[WindowRow<'_>],
        rest_s: u32,
        sound: bool,
    ) {
        self.screen.clear();

        match title {
            Some(name) => self.screen.push_line(format!("Workout Plan ({name})")),
            None => self.screen.push_line("Workout Plan"),
        }
        self.screen.push_line(RULE);

        // Current step
        self.screen.push_line(snapshot.headline());
        let clock = snapshot.clock_text();
        if snapshot.urgent {
            self.screen.push_line(format!(">> {clock} <<"));
        } else {
            self.screen.push_line(format!("   {clock}"));
        }
        if let Some(reps) = snapshot
            .current
            .as_ref()
            .filter(|s| s.is_rep_driven())
            .and_then(|s| s.reps)
        {
            self.screen.push_line(format!("   {reps} reps"));
        }

        if snapshot.has_workout() {
            self.screen.push_line(format!(
                "Elapsed {}  Remaining {}  Step {}/{}",
                format_clock(snapshot.elapsed_total_s),
                format_clock(snapshot.remaining_total_s),
                (snapshot.position + 1).min(snapshot.total_steps),
                snapshot.total_steps,
            ));
        }
        self.screen.push_line("");

        for row in rows {
            self.screen.push_line(window_line(row));
        }
        if !rows.is_empty() {
            self.screen.push_line("");
        }

        self.screen.push_line(controls_line(snapshot, rest_s, sound));
    }

    /// Render the catalog listing
    pub fn render_catalog<'a>(
        &mut self,
        names: impl Iterator<Item = &'a str>,
        selected: Option<usize>,
    ) {
        self.screen.clear();
        self.screen.push_line("Workouts");
        self.screen.push_line(RULE);

        let mut any = false;
        for (i, name) in names.enumerate() {
            let marker = if selected == Some(i) { '>' } else { ' ' };
            self.screen.push_line(format!("{marker} {:>2}. {name}", i + 1));
            any = true;
        }
        if !any {
            self.screen.push_line("  No workouts found");
        }

        self.screen.push_line("");
        self.screen.push_line("[w n] select  [s] back");
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn window_line(row: &WindowRow<'_>) -> String {
    let marker = match row.status {
        RowStatus::Done => 'x',
        RowStatus::Current => '>',
        RowStatus::Upcoming => ' ',
    };
    let amount = match row.step.reps {
        Some(reps) if row.step.is_rep_driven() => format!("{reps} reps"),
        _ => format_clock(row.step.duration_s).to_string(),
    };
    format!("{marker} {:<32} {amount:>8}", row.step.label)
}

/// Hint line listing the commands that currently do something
fn controls_line(snapshot: &Snapshot, rest_s: u32, sound: bool) -> String {
    let controls = &snapshot.controls;
    let mut hints = Vec::new();

    if controls.primary_enabled {
        hints.push(format!("[s] {}", controls.primary.label()));
    }
    if controls.confirm_visible {
        hints.push("[d] Done".to_string());
    }
    if controls.reset_enabled {
        hints.push("[x] Reset".to_string());
    }
    if controls.plan_locked {
        hints.push(format!("Rest {rest_s}s (locked)"));
    } else {
        hints.push("[w n] Routine".to_string());
        hints.push(format!("[b secs] Rest {rest_s}s"));
    }
    hints.push(format!("[m] Sound {}", if sound { "on" } else { "off" }));
    hints.push("[l] List".to_string());
    hints.push("[q] Quit".to_string());

    hints.join("  ")
}

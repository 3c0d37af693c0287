//! Inter-task communication
//!
//! The tick task and the input task feed one queue; the controller task is
//! its only consumer, so events are handled one at a time, in arrival order.

use tokio::sync::mpsc;

use crate::input::InputCommand;

/// Capacity of the controller event queue
const EVENT_QUEUE_SIZE: usize = 16;

/// Events delivered to the controller task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A command typed by the user
    Input(InputCommand),
    /// One second of wall-clock time passed
    Tick,
}

pub type EventSender = mpsc::Sender<AppEvent>;
pub type EventReceiver = mpsc::Receiver<AppEvent>;

/// Create the controller event queue
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::channel(EVENT_QUEUE_SIZE)
}

//! Input task
//!
//! Reads commands from stdin, one per line.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::channels::{AppEvent, EventSender};
use crate::input::InputCommand;

/// Input task - forwards parsed stdin commands
pub async fn input_task(events: EventSender) {
    info!("input task started");
    forward_lines(BufReader::new(tokio::io::stdin()), events).await;
}

/// Forward commands from `reader` until quit, end of input, or the queue
/// closes
///
/// End of input is treated as quit. No read is left pending after quit.
pub async fn forward_lines<R: AsyncBufRead + Unpin>(reader: R, events: EventSender) {
    let mut lines = reader.lines();

    loop {
        let command = match lines.next_line().await {
            Ok(Some(line)) => match InputCommand::parse(&line) {
                Some(command) => command,
                None => {
                    debug!(line = %line, "unrecognized command");
                    continue;
                }
            },
            Ok(None) => {
                debug!("end of input");
                InputCommand::Quit
            }
            Err(e) => {
                warn!(error = %e, "failed to read input");
                InputCommand::Quit
            }
        };

        let quit = command == InputCommand::Quit;
        if events.send(AppEvent::Input(command)).await.is_err() || quit {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::event_channel;

    #[tokio::test]
    async fn test_forward_lines() {
        let (tx, mut rx) = event_channel();
        forward_lines(&b"s\nbogus\nw 2\nq\nd\n"[..], tx).await;

        assert_eq!(rx.recv().await, Some(AppEvent::Input(InputCommand::Toggle)));
        assert_eq!(
            rx.recv().await,
            Some(AppEvent::Input(InputCommand::SelectWorkout(1)))
        );
        assert_eq!(rx.recv().await, Some(AppEvent::Input(InputCommand::Quit)));
        // Nothing read after quit
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_end_of_input_quits() {
        let (tx, mut rx) = event_channel();
        forward_lines(&b"p\n"[..], tx).await;

        assert_eq!(rx.recv().await, Some(AppEvent::Input(InputCommand::Pause)));
        assert_eq!(rx.recv().await, Some(AppEvent::Input(InputCommand::Quit)));
        assert_eq!(rx.recv().await, None);
    }
}

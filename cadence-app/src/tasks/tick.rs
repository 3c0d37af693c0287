//! Tick task
//!
//! Provides the one-second clock that drives every countdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info, trace};

use crate::channels::{AppEvent, EventSender};

/// Tick interval
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Tick task - sends a tick event every second
///
/// A notification on `restart` re-arms the clock so the next tick lands one
/// full interval later; the controller fires it whenever a countdown starts
/// or resumes. Missed ticks are delivered late rather than dropped. Exits
/// when the controller is gone.
pub async fn tick_task(events: EventSender, restart: Arc<Notify>) {
    info!("tick task started");

    let mut ticker = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);

    loop {
        tokio::select! {
            biased;

            () = restart.notified() => {
                trace!("tick clock restarted");
                ticker.reset();
            }

            _ = ticker.tick() => {
                if events.send(AppEvent::Tick).await.is_err() {
                    debug!("event queue closed, tick task exiting");
                    return;
                }
            }
        }
    }
}

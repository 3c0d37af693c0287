//! Main controller task
//!
//! Drains the event queue one event at a time: applies the command or tick
//! to the controller, hands the resulting notifications to the observer,
//! and redraws the screen.

use std::io::{self, Write};
use std::sync::Arc;

use cadence_core::traits::{dispatch, WorkoutObserver};
use tokio::sync::Notify;
use tracing::{debug, info, trace};

use crate::channels::{AppEvent, EventReceiver};
use crate::controller::Controller;
use crate::display::Renderer;
use crate::input::InputCommand;

/// What is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Workout,
    Catalog,
}

/// Controller task - main coordination loop
///
/// Returns when the user quits or every event source is gone. Fires
/// `tick_restart` whenever a command sets the countdown running.
pub async fn controller_task<O, W>(
    mut controller: Controller,
    mut observer: O,
    out: &mut W,
    mut events: EventReceiver,
    tick_restart: Arc<Notify>,
) -> io::Result<()>
where
    O: WorkoutObserver,
    W: Write,
{
    info!("controller task started");

    let mut renderer = Renderer::new();
    let mut view = View::Workout;
    render(&controller, &mut renderer, view, out)?;

    while let Some(event) = events.recv().await {
        match event {
            AppEvent::Tick => {
                let notifications = controller.tick();
                if notifications.is_empty() {
                    continue;
                }
                trace!(count = notifications.len(), "tick notifications");
                dispatch(&mut observer, &notifications);

                if view == View::Workout {
                    render(&controller, &mut renderer, view, out)?;
                }
            }

            AppEvent::Input(InputCommand::Quit) => {
                info!("quit requested");
                return Ok(());
            }

            AppEvent::Input(InputCommand::List) => {
                view = View::Catalog;
                render(&controller, &mut renderer, view, out)?;
            }

            AppEvent::Input(input) => {
                debug!(?input, "input");
                let was_running = controller.is_running();
                let notifications = controller.process_input(input);
                if !was_running && controller.is_running() {
                    tick_restart.notify_one();
                }
                dispatch(&mut observer, &notifications);

                view = View::Workout;
                render(&controller, &mut renderer, view, out)?;
            }
        }
    }

    debug!("event queue closed");
    Ok(())
}

fn render<W: Write>(
    controller: &Controller,
    renderer: &mut Renderer,
    view: View,
    out: &mut W,
) -> io::Result<()> {
    match view {
        View::Workout => renderer.render_workout(
            controller.workout().map(|w| w.name.as_str()),
            &controller.snapshot(),
            &controller.visible_window(),
            controller.rest_s(),
            controller.sound(),
        ),
        View::Catalog => {
            renderer.render_catalog(controller.catalog().names(), controller.selected())
        }
    }
    renderer.screen().draw(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::event_channel;
    use crate::display::TerminalObserver;
    use cadence_catalog::{Catalog, Workout};
    use cadence_core::config::SessionConfig;
    use cadence_core::plan::ExerciseSpec;
    use tokio::time::{timeout, Duration};

    fn controller(exercises: Vec<ExerciseSpec>) -> Controller {
        let catalog = Catalog {
            workouts: vec![Workout {
                name: "Quick".into(),
                exercises,
            }],
        };
        let mut controller = Controller::new(catalog, SessionConfig::default());
        controller.select_workout(0);
        controller
    }

    async fn run(
        controller: Controller,
        inputs: Vec<AppEvent>,
        restart: Arc<Notify>,
    ) -> (String, Vec<u8>) {
        let (tx, rx) = event_channel();
        for event in inputs {
            tx.send(event).await.unwrap();
        }
        drop(tx);

        let mut screen = Vec::new();
        let mut bells = Vec::new();
        controller_task(
            controller,
            TerminalObserver::new(&mut bells),
            &mut screen,
            rx,
            restart,
        )
        .await
        .unwrap();

        (String::from_utf8(screen).unwrap(), bells)
    }

    #[tokio::test]
    async fn test_runs_workout_to_completion() {
        let (screen, bells) = run(
            controller(vec![ExerciseSpec::timed("Plank", 2)]),
            vec![
                AppEvent::Input(InputCommand::Toggle),
                AppEvent::Tick,
                AppEvent::Tick,
                AppEvent::Input(InputCommand::Quit),
                AppEvent::Tick,
            ],
            Arc::new(Notify::new()),
        )
        .await;

        assert!(screen.contains("Workout Plan (Quick)"));
        assert!(screen.contains("WORKOUT COMPLETE!"));
        // Start gong, countdown at 1s, then the three finish bells
        assert_eq!(bells.len(), 5);
    }

    #[tokio::test]
    async fn test_mute_silences_bells() {
        let (screen, bells) = run(
            controller(vec![ExerciseSpec::timed("Plank", 2)]),
            vec![
                AppEvent::Input(InputCommand::ToggleSound),
                AppEvent::Input(InputCommand::Toggle),
                AppEvent::Tick,
                AppEvent::Tick,
            ],
            Arc::new(Notify::new()),
        )
        .await;

        assert!(screen.contains("WORKOUT COMPLETE!"));
        assert!(screen.contains("[m] Sound off"));
        assert!(bells.is_empty());
    }

    #[tokio::test]
    async fn test_tick_restart_on_start() {
        let restart = Arc::new(Notify::new());
        run(
            controller(vec![ExerciseSpec::timed("Plank", 30)]),
            vec![
                AppEvent::Input(InputCommand::Toggle),
                AppEvent::Input(InputCommand::Pause),
            ],
            restart.clone(),
        )
        .await;
        // Start stored a permit
        timeout(Duration::from_millis(10), restart.notified())
            .await
            .unwrap();

        run(
            controller(vec![ExerciseSpec::timed("Plank", 30)]),
            vec![AppEvent::Input(InputCommand::Pause)],
            restart.clone(),
        )
        .await;
        // Nothing started, nothing stored
        assert!(timeout(Duration::from_millis(10), restart.notified())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_confirm_into_timed_step_restarts_ticks() {
        let restart = Arc::new(Notify::new());
        let mut controller = controller(vec![
            ExerciseSpec::reps("Push-up", 10),
            ExerciseSpec::timed("Plank", 30),
        ]);
        // Reach the rep wait outside the task
        controller.process_input(InputCommand::Toggle);
        assert!(!controller.is_running());

        run(
            controller,
            vec![AppEvent::Input(InputCommand::ConfirmReps)],
            restart.clone(),
        )
        .await;
        timeout(Duration::from_millis(10), restart.notified())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_view() {
        let (screen, _) = run(
            controller(vec![ExerciseSpec::timed("Plank", 2)]),
            vec![AppEvent::Input(InputCommand::List)],
            Arc::new(Notify::new()),
        )
        .await;

        assert!(screen.contains(">  1. Quick"));
    }
}

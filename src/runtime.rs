//! Reminder runtime loop: single-threaded, reactor-driven.
//!
//! Runs the [`ReminderService`] on one logical timeline using
//! `edge-executor` for task scheduling and `async-io-mini` for timers
//! (no busy-spinning).  Each iteration waits for whichever comes first:
//!
//! 1. **Command**: the next entry of the [`TriggerQueue`] (wakes as soon
//!    as any thread pushes)
//! 2. **Deadline**: the scheduler's next tick, via a reactor timer
//!
//! then polls the scheduler with the clock's current time.
//!
//! ```text
//!  ┌───────────────────────────────────────────────────────────┐
//!  │  futures_lite::block_on                                   │
//!  │  ┌─────────────────────────────────────────────────────┐  │
//!  │  │  edge_executor::LocalExecutor                       │  │
//!  │  │                                                     │  │
//!  │  │   TriggerQueue::next() ──┐                          │  │
//!  │  │                          ├─ or ─▶ handle ─▶ poll    │  │
//!  │  │   Timer::after(due-now) ─┘                          │  │
//!  │  └─────────────────────────────────────────────────────┘  │
//!  └───────────────────────────────────────────────────────────┘
//! ```
//!
//! The timer is re-armed from `next_deadline()` on every iteration, so a
//! restart or stop takes effect before the loop sleeps again: no wake-up
//! of a previous run can deliver a tick.

use core::time::Duration;

use futures_lite::future;
use log::{debug, info};

use crate::app::commands::ReminderCommand;
use crate::app::ports::{ClockPort, EventSink, SoundPort};
use crate::app::service::{CommandOutcome, ReminderService};
use crate::triggers::TriggerQueue;

/// Why the loop woke up.
enum Wake {
    Command(ReminderCommand),
    Deadline,
}

/// Totals for one [`run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub commands: u64,
    pub ticks: u64,
}

async fn wait_for(deadline: Option<Duration>) {
    match deadline {
        Some(delay) => {
            async_io_mini::Timer::after(delay).await;
        }
        None => future::pending::<()>().await,
    }
}

async fn reminder_loop<S, E, C>(
    service: &mut ReminderService,
    sound: &mut S,
    sink: &mut E,
    clock: &C,
    triggers: &TriggerQueue,
    on_reply: &mut impl FnMut(&CommandOutcome),
) -> LoopSummary
where
    S: SoundPort,
    E: EventSink,
    C: ClockPort,
{
    let mut summary = LoopSummary::default();

    if service.autostart() {
        service.start(clock.now(), sink);
    }

    loop {
        let delay = service
            .next_deadline()
            .map(|due| due.saturating_sub(clock.now()));

        let wake = future::or(async { Wake::Command(triggers.next().await) }, async {
            wait_for(delay).await;
            Wake::Deadline
        })
        .await;

        if let Wake::Command(cmd) = wake {
            summary.commands += 1;
            debug!("Runtime: command {:?}", cmd);
            let outcome = service.handle_command_logged(cmd, clock.now(), sound, sink);
            if outcome != CommandOutcome::Done {
                on_reply(&outcome);
            }
            if outcome == CommandOutcome::Shutdown {
                break;
            }
        }

        if service.poll(clock.now(), sound, sink) {
            summary.ticks += 1;
        }
    }

    info!(
        "Runtime: loop exited ({} commands, {} ticks)",
        summary.commands, summary.ticks
    );
    summary
}

/// Run the reminder loop on the current thread until a
/// [`ReminderCommand::Shutdown`] is received.
///
/// `on_reply` receives every outcome other than
/// [`CommandOutcome::Done`] (status reports, help, shutdown).
pub fn run<S, E, C>(
    service: &mut ReminderService,
    sound: &mut S,
    sink: &mut E,
    clock: &C,
    triggers: &TriggerQueue,
    mut on_reply: impl FnMut(&CommandOutcome),
) -> LoopSummary
where
    S: SoundPort,
    E: EventSink,
    C: ClockPort,
{
    let executor: edge_executor::LocalExecutor<'_, 8> = edge_executor::LocalExecutor::new();

    info!("Runtime: reminder loop started");
    future::block_on(executor.run(reminder_loop(
        service,
        sound,
        sink,
        clock,
        triggers,
        &mut on_reply,
    )))
}

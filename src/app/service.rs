//! Reminder service: the hexagonal core.
//!
//! [`ReminderService`] owns the scheduler and the state a user
//! manipulates: the selected rate (picker), the volume (slider) and the
//! running flag (Start/Stop button).  Adapters are injected at call sites,
//! so the whole service is testable with mock ports and a simulated clock.
//!
//! ```text
//!  ReminderCommand ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                      │    ReminderService     │
//!        SoundPort ◀── │  selection · scheduler │
//!                      └────────────────────────┘
//! ```

use core::fmt;
use core::time::Duration;

use log::{info, warn};

use crate::config::ReminderConfig;
use crate::error::Result;
use crate::scheduler::{ReminderScheduler, RunId, SchedulerState};
use crate::types::{BlinkRate, Volume};

use super::commands::ReminderCommand;
use super::events::ReminderEvent;
use super::ports::{EventSink, SoundPort};

// ───────────────────────────────────────────────────────────────
// Status / command outcome
// ───────────────────────────────────────────────────────────────

/// Point-in-time view of the service, for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderStatus {
    pub state: SchedulerState,
    /// Rate the next start will use.
    pub selected_rate: BlinkRate,
    /// Rate of the active run, if any.
    pub active_rate: Option<BlinkRate>,
    pub volume: Volume,
    pub ticks: u64,
    pub observed_period: Option<Duration>,
}

impl fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.active_rate {
            Some(rate) => write!(f, "running at {rate}")?,
            None => write!(f, "stopped")?,
        }
        write!(
            f,
            " | selected {} | volume {} | ticks {}",
            self.selected_rate, self.volume, self.ticks
        )?;
        if let Some(period) = self.observed_period {
            write!(f, " | observed every {:.2}s", period.as_secs_f64())?;
        }
        Ok(())
    }
}

/// What the caller should do after a command was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Nothing to report.
    Done,
    /// Show this status.
    Status(ReminderStatus),
    /// Show the help text.
    Help,
    /// Leave the runtime loop.
    Shutdown,
}

// ───────────────────────────────────────────────────────────────
// ReminderService
// ───────────────────────────────────────────────────────────────

pub struct ReminderService {
    scheduler: ReminderScheduler,
    selected_rate: BlinkRate,
    autostart: bool,
}

impl ReminderService {
    /// Construct the service from configuration.  Reminders are not
    /// started; see [`ReminderService::autostart`].
    pub fn new(config: &ReminderConfig) -> Self {
        Self {
            scheduler: ReminderScheduler::new(config.volume),
            selected_rate: config.blink_rate,
            autostart: config.autostart,
        }
    }

    // ── Picker / slider / button ─────────────────────────────

    /// Select the rate used by the next start.  The active run, if any,
    /// keeps its rate.
    pub fn select_rate(&mut self, per_minute: i64, sink: &mut impl EventSink) -> Result<BlinkRate> {
        let rate = BlinkRate::try_from(per_minute)?;
        if rate != self.selected_rate {
            self.selected_rate = rate;
            info!("Rate selected: {}", rate.label());
            sink.emit(&ReminderEvent::RateSelected(rate));
        }
        Ok(rate)
    }

    /// Start reminders at the selected rate (restarting if running).
    pub fn start(&mut self, now: Duration, sink: &mut impl EventSink) -> RunId {
        self.scheduler.start(self.selected_rate, now, sink)
    }

    /// Select `per_minute` and start.  On error nothing changes.
    pub fn start_with(
        &mut self,
        per_minute: i64,
        now: Duration,
        sink: &mut impl EventSink,
    ) -> Result<RunId> {
        self.select_rate(per_minute, sink)?;
        Ok(self.start(now, sink))
    }

    /// Stop reminders.  Returns `false` if they were not running.
    pub fn stop(&mut self, sink: &mut impl EventSink) -> bool {
        self.scheduler.stop(sink)
    }

    /// The Start/Stop button: start when idle, stop when running.
    /// Returns the new state.
    pub fn toggle(&mut self, now: Duration, sink: &mut impl EventSink) -> SchedulerState {
        if self.scheduler.is_running() {
            self.stop(sink);
        } else {
            self.start(now, sink);
        }
        self.scheduler.state()
    }

    /// Validate and apply a volume level.  On error the volume is unchanged.
    pub fn set_volume(
        &mut self,
        level: f32,
        sound: &mut impl SoundPort,
        sink: &mut impl EventSink,
    ) -> Result<Volume> {
        let volume = Volume::new(level)?;
        self.scheduler.set_volume(volume, sound, sink);
        Ok(volume)
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (console, named trigger).
    pub fn handle_command(
        &mut self,
        cmd: ReminderCommand,
        now: Duration,
        sound: &mut impl SoundPort,
        sink: &mut impl EventSink,
    ) -> Result<CommandOutcome> {
        let outcome = match cmd {
            ReminderCommand::Begin => {
                self.start(now, sink);
                CommandOutcome::Done
            }
            ReminderCommand::End => {
                self.stop(sink);
                CommandOutcome::Done
            }
            ReminderCommand::Toggle => {
                self.toggle(now, sink);
                CommandOutcome::Done
            }
            ReminderCommand::SelectRate(per_minute) => {
                self.select_rate(per_minute, sink)?;
                CommandOutcome::Done
            }
            ReminderCommand::SetVolume(level) => {
                self.set_volume(level, sound, sink)?;
                CommandOutcome::Done
            }
            ReminderCommand::Status => CommandOutcome::Status(self.status()),
            ReminderCommand::Help => CommandOutcome::Help,
            ReminderCommand::Shutdown => {
                self.stop(sink);
                info!("Shutdown requested");
                CommandOutcome::Shutdown
            }
        };
        Ok(outcome)
    }

    /// Like [`handle_command`](Self::handle_command), but configuration
    /// errors are logged instead of returned.
    pub fn handle_command_logged(
        &mut self,
        cmd: ReminderCommand,
        now: Duration,
        sound: &mut impl SoundPort,
        sink: &mut impl EventSink,
    ) -> CommandOutcome {
        self.handle_command(cmd, now, sound, sink)
            .unwrap_or_else(|e| {
                warn!("Command {:?} rejected: {}", cmd, e);
                CommandOutcome::Done
            })
    }

    /// Deliver the tick due at `now`, if any.
    pub fn poll(&mut self, now: Duration, sound: &mut impl SoundPort, sink: &mut impl EventSink) -> bool {
        self.scheduler.poll(now, sound, sink)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn status(&self) -> ReminderStatus {
        ReminderStatus {
            state: self.scheduler.state(),
            selected_rate: self.selected_rate,
            active_rate: self.scheduler.active_rate(),
            volume: self.scheduler.volume(),
            ticks: self.scheduler.tick_count(),
            observed_period: self.scheduler.observed_period(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub fn selected_rate(&self) -> BlinkRate {
        self.selected_rate
    }

    pub fn volume(&self) -> Volume {
        self.scheduler.volume()
    }

    /// Whether reminders should begin as soon as the loop starts.
    pub fn autostart(&self) -> bool {
        self.autostart
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }
}

//! Blink-reminder scheduler engine.
//!
//! Turns a [`BlinkRate`] into a recurring trigger that plays the cue
//! through a [`SoundPort`].  The engine owns no timer of its own: the
//! runtime loop asks for [`ReminderScheduler::next_deadline`], sleeps
//! until then (or until a command arrives) and calls
//! [`ReminderScheduler::poll`] with the current monotonic time.
//!
//! ```text
//!            start(rate, now)                     poll(now)
//!   Idle ─────────────────────▶ Running ──────────────────────┐
//!    ▲                           │  ▲                         │ now ≥ next_due
//!    │          stop()           │  │  next_due += interval   ▼
//!    └───────────────────────────┘  └──────────────── SoundPort::play(volume)
//! ```
//!
//! At most one run is active.  Starting while running replaces the run
//! (new [`RunId`], phase reset) before returning, so no deadline of the
//! old run can fire afterwards.

use core::fmt;
use core::time::Duration;

use heapless::HistoryBuffer;
use log::{debug, info, warn};

use crate::app::events::ReminderEvent;
use crate::app::ports::{EventSink, SoundPort};
use crate::types::{BlinkRate, Volume};

// ═══════════════════════════════════════════════════════════════
//  Types
// ═══════════════════════════════════════════════════════════════

/// Number of recent tick timestamps kept for cadence reporting.
const TICK_HISTORY: usize = 8;

/// Identifier of one run (the span between a start and the next stop/start).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Internal bookkeeping for the live run.
#[derive(Debug, Clone)]
struct ActiveRun {
    id: RunId,
    /// Rate captured at start; later selections do not affect it.
    rate: BlinkRate,
    interval: Duration,
    next_due: Duration,
    ticks: u64,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// The scheduler engine.
pub struct ReminderScheduler {
    run: Option<ActiveRun>,
    volume: Volume,
    last_run_id: u64,
    /// Timestamps of the most recent ticks of the current run.
    recent: HistoryBuffer<Duration, TICK_HISTORY>,
}

impl Default for ReminderScheduler {
    fn default() -> Self {
        Self::new(Volume::default())
    }
}

impl ReminderScheduler {
    pub fn new(volume: Volume) -> Self {
        Self {
            run: None,
            volume,
            last_run_id: 0,
            recent: HistoryBuffer::new(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Begin a run at `rate`.  The first tick is due one full interval
    /// after `now`.  A run already in progress is stopped first.
    pub fn start(&mut self, rate: BlinkRate, now: Duration, sink: &mut impl EventSink) -> RunId {
        self.stop(sink);

        self.last_run_id += 1;
        let id = RunId(self.last_run_id);
        let interval = rate.interval();
        self.run = Some(ActiveRun {
            id,
            rate,
            interval,
            next_due: now + interval,
            ticks: 0,
        });
        self.recent = HistoryBuffer::new();

        info!("Scheduler: {} started at {} (every {:?})", id, rate, interval);
        sink.emit(&ReminderEvent::Started { run: id, rate, interval });
        id
    }

    /// Cancel the active run.  Returns `false` (and does nothing) when idle.
    pub fn stop(&mut self, sink: &mut impl EventSink) -> bool {
        match self.run.take() {
            Some(run) => {
                info!("Scheduler: {} stopped after {} ticks", run.id, run.ticks);
                sink.emit(&ReminderEvent::Stopped {
                    run: run.id,
                    ticks: run.ticks,
                });
                true
            }
            None => {
                debug!("Scheduler: stop while idle");
                false
            }
        }
    }

    /// Change the volume.  Applies to the next tick and to any cue that is
    /// still sounding.
    pub fn set_volume(
        &mut self,
        volume: Volume,
        sound: &mut impl SoundPort,
        sink: &mut impl EventSink,
    ) {
        self.volume = volume;
        sound.set_live_volume(volume);
        debug!("Scheduler: volume {}", volume);
        sink.emit(&ReminderEvent::VolumeChanged(volume));
    }

    // ── Tick delivery ─────────────────────────────────────────

    /// Deliver the tick that is due at `now`, if any.  Returns whether a
    /// tick fired.
    ///
    /// If the caller was late by more than one interval, a single tick
    /// fires and the phase realigns to the next interval boundary after
    /// `now`; the skipped intervals are reported, never replayed.
    pub fn poll(
        &mut self,
        now: Duration,
        sound: &mut impl SoundPort,
        sink: &mut impl EventSink,
    ) -> bool {
        let Some(run) = self.run.as_mut() else {
            return false;
        };
        if now < run.next_due {
            return false;
        }

        let overdue = (now - run.next_due).as_nanos();
        let interval = run.interval.as_nanos();
        let skipped = (overdue / interval) as u64;
        let phase = Duration::from_nanos((overdue % interval) as u64);
        run.next_due = now - phase + run.interval;
        run.ticks += 1;

        let (id, seq) = (run.id, run.ticks);
        self.recent.write(now);

        if skipped > 0 {
            warn!("Scheduler: {} skipped {} interval(s)", id, skipped);
            sink.emit(&ReminderEvent::IntervalsSkipped { run: id, skipped });
        }
        self.on_tick(id, seq, now, sound, sink);
        true
    }

    fn on_tick(
        &mut self,
        run: RunId,
        seq: u64,
        at: Duration,
        sound: &mut impl SoundPort,
        sink: &mut impl EventSink,
    ) {
        let volume = self.volume;
        debug!("Scheduler: {} tick {} at {:?} ({})", run, seq, at, volume);
        sink.emit(&ReminderEvent::Tick { run, seq, at, volume });

        if let Err(error) = sound.play(volume) {
            warn!("Scheduler: {} tick {} playback failed: {}", run, seq, error);
            sink.emit(&ReminderEvent::PlaybackFailed { run, seq, error });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> SchedulerState {
        if self.run.is_some() {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Rate of the active run.
    pub fn active_rate(&self) -> Option<BlinkRate> {
        self.run.as_ref().map(|r| r.rate)
    }

    pub fn run_id(&self) -> Option<RunId> {
        self.run.as_ref().map(|r| r.id)
    }

    /// Ticks delivered in the active run (0 when idle).
    pub fn tick_count(&self) -> u64 {
        self.run.as_ref().map_or(0, |r| r.ticks)
    }

    /// When the next tick is due.  `None` when idle.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.run.as_ref().map(|r| r.next_due)
    }

    /// Mean spacing of the recent ticks of the active run.
    pub fn observed_period(&self) -> Option<Duration> {
        if self.run.is_none() || self.recent.len() < 2 {
            return None;
        }
        let first = *self.recent.oldest_ordered().next()?;
        let last = *self.recent.recent()?;
        Some((last - first) / (self.recent.len() as u32 - 1))
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════

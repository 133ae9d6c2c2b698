//! Mock ports for integration tests.
//!
//! Records every playback call and every emitted event so tests can
//! assert on the full tick history without touching an audio device.

use std::cell::Cell;
use std::collections::HashSet;
use std::time::Duration;

use blinktime::app::events::ReminderEvent;
use blinktime::app::ports::{ClockPort, EventSink, SoundPort};
use blinktime::app::service::ReminderService;
use blinktime::error::PlaybackError;
use blinktime::scheduler::RunId;
use blinktime::types::Volume;

// ── RecordingSound ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSound {
    /// Volume passed to each `play` call, in order.
    pub played: Vec<f32>,
    /// Volume passed to each `set_live_volume` call.
    pub live: Vec<f32>,
    /// 1-based play indices that fail.
    pub fail_on: HashSet<usize>,
}

#[allow(dead_code)]
impl RecordingSound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            fail_on: indices.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn last_volume(&self) -> Option<f32> {
        self.played.last().copied()
    }
}

impl SoundPort for RecordingSound {
    fn play(&mut self, volume: Volume) -> Result<(), PlaybackError> {
        self.played.push(volume.level());
        if self.fail_on.contains(&self.played.len()) {
            return Err(PlaybackError::Decode("corrupt frame".into()));
        }
        Ok(())
    }

    fn set_live_volume(&mut self, volume: Volume) {
        self.live.push(volume.level());
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<ReminderEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(run, at)` of every tick, in delivery order.
    pub fn ticks(&self) -> Vec<(RunId, Duration)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReminderEvent::Tick { run, at, .. } => Some((*run, *at)),
                _ => None,
            })
            .collect()
    }

    /// Tick timestamps in seconds.
    pub fn tick_times(&self) -> Vec<f64> {
        self.ticks().iter().map(|(_, at)| at.as_secs_f64()).collect()
    }

    pub fn playback_failures(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ReminderEvent::PlaybackFailed { .. }))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &ReminderEvent) {
        self.events.push(event.clone());
    }
}

// ── SimClock ──────────────────────────────────────────────────

/// Manually advanced clock.
#[derive(Default)]
pub struct SimClock {
    now: Cell<Duration>,
}

#[allow(dead_code)]
impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl ClockPort for SimClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// Simulation step: fine enough to catch two ticks in one interval.
pub const STEP: Duration = Duration::from_millis(50);

/// Advance `clock` by `span` in [`STEP`] increments, polling after each.
#[allow(dead_code)]
pub fn run_for(
    svc: &mut ReminderService,
    clock: &SimClock,
    sound: &mut RecordingSound,
    sink: &mut RecordingSink,
    span: Duration,
) {
    let end = clock.now() + span;
    while clock.now() < end {
        clock.advance(STEP);
        svc.poll(clock.now(), sound, sink);
    }
}

/// Successive differences of `times`.
#[allow(dead_code)]
pub fn gaps(times: &[f64]) -> Vec<f64> {
    times.windows(2).map(|w| w[1] - w[0]).collect()
}

//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured reminder events to the
//! `log` facade (rendered by `env_logger` in the binary).

use log::{debug, info, warn};

use crate::app::events::ReminderEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ReminderEvent`] as one tagged line.
#[derive(Default)]
pub struct LogEventSink {
    emitted: u64,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events seen so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ReminderEvent) {
        self.emitted += 1;
        match event {
            ReminderEvent::Started { run, rate, interval } => {
                info!(
                    "START | {} | rate={} | interval={:.2}s",
                    run,
                    rate,
                    interval.as_secs_f64()
                );
            }
            ReminderEvent::Stopped { run, ticks } => {
                info!("STOP  | {} | ticks={}", run, ticks);
            }
            ReminderEvent::Tick { run, seq, at, volume } => {
                debug!(
                    "TICK  | {} | seq={} | t={:.3}s | volume={}",
                    run,
                    seq,
                    at.as_secs_f64(),
                    volume
                );
            }
            ReminderEvent::PlaybackFailed { run, seq, error } => {
                warn!("AUDIO | {} | seq={} | {}", run, seq, error);
            }
            ReminderEvent::IntervalsSkipped { run, skipped } => {
                warn!("TICK  | {} | skipped={}", run, skipped);
            }
            ReminderEvent::VolumeChanged(volume) => {
                info!("VOLUME| {}", volume);
            }
            ReminderEvent::RateSelected(rate) => {
                info!("RATE  | {}", rate.label());
            }
        }
    }
}

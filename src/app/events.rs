//! Outbound reminder events.
//!
//! The scheduler and [`ReminderService`](super::service::ReminderService)
//! emit these through the [`EventSink`](super::ports::EventSink) port.

use core::time::Duration;

use crate::error::PlaybackError;
use crate::scheduler::RunId;
use crate::types::{BlinkRate, Volume};

/// Structured events emitted by the reminder core.
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderEvent {
    /// A run began.  The first cue is due after `interval`.
    Started {
        run: RunId,
        rate: BlinkRate,
        interval: Duration,
    },

    /// The active run was cancelled.
    Stopped { run: RunId, ticks: u64 },

    /// One cue was attempted.
    Tick {
        run: RunId,
        seq: u64,
        at: Duration,
        volume: Volume,
    },

    /// Playback of one cue failed.  The run continues.
    PlaybackFailed {
        run: RunId,
        seq: u64,
        error: PlaybackError,
    },

    /// One or more intervals elapsed without a tick (loop starved).
    IntervalsSkipped { run: RunId, skipped: u64 },

    /// Output level changed.
    VolumeChanged(Volume),

    /// A new rate was selected; applies from the next start.
    RateSelected(BlinkRate),
}

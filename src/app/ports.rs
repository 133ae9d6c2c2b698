//! Port traits: the hexagonal boundary between reminder logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ReminderService / ReminderScheduler (domain)
//! ```
//!
//! Driven adapters (sound output, event sinks, clocks) implement these
//! traits.  The domain consumes them via generics, so the scheduler never
//! touches an audio device or the wall clock directly.

use core::time::Duration;

use crate::error::PlaybackError;
use crate::types::Volume;

// ───────────────────────────────────────────────────────────────
// Sound port (driven adapter: domain → audio output)
// ───────────────────────────────────────────────────────────────

/// Plays the reminder cue.
///
/// `play` is fire-and-forget: it starts the cue and returns without
/// waiting for it to finish.
pub trait SoundPort {
    /// Start one playback of the cue at `volume`.
    fn play(&mut self, volume: Volume) -> Result<(), PlaybackError>;

    /// Change the output level of a cue that is still sounding.
    /// A no-op when nothing is playing.
    fn set_live_volume(&mut self, volume: Volume);
}

impl<S: SoundPort + ?Sized> SoundPort for Box<S> {
    fn play(&mut self, volume: Volume) -> Result<(), PlaybackError> {
        (**self).play(volume)
    }

    fn set_live_volume(&mut self, volume: Volume) {
        (**self).set_live_volume(volume);
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / UI)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`ReminderEvent`](super::events::ReminderEvent)s
/// through this port.  Adapters decide where they go (log, status line).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::ReminderEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.
pub trait ClockPort {
    /// Time elapsed since an arbitrary fixed origin.  Never goes backwards.
    fn now(&self) -> Duration;
}

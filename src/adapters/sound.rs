//! Sound output adapters.
//!
//! - **`feature = "audio"`**: [`RodioSound`] decodes the bundled cue and
//!   plays it on the default output device.  Each tick gets a fresh
//!   playback session; starting a new one cuts off the previous cue.
//! - **always available**: [`TerminalBell`] rings the terminal bell.
//!   Used when the `audio` feature is off or no output device opens.

use std::io::Write;

use log::{info, warn};

use crate::app::ports::SoundPort;
use crate::config::ReminderConfig;
use crate::error::PlaybackError;
use crate::types::Volume;

use super::resource::ResourceLocator;

// ───────────────────────────────────────────────────────────────
// Terminal bell
// ───────────────────────────────────────────────────────────────

const BEL: &[u8] = b"\x07";

/// Rings the terminal bell.  The bell has no level control, so any
/// non-zero volume rings and a muted volume stays silent.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SoundPort for TerminalBell<W> {
    fn play(&mut self, volume: Volume) -> Result<(), PlaybackError> {
        if volume.is_muted() {
            return Ok(());
        }
        self.out
            .write_all(BEL)
            .and_then(|()| self.out.flush())
            .map_err(|e| PlaybackError::Device(e.to_string()))
    }

    fn set_live_volume(&mut self, _volume: Volume) {}
}

// ───────────────────────────────────────────────────────────────
// Decoded audio (rodio)
// ───────────────────────────────────────────────────────────────

#[cfg(feature = "audio")]
pub use self::rodio_impl::RodioSound;

#[cfg(feature = "audio")]
mod rodio_impl {
    use std::io::Cursor;
    use std::sync::Arc;

    use log::debug;
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

    use super::ResourceLocator;
    use crate::app::ports::SoundPort;
    use crate::error::PlaybackError;
    use crate::types::Volume;

    /// Plays the decoded cue on the default output device.
    pub struct RodioSound {
        // Dropping the stream closes the device.
        _stream: OutputStream,
        handle: OutputStreamHandle,
        locator: ResourceLocator,
        /// Raw bytes of the resource, read once it has been found.
        cached: Option<Arc<[u8]>>,
        /// Session of the most recent cue.
        current: Option<Sink>,
    }

    impl RodioSound {
        pub fn open(locator: ResourceLocator) -> Result<Self, PlaybackError> {
            let (stream, handle) =
                OutputStream::try_default().map_err(|e| PlaybackError::Device(e.to_string()))?;
            Ok(Self {
                _stream: stream,
                handle,
                locator,
                cached: None,
                current: None,
            })
        }

        fn resource(&mut self) -> Result<Arc<[u8]>, PlaybackError> {
            if let Some(bytes) = &self.cached {
                return Ok(Arc::clone(bytes));
            }
            let bytes: Arc<[u8]> = self.locator.load()?.into();
            debug!("Audio: cached '{}' ({} bytes)", self.locator.name(), bytes.len());
            self.cached = Some(Arc::clone(&bytes));
            Ok(bytes)
        }
    }

    impl SoundPort for RodioSound {
        fn play(&mut self, volume: Volume) -> Result<(), PlaybackError> {
            let bytes = self.resource()?;
            let source =
                Decoder::new(Cursor::new(bytes)).map_err(|e| PlaybackError::Decode(e.to_string()))?;
            let sink = Sink::try_new(&self.handle).map_err(|e| PlaybackError::Device(e.to_string()))?;
            sink.set_volume(volume.level());
            sink.append(source);
            self.current = Some(sink);
            Ok(())
        }

        fn set_live_volume(&mut self, volume: Volume) {
            if let Some(sink) = self.current.as_ref().filter(|s| !s.empty()) {
                sink.set_volume(volume.level());
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Selection
// ───────────────────────────────────────────────────────────────

/// Best available sound output for this build.
pub fn open_default(config: &ReminderConfig) -> Box<dyn SoundPort> {
    let locator = ResourceLocator::from_config(config);

    #[cfg(feature = "audio")]
    {
        match RodioSound::open(locator) {
            Ok(sound) => {
                info!("Sound: decoded audio on default output device");
                return Box::new(sound);
            }
            Err(e) => warn!("Sound: {}, falling back to terminal bell", e),
        }
    }

    #[cfg(not(feature = "audio"))]
    {
        if let Err(e) = locator.locate() {
            warn!("Sound: {} (unused without the `audio` feature)", e);
        }
        info!("Sound: terminal bell");
    }

    Box::new(TerminalBell::stdout())
}

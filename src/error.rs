//! Unified error types for Blink Time.
//!
//! Two families, with opposite propagation rules:
//!
//! - [`ConfigError`] (wrapped in [`Error::InvalidConfiguration`]) is
//!   synchronous and caller-visible.  An operation that returns it has
//!   not changed any state.
//! - [`PlaybackError`] is produced by a [`SoundPort`](crate::app::ports::SoundPort)
//!   on a single tick.  The scheduler logs it and keeps going; it never
//!   reaches the caller of `start`/`stop`.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every caller-visible failure funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A rate, volume or configuration value was rejected.
    InvalidConfiguration(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::InvalidConfiguration(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Blink rate is zero or negative.
    NonPositiveRate(i64),
    /// Blink rate is positive but not one of the supported values.
    UnsupportedRate(i64),
    /// Volume is outside `0.0..=1.0` (or NaN).
    VolumeOutOfRange(f32),
    /// A config field failed validation.
    /// The `&'static str` names the field and the rule.
    ValidationFailed(&'static str),
    /// The config document could not be parsed.
    Malformed(String),
    /// The config file could not be read (missing, permissions).
    Unreadable(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveRate(r) => write!(f, "blink rate must be positive (got {r})"),
            Self::UnsupportedRate(r) => {
                write!(f, "unsupported blink rate {r} (supported: 15, 20 per minute)")
            }
            Self::VolumeOutOfRange(v) => write!(f, "volume {v} outside 0.0..=1.0"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed config: {msg}"),
            Self::Unreadable(msg) => write!(f, "cannot read config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Playback errors
// ---------------------------------------------------------------------------

/// Failure of a single playback attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The sound resource could not be found in any search location.
    ResourceMissing(String),
    /// The resource exists but could not be read.
    Io(String),
    /// The resource could not be decoded as audio.
    Decode(String),
    /// The output device or playback engine failed.
    Device(String),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceMissing(name) => write!(f, "sound resource '{name}' not found"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::Decode(msg) => write!(f, "decode failed: {msg}"),
            Self::Device(msg) => write!(f, "output device: {msg}"),
        }
    }
}

impl std::error::Error for PlaybackError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

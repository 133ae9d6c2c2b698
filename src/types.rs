//! Domain value types: [`BlinkRate`] and [`Volume`].
//!
//! Both are validated on construction, so any value of these types that
//! reaches the scheduler is already legal.

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ═══════════════════════════════════════════════════════════════
//  Blink rate
// ═══════════════════════════════════════════════════════════════

/// Target number of reminder cues per minute.
///
/// Restricted to a closed set.  Serialised as the plain per-minute number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub enum BlinkRate {
    /// 15 cues per minute (one every 4 s).
    #[default]
    Fifteen,
    /// 20 cues per minute (one every 3 s).
    Twenty,
}

impl BlinkRate {
    /// Every supported rate, in picker order.
    pub const ALL: [BlinkRate; 2] = [BlinkRate::Fifteen, BlinkRate::Twenty];

    pub const fn per_minute(self) -> u32 {
        match self {
            Self::Fifteen => 15,
            Self::Twenty => 20,
        }
    }

    /// Tick period: `60 / per_minute` seconds.
    pub fn interval(self) -> Duration {
        Duration::from_secs_f64(60.0 / f64::from(self.per_minute()))
    }

    /// Picker label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fifteen => "15 times per minute",
            Self::Twenty => "20 times per minute",
        }
    }
}

impl TryFrom<i64> for BlinkRate {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            v if v <= 0 => Err(ConfigError::NonPositiveRate(v)),
            15 => Ok(Self::Fifteen),
            20 => Ok(Self::Twenty),
            v => Err(ConfigError::UnsupportedRate(v)),
        }
    }
}

impl TryFrom<u32> for BlinkRate {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<BlinkRate> for u32 {
    fn from(rate: BlinkRate) -> Self {
        rate.per_minute()
    }
}

impl fmt::Display for BlinkRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/min", self.per_minute())
    }
}

// ═══════════════════════════════════════════════════════════════
//  Volume
// ═══════════════════════════════════════════════════════════════

/// Normalised output level in `0.0..=1.0`.
///
/// Out-of-range values are rejected, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Volume(f32);

impl Volume {
    pub const MUTE: Volume = Volume(0.0);
    pub const FULL: Volume = Volume(1.0);

    pub fn new(level: f32) -> Result<Self, ConfigError> {
        // NaN fails the range check.
        if (0.0..=1.0).contains(&level) {
            // In range, `abs` only turns -0.0 into 0.0.
            Ok(Self(level.abs()))
        } else {
            Err(ConfigError::VolumeOutOfRange(level))
        }
    }

    pub const fn level(self) -> f32 {
        self.0
    }

    pub fn is_muted(self) -> bool {
        self.0 == 0.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<f32> for Volume {
    type Error = ConfigError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Volume> for f32 {
    fn from(v: Volume) -> Self {
        v.0
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements | Connects to                         |
//! |------------|------------|-------------------------------------|
//! | `clock`    | ClockPort  | `std::time::Instant`                |
//! | `log_sink` | EventSink  | `log` facade                        |
//! | `sound`    | SoundPort  | rodio output device / terminal bell |
//! | `resource` | (none)     | cue file lookup on disk             |

pub mod clock;
pub mod log_sink;
pub mod resource;
pub mod sound;

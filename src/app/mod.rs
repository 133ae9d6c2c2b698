//! Application core: pure reminder logic, zero I/O.
//!
//! The [`service`] holds the state the user manipulates (selected rate,
//! volume, running flag) and drives the [`scheduler`](crate::scheduler).
//! All interaction with audio, clocks and logs happens through **port
//! traits** defined in [`ports`], keeping this layer testable without
//! an output device.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;

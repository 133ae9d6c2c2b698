//! Blink Time library.
//!
//! Reminds the user to blink by playing a short cue at a fixed rate.
//! Exposes the scheduler, the service around it and the host adapters
//! for integration testing; the binary wires them to a console.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod runtime;
pub mod scheduler;
pub mod triggers;
pub mod types;

//! Blink Time: console entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  stdin thread ── ReminderCommand ──▶ TRIGGERS (TriggerQueue)  │
//! │                                          │                   │
//! │  ──────────────── Runtime loop (main thread) ─────────────── │
//! │                                          ▼                   │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │        ReminderService ─▶ ReminderScheduler            │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │        SoundPort          EventSink          ClockPort        │
//! │   (rodio / bell)       (LogEventSink)    (MonotonicClock)     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use futures_lite::future;
use log::{info, warn};

use blinktime::adapters::clock::MonotonicClock;
use blinktime::adapters::log_sink::LogEventSink;
use blinktime::adapters::sound::open_default;
use blinktime::app::commands::{HELP_TEXT, ReminderCommand};
use blinktime::app::service::{CommandOutcome, ReminderService};
use blinktime::config::ReminderConfig;
use blinktime::runtime;
use blinktime::triggers::TRIGGERS;

fn main() -> Result<()> {
    // ── 1. Configuration ──────────────────────────────────────
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => ReminderConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ReminderConfig::default(),
    };

    // ── 2. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Blink Time v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: rate={} volume={} autostart={} sound='{}'",
        config.blink_rate, config.volume, config.autostart, config.sound_resource
    );

    // ── 3. Adapters ───────────────────────────────────────────
    let mut sound = open_default(&config);
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();
    let mut service = ReminderService::new(&config);

    // ── 4. Console reader ─────────────────────────────────────
    std::thread::Builder::new()
        .name("console".into())
        .spawn(read_console)
        .context("spawning console reader")?;

    println!("{HELP_TEXT}");

    // ── 5. Reminder loop ──────────────────────────────────────
    let summary = runtime::run(&mut service, &mut sound, &mut sink, &clock, &TRIGGERS, |reply| {
        match reply {
            CommandOutcome::Status(status) => println!("{status}"),
            CommandOutcome::Help => println!("{HELP_TEXT}"),
            CommandOutcome::Shutdown => println!("Bye."),
            CommandOutcome::Done => {}
        }
    });

    info!(
        "Exited after {} commands, {} ticks, {} events ({}s)",
        summary.commands,
        summary.ticks,
        sink.emitted(),
        clock.uptime_secs()
    );
    Ok(())
}

/// Forward stdin lines to the trigger queue until EOF or `quit`.
///
/// Waits for room when the queue is full, so no typed command (and in
/// particular no `quit`) is ever dropped.
fn read_console() {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!("Console: read failed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match ReminderCommand::parse(&line) {
            Some(cmd) => {
                future::block_on(TRIGGERS.send(cmd));
                if cmd == ReminderCommand::Shutdown {
                    return;
                }
            }
            None => println!("Unknown command '{}', type `help`.", line.trim()),
        }
    }
    future::block_on(TRIGGERS.send(ReminderCommand::Shutdown));
}

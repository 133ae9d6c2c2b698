//! Inbound commands to the reminder service.
//!
//! These represent actions requested by the outside world (console,
//! named triggers from other threads) that the
//! [`ReminderService`](super::service::ReminderService) interprets.

/// Named trigger that begins reminders without going through the console.
pub const BEGIN_REMINDERS: &str = "begin-reminders";

/// Named trigger that ends reminders.
pub const END_REMINDERS: &str = "end-reminders";

/// Explanation shown by the `help` command.
pub const HELP_TEXT: &str = "\
App Functionality
  • Adjust Blink Rate: choose 15 or 20 blinks per minute before starting (`rate 15`, `rate 20`).
  • Start/Stop Blinking: start or stop the blink reminder (`start`, `stop`, `toggle`).
  • Volume Control: adjust the reminder sound from 0.0 to 1.0 (`volume 0.5`).
  • `status` shows the current state, `quit` exits.
  • `begin-reminders` / `end-reminders` are the named triggers other tools can send.";

/// Commands that external adapters can send into the reminder core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReminderCommand {
    /// Start reminders with the selected rate (restarts if running).
    Begin,

    /// Stop reminders.
    End,

    /// Start when idle, stop when running.
    Toggle,

    /// Select the rate used by the next start.  Unvalidated per-minute value.
    SelectRate(i64),

    /// Change the output volume.  Unvalidated level.
    SetVolume(f32),

    /// Report the current status.
    Status,

    /// Show the explanation text.
    Help,

    /// Stop reminders and leave the runtime loop.
    Shutdown,
}

impl ReminderCommand {
    /// Map a named trigger to its command.
    pub fn from_trigger(name: &str) -> Option<Self> {
        match name {
            BEGIN_REMINDERS => Some(Self::Begin),
            END_REMINDERS => Some(Self::End),
            _ => None,
        }
    }

    /// Parse one console line.
    ///
    /// Returns `None` for blank or unrecognised input.  Numeric arguments
    /// are only parsed here; range checks happen in the service so the
    /// caller gets a proper `InvalidConfiguration` error.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next()?.to_ascii_lowercase();
        let arg = words.next();
        if words.next().is_some() {
            return None;
        }

        match (verb.as_str(), arg) {
            ("start" | "begin", None) => Some(Self::Begin),
            ("stop" | "end", None) => Some(Self::End),
            ("toggle", None) => Some(Self::Toggle),
            ("rate", Some(n)) => n.parse().ok().map(Self::SelectRate),
            ("volume" | "vol", Some(v)) => v.parse().ok().map(Self::SetVolume),
            ("status", None) => Some(Self::Status),
            ("help" | "?", None) => Some(Self::Help),
            ("quit" | "exit", None) => Some(Self::Shutdown),
            (name, None) => Self::from_trigger(name),
            _ => None,
        }
    }
}

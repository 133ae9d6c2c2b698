//! Trigger queue: commands from any thread into the reminder loop.
//!
//! Commands are produced by:
//! - the console reader thread (one command per input line)
//! - named triggers (`begin-reminders`, `end-reminders`) fired by other code
//!
//! and consumed by the runtime loop, one at a time, in FIFO order.
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Console thread   │────▶│              │     │              │
//! │ Named triggers   │────▶│ TriggerQueue │────▶│ Runtime loop │
//! │ Tests            │────▶│ (bounded)    │     │  (consumer)  │
//! └──────────────────┘     └──────────────┘     └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use crate::app::commands::ReminderCommand;

/// Maximum number of pending commands.
const TRIGGER_DEPTH: usize = 8;

/// Bounded multi-producer command channel.
pub struct TriggerQueue {
    channel: Channel<CriticalSectionRawMutex, ReminderCommand, TRIGGER_DEPTH>,
}

impl Default for TriggerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Queue a command without blocking.
    /// Returns `false` if the queue is full (command dropped).
    pub fn push(&self, cmd: ReminderCommand) -> bool {
        if self.channel.try_send(cmd).is_err() {
            warn!("Triggers: queue full, dropping {:?}", cmd);
            return false;
        }
        true
    }

    /// Queue a command, waiting for room if the queue is full.
    /// Used by producers that must not lose a command (console, shutdown).
    pub async fn send(&self, cmd: ReminderCommand) {
        self.channel.send(cmd).await;
    }

    /// Fire a named trigger.  Returns `false` for unknown names or a full queue.
    pub fn fire(&self, name: &str) -> bool {
        match ReminderCommand::from_trigger(name) {
            Some(cmd) => self.push(cmd),
            None => {
                warn!("Triggers: unknown trigger '{}'", name);
                false
            }
        }
    }

    /// Pop the next command, if any.
    pub fn try_pop(&self) -> Option<ReminderCommand> {
        self.channel.try_receive().ok()
    }

    /// Wait for the next command.
    pub async fn next(&self) -> ReminderCommand {
        self.channel.receive().await
    }

    /// Drain all pending commands into a callback, in FIFO order.
    pub fn drain(&self, mut handler: impl FnMut(ReminderCommand)) {
        while let Some(cmd) = self.try_pop() {
            handler(cmd);
        }
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

/// Process-wide queue served by the binary's runtime loop.
pub static TRIGGERS: TriggerQueue = TriggerQueue::new();

/// Named trigger: begin reminders.
pub fn begin_reminders() -> bool {
    TRIGGERS.push(ReminderCommand::Begin)
}

/// Named trigger: end reminders.
pub fn end_reminders() -> bool {
    TRIGGERS.push(ReminderCommand::End)
}

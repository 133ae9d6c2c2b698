//! Service-level behaviour: validation, volume and named triggers.

use std::time::Duration;

use blinktime::app::commands::{ReminderCommand, BEGIN_REMINDERS, END_REMINDERS};
use blinktime::app::events::ReminderEvent;
use blinktime::app::ports::ClockPort;
use blinktime::app::service::{CommandOutcome, ReminderService};
use blinktime::config::ReminderConfig;
use blinktime::error::{ConfigError, Error};
use blinktime::scheduler::SchedulerState;
use blinktime::triggers::TriggerQueue;
use blinktime::types::{BlinkRate, Volume};

use super::mock_ports::{run_for, RecordingSink, RecordingSound, SimClock};

fn make_service() -> (ReminderService, SimClock, RecordingSound, RecordingSink) {
    (
        ReminderService::new(&ReminderConfig::default()),
        SimClock::new(),
        RecordingSound::new(),
        RecordingSink::new(),
    )
}

// ── Rate validation ───────────────────────────────────────────

#[test]
fn zero_rate_is_rejected_and_nothing_runs() {
    let (mut svc, clock, mut sound, mut sink) = make_service();

    let err = svc.start_with(0, clock.now(), &mut sink).unwrap_err();
    assert_eq!(err, Error::InvalidConfiguration(ConfigError::NonPositiveRate(0)));
    assert_eq!(svc.state(), SchedulerState::Idle);

    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_secs(10));
    assert!(sound.played.is_empty());
    assert!(sink.events.is_empty());
}

#[test]
fn unsupported_rate_keeps_previous_selection() {
    let (mut svc, clock, _, mut sink) = make_service();
    svc.select_rate(20, &mut sink).unwrap();

    let err = svc.start_with(17, clock.now(), &mut sink).unwrap_err();
    assert_eq!(err, Error::InvalidConfiguration(ConfigError::UnsupportedRate(17)));
    assert_eq!(svc.selected_rate(), BlinkRate::Twenty);
    assert_eq!(svc.state(), SchedulerState::Idle);
}

#[test]
fn rejected_start_does_not_disturb_active_run() {
    let (mut svc, clock, mut sound, mut sink) = make_service();
    let run = svc.start_with(20, clock.now(), &mut sink).unwrap();
    assert!(svc.start_with(-4, clock.now(), &mut sink).is_err());

    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_secs(6));
    assert_eq!(svc.scheduler().run_id(), Some(run));
    assert_eq!(sound.played.len(), 2);
}

// ── Volume ────────────────────────────────────────────────────

#[test]
fn ticks_play_at_latest_volume() {
    let (mut svc, clock, mut sound, mut sink) = make_service();
    svc.start_with(20, clock.now(), &mut sink).unwrap();

    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_secs(3));
    svc.set_volume(0.25, &mut sound, &mut sink).unwrap();
    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_secs(3));

    assert_eq!(sound.played, vec![1.0, 0.25]);
    assert_eq!(sound.live, vec![0.25]);
}

#[test]
fn out_of_range_volume_is_rejected_and_unchanged() {
    let (mut svc, clock, mut sound, mut sink) = make_service();
    svc.set_volume(0.4, &mut sound, &mut sink).unwrap();

    for bad in [-0.1, 1.5, f32::NAN] {
        let err = svc.set_volume(bad, &mut sound, &mut sink).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration(ConfigError::VolumeOutOfRange(_))
        ));
    }
    assert_eq!(svc.volume(), Volume::new(0.4).unwrap());

    svc.start_with(15, clock.now(), &mut sink).unwrap();
    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_secs(4));
    assert_eq!(sound.played, vec![0.4]);
}

#[test]
fn muted_ticks_still_fire() {
    let (mut svc, clock, mut sound, mut sink) = make_service();
    svc.set_volume(0.0, &mut sound, &mut sink).unwrap();
    svc.start_with(20, clock.now(), &mut sink).unwrap();

    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_secs(6));
    assert_eq!(sound.played, vec![0.0, 0.0]);
}

// ── Named triggers ────────────────────────────────────────────

#[test]
fn named_triggers_map_to_start_and_stop() {
    let (mut svc, clock, mut sound, mut sink) = make_service();
    let queue = TriggerQueue::new();

    assert!(queue.fire(BEGIN_REMINDERS));
    while let Some(cmd) = queue.try_pop() {
        svc.handle_command(cmd, clock.now(), &mut sound, &mut sink).unwrap();
    }
    assert_eq!(svc.state(), SchedulerState::Running);

    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_secs(8));
    assert_eq!(sound.played.len(), 2);

    assert!(queue.fire(END_REMINDERS));
    while let Some(cmd) = queue.try_pop() {
        svc.handle_command(cmd, clock.now(), &mut sound, &mut sink).unwrap();
    }
    assert_eq!(svc.state(), SchedulerState::Idle);
    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_secs(8));
    assert_eq!(sound.played.len(), 2);
}

#[test]
fn unknown_trigger_is_ignored() {
    let queue = TriggerQueue::new();
    assert!(!queue.fire("open-pod-bay-doors"));
    assert!(queue.is_empty());
}

#[test]
fn console_commands_drive_the_service() {
    let (mut svc, clock, mut sound, mut sink) = make_service();

    for line in ["rate 20", "start", "volume 0.5"] {
        let cmd = ReminderCommand::parse(line).unwrap();
        assert_eq!(
            svc.handle_command(cmd, clock.now(), &mut sound, &mut sink).unwrap(),
            CommandOutcome::Done
        );
    }
    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_secs(3));

    let status = ReminderCommand::parse("status").unwrap();
    match svc.handle_command(status, clock.now(), &mut sound, &mut sink).unwrap() {
        CommandOutcome::Status(s) => {
            assert_eq!(s.active_rate, Some(BlinkRate::Twenty));
            assert_eq!(s.ticks, 1);
            assert_eq!(s.volume, Volume::new(0.5).unwrap());
        }
        other => panic!("expected status, got {other:?}"),
    }
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, ReminderEvent::RateSelected(BlinkRate::Twenty))));
}

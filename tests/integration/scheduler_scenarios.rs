//! End-to-end cadence scenarios: service + scheduler driven by a
//! simulated clock in 50 ms steps.

use std::time::Duration;

use blinktime::app::events::ReminderEvent;
use blinktime::app::ports::ClockPort;
use blinktime::app::service::ReminderService;
use blinktime::config::ReminderConfig;
use blinktime::scheduler::SchedulerState;

use super::mock_ports::{gaps, run_for, RecordingSink, RecordingSound, SimClock};

fn make_service() -> (ReminderService, SimClock, RecordingSound, RecordingSink) {
    (
        ReminderService::new(&ReminderConfig::default()),
        SimClock::new(),
        RecordingSound::new(),
        RecordingSink::new(),
    )
}

fn assert_spacing(times: &[f64], expected: f64) {
    for gap in gaps(times) {
        assert!(
            (gap - expected).abs() < 1e-9,
            "gap {gap} != {expected} in {times:?}"
        );
    }
}

// ── Fixed cadence ─────────────────────────────────────────────

#[test]
fn fifteen_per_minute_ticks_every_four_seconds() {
    let (mut svc, clock, mut sound, mut sink) = make_service();
    svc.start_with(15, clock.now(), &mut sink).unwrap();

    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_secs(60));

    let times = sink.tick_times();
    assert_eq!(times.len(), 15);
    assert!((times[0] - 4.0).abs() < 1e-9);
    assert_spacing(&times, 4.0);
    assert_eq!(sound.played.len(), 15);
}

#[test]
fn twenty_per_minute_ticks_every_three_seconds() {
    let (mut svc, clock, mut sound, mut sink) = make_service();
    svc.start_with(20, clock.now(), &mut sink).unwrap();

    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_secs(60));

    let times = sink.tick_times();
    assert_eq!(times.len(), 20);
    assert_spacing(&times, 3.0);
}

// ── Restart / stop ────────────────────────────────────────────

#[test]
fn restart_at_new_rate_leaves_no_old_cadence() {
    let (mut svc, clock, mut sound, mut sink) = make_service();
    svc.start_with(15, clock.now(), &mut sink).unwrap();
    let second = svc.start_with(20, clock.now(), &mut sink).unwrap();

    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_secs(30));

    let ticks = sink.ticks();
    assert_eq!(ticks.len(), 10);
    assert!(ticks.iter().all(|(run, _)| *run == second));
    assert_spacing(&sink.tick_times(), 3.0);
}

#[test]
fn restart_mid_interval_resets_phase() {
    let (mut svc, clock, mut sound, mut sink) = make_service();
    svc.start_with(15, clock.now(), &mut sink).unwrap();
    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_millis(5_000));
    assert_eq!(sink.tick_times(), vec![4.0]);

    // Restart at t=5; next tick at 5 + 3, not at 8 from the old phase.
    svc.start_with(20, clock.now(), &mut sink).unwrap();
    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_millis(6_000));

    let times = sink.tick_times();
    assert_eq!(times.len(), 3);
    assert!((times[1] - 8.0).abs() < 1e-9);
    assert!((times[2] - 11.0).abs() < 1e-9);
}

#[test]
fn stop_produces_no_further_ticks() {
    let (mut svc, clock, mut sound, mut sink) = make_service();
    svc.start_with(20, clock.now(), &mut sink).unwrap();
    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_millis(3_500));
    assert_eq!(sound.played.len(), 1);

    assert!(svc.stop(&mut sink));
    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_secs(10));

    assert_eq!(sound.played.len(), 1);
    assert_eq!(svc.state(), SchedulerState::Idle);
    assert_eq!(svc.next_deadline(), None);
}

#[test]
fn rapid_start_stop_start_yields_single_run() {
    let (mut svc, clock, mut sound, mut sink) = make_service();
    svc.start_with(15, clock.now(), &mut sink).unwrap();
    svc.stop(&mut sink);
    svc.start_with(15, clock.now(), &mut sink).unwrap();
    svc.stop(&mut sink);
    let last = svc.start_with(20, clock.now(), &mut sink).unwrap();

    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_secs(9));

    let ticks = sink.ticks();
    assert_eq!(ticks.len(), 3);
    assert!(ticks.iter().all(|(run, _)| *run == last));
}

// ── Failures and late delivery ────────────────────────────────

#[test]
fn playback_failures_keep_the_cadence() {
    let (mut svc, clock, _, mut sink) = make_service();
    let mut sound = RecordingSound::failing_on([1, 3]);
    svc.start_with(20, clock.now(), &mut sink).unwrap();

    run_for(&mut svc, &clock, &mut sound, &mut sink, Duration::from_secs(15));

    assert_eq!(sound.played.len(), 5);
    assert_eq!(sink.playback_failures(), 2);
    assert_spacing(&sink.tick_times(), 3.0);
    assert_eq!(svc.state(), SchedulerState::Running);
}

#[test]
fn stalled_loop_fires_once_and_reports_skips() {
    let (mut svc, clock, mut sound, mut sink) = make_service();
    svc.start_with(20, clock.now(), &mut sink).unwrap();

    // No polls for 10 s: ticks at 3, 6, 9 were due.
    clock.advance(Duration::from_secs(10));
    assert!(svc.poll(clock.now(), &mut sound, &mut sink));
    assert!(!svc.poll(clock.now(), &mut sound, &mut sink));

    assert_eq!(sound.played.len(), 1);
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, ReminderEvent::IntervalsSkipped { skipped: 2, .. })));
    assert_eq!(svc.next_deadline(), Some(Duration::from_secs(12)));
}

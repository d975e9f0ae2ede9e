use std::time::{Duration, Instant};

use homing_shooter::config::Tuning;
use homing_shooter::entities::Phase;
use homing_shooter::scheduler::*;

const MS: Duration = Duration::from_millis(1);

// ── Interval ──────────────────────────────────────────────────────────────────

#[test]
fn unarmed_interval_never_fires() {
    let t0 = Instant::now();
    let mut iv = Interval::new(30 * MS);
    assert!(!iv.is_armed());
    assert!(!iv.poll(t0 + 1000 * MS));
    assert_eq!(iv.deadline(), None);
}

#[test]
fn armed_interval_fires_once_per_period() {
    let t0 = Instant::now();
    let mut iv = Interval::new(30 * MS);
    iv.arm(t0);
    assert!(!iv.poll(t0 + 29 * MS));
    assert!(iv.poll(t0 + 30 * MS));
    assert!(!iv.poll(t0 + 31 * MS));
    assert!(iv.poll(t0 + 60 * MS));
    assert_eq!(iv.deadline(), Some(t0 + 90 * MS));
}

#[test]
fn late_poll_skips_missed_periods() {
    let t0 = Instant::now();
    let mut iv = Interval::new(30 * MS);
    iv.arm(t0);
    // three periods late: one firing, then back on a fresh schedule
    assert!(iv.poll(t0 + 100 * MS));
    assert!(!iv.poll(t0 + 101 * MS));
    assert_eq!(iv.deadline(), Some(t0 + 130 * MS));
}

#[test]
fn rearming_keeps_schedule() {
    let t0 = Instant::now();
    let mut iv = Interval::new(30 * MS);
    iv.arm(t0);
    iv.arm(t0 + 20 * MS);
    assert_eq!(iv.deadline(), Some(t0 + 30 * MS));
}

#[test]
fn cancelled_interval_stops_firing() {
    let t0 = Instant::now();
    let mut iv = Interval::new(30 * MS);
    iv.arm(t0);
    iv.cancel();
    assert!(!iv.poll(t0 + 30 * MS));
    assert!(!iv.is_armed());
}

// ── Timers ────────────────────────────────────────────────────────────────────

#[test]
fn timers_follow_tuning() {
    let timers = Timers::new(&Tuning::default());
    assert_eq!(timers.tick.period(), 30 * MS);
    assert_eq!(timers.spawn.period(), 200 * MS);
}

#[test]
fn timers_armed_only_while_running() {
    let t0 = Instant::now();
    let mut timers = Timers::new(&Tuning::default());

    timers.sync(Phase::NotStarted, t0);
    assert!(!timers.tick.is_armed() && !timers.spawn.is_armed());
    assert_eq!(timers.next_deadline(), None);

    timers.sync(Phase::Running, t0);
    assert!(timers.tick.is_armed() && timers.spawn.is_armed());
    assert_eq!(timers.next_deadline(), Some(t0 + 30 * MS));

    for phase in [Phase::GameOver, Phase::Won] {
        timers.sync(Phase::Running, t0);
        timers.sync(phase, t0 + 10 * MS);
        assert!(!timers.tick.poll(t0 + 500 * MS), "tick fired after {phase:?}");
        assert!(!timers.spawn.poll(t0 + 500 * MS), "spawn fired after {phase:?}");
    }
}

#[test]
fn spawn_and_tick_run_independently() {
    let t0 = Instant::now();
    let mut timers = Timers::new(&Tuning::default());
    timers.sync(Phase::Running, t0);

    let mut ticks = 0;
    let mut spawns = 0;
    for ms in 1..=600 {
        let now = t0 + ms * MS;
        if timers.tick.poll(now) {
            ticks += 1;
        }
        if timers.spawn.poll(now) {
            spawns += 1;
        }
    }
    assert_eq!(ticks, 20);
    assert_eq!(spawns, 3);
}

#[test]
fn cancel_clears_both() {
    let t0 = Instant::now();
    let mut timers = Timers::new(&Tuning::default());
    timers.sync(Phase::Running, t0);
    timers.cancel();
    assert_eq!(timers.next_deadline(), None);
}

//! Unit tests for evac-schedule.

use evac_core::SimTime;

use crate::{EventKey, EventScheduler, RunStop, ScheduleError};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn t(x: f64) -> SimTime {
    SimTime::from_f64(x)
}

/// Drain the scheduler, collecting `(time, event)` pairs in firing order.
fn drain<E>(s: &mut EventScheduler<E>) -> Vec<(f64, E)> {
    let mut out = Vec::new();
    while let Some((time, e)) = s.pop() {
        out.push((time.as_f64(), e));
    }
    out
}

// ── Ordering ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ordering {
    use super::*;

    #[test]
    fn fires_in_time_order() {
        let mut s = EventScheduler::new();
        s.schedule_at(3.0, "c").unwrap();
        s.schedule_at(1.0, "a").unwrap();
        s.schedule_at(2.0, "b").unwrap();
        assert_eq!(drain(&mut s), vec![(1.0, "a"), (2.0, "b"), (3.0, "c")]);
    }

    #[test]
    fn equal_times_fire_in_insertion_order() {
        let mut s = EventScheduler::new();
        for i in 0..5 {
            s.schedule_at(1.0, i).unwrap();
        }
        s.schedule_at(0.5, 99).unwrap();
        let order: Vec<i32> = drain(&mut s).into_iter().map(|(_, e)| e).collect();
        assert_eq!(order, vec![99, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn pop_advances_clock() {
        let mut s = EventScheduler::new();
        assert_eq!(s.now(), SimTime::ZERO);
        s.schedule_at(2.5, ()).unwrap();
        s.pop();
        assert_eq!(s.now(), t(2.5));
        // Empty pop leaves the clock alone.
        assert!(s.pop().is_none());
        assert_eq!(s.now(), t(2.5));
    }

    #[test]
    fn schedule_after_is_relative_to_now() {
        let mut s = EventScheduler::new();
        s.schedule_at(4.0, "first").unwrap();
        s.pop();
        let key = s.schedule_after(1.5, "second").unwrap();
        assert_eq!(key.time, t(5.5));
        assert_eq!(s.peek_time(), Some(t(5.5)));
    }

    #[test]
    fn zero_offset_fires_after_already_pending_same_time_events() {
        let mut s = EventScheduler::new();
        s.schedule_at(1.0, "tick").unwrap();
        s.schedule_at(1.0, "pending").unwrap();
        s.pop(); // "tick" at t=1
        s.schedule_after(0.0, "woken").unwrap();
        let order: Vec<&str> = drain(&mut s).into_iter().map(|(_, e)| e).collect();
        assert_eq!(order, vec!["pending", "woken"]);
    }

    #[test]
    fn keys_are_unique_and_increasing() {
        let mut s = EventScheduler::new();
        let a = s.schedule_at(1.0, ()).unwrap();
        let b = s.schedule_at(1.0, ()).unwrap();
        assert!(a < b);
        assert_ne!(a.seq, b.seq);
    }

    #[test]
    fn keys_sort_by_time_then_seq() {
        let mut s = EventScheduler::new();
        let late = s.schedule_at(2.0, ()).unwrap();
        let early = s.schedule_at(1.0, ()).unwrap();
        let tie = s.schedule_at(1.0, ()).unwrap();
        let ordered: std::collections::BTreeSet<EventKey> = [late, tie, early].into_iter().collect();
        assert_eq!(ordered.into_iter().collect::<Vec<_>>(), vec![early, tie, late]);
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use super::*;

    #[test]
    fn rejects_past_times() {
        let mut s = EventScheduler::new();
        s.schedule_at(2.0, ()).unwrap();
        s.pop();
        let err = s.schedule_at(1.0, ()).unwrap_err();
        assert!(matches!(err, ScheduleError::InPast { .. }));
        // Exactly now is fine.
        assert!(s.schedule_at(2.0, ()).is_ok());
    }

    #[test]
    fn rejects_negative_offsets() {
        let mut s: EventScheduler<()> = EventScheduler::new();
        assert!(matches!(s.schedule_after(-0.1, ()), Err(ScheduleError::NegativeOffset(_))));
    }

    #[test]
    fn rejects_non_finite() {
        let mut s: EventScheduler<()> = EventScheduler::new();
        assert!(matches!(s.schedule_at(f64::NAN, ()), Err(ScheduleError::InvalidTime(_))));
        assert!(matches!(s.schedule_at(f64::INFINITY, ()), Err(ScheduleError::InvalidTime(_))));
        assert!(matches!(s.schedule_after(f64::NAN, ()), Err(ScheduleError::InvalidTime(_))));
        assert!(s.is_empty());
    }
}

// ── Run loops ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use super::*;

    /// A countdown event that reschedules itself until it reaches zero.
    #[derive(Debug, PartialEq)]
    struct Countdown(u32);

    #[test]
    fn run_sees_events_scheduled_by_handlers() {
        let mut s = EventScheduler::new();
        s.schedule_at(0.0, Countdown(3)).unwrap();
        let mut seen = Vec::new();
        let fired = s
            .run(|sched, time, Countdown(n)| {
                seen.push((time.as_f64(), n));
                if n > 0 {
                    sched.schedule_after(1.0, Countdown(n - 1))?;
                }
                Ok::<_, ScheduleError>(())
            })
            .unwrap();
        assert_eq!(fired, 4);
        assert_eq!(seen, vec![(0.0, 3), (1.0, 2), (2.0, 1), (3.0, 0)]);
        assert!(s.is_empty());
        assert_eq!(s.executed(), 4);
    }

    #[test]
    fn run_stops_on_handler_error() {
        let mut s = EventScheduler::new();
        s.schedule_at(1.0, 1).unwrap();
        s.schedule_at(2.0, 2).unwrap();
        s.schedule_at(3.0, 3).unwrap();
        let result = s.run(|_, _, e| if e == 2 { Err("boom") } else { Ok(()) });
        assert_eq!(result, Err("boom"));
        assert_eq!(s.len(), 1, "event 3 is still pending");
    }

    #[test]
    fn run_limited_reports_limit() {
        let mut s = EventScheduler::new();
        s.schedule_at(0.0, ()).unwrap();
        // A self-perpetuating event never drains on its own.
        let stop = s
            .run_limited(10, |sched, _, ()| sched.schedule_after(1.0, ()).map(|_| ()))
            .unwrap();
        assert_eq!(stop, RunStop::Limit);
        assert_eq!(s.executed(), 10);
        assert_eq!(s.now(), t(9.0));
    }

    #[test]
    fn run_limited_reports_idle() {
        let mut s = EventScheduler::new();
        s.schedule_at(0.0, ()).unwrap();
        s.schedule_at(1.0, ()).unwrap();
        let stop = s.run_limited(10, |_, _, ()| Ok::<_, ()>(())).unwrap();
        assert_eq!(stop, RunStop::Idle);

        // Budget exactly consumed with nothing left also counts as idle.
        s.schedule_at(2.0, ()).unwrap();
        let stop = s.run_limited(1, |_, _, ()| Ok::<_, ()>(())).unwrap();
        assert_eq!(stop, RunStop::Idle);
    }

    #[test]
    fn run_until_leaves_later_events() {
        let mut s = EventScheduler::new();
        for x in [0.5, 1.0, 1.5, 2.0] {
            s.schedule_at(x, x).unwrap();
        }
        let mut seen = Vec::new();
        let fired = s
            .run_until(t(1.5), |_, _, e| {
                seen.push(e);
                Ok::<_, ()>(())
            })
            .unwrap();
        assert_eq!(fired, 3);
        assert_eq!(seen, vec![0.5, 1.0, 1.5]);
        assert_eq!(s.peek_time(), Some(t(2.0)));
        assert_eq!(s.now(), t(1.5));
    }

    #[test]
    fn clock_is_monotone_over_a_run() {
        let mut s = EventScheduler::new();
        for (i, x) in [5.0, 0.0, 2.0, 2.0, 9.0, 1.0].into_iter().enumerate() {
            s.schedule_at(x, i).unwrap();
        }
        let mut last = SimTime::ZERO;
        s.run(|sched, time, _| {
            assert!(time >= last);
            assert_eq!(sched.now(), time);
            last = time;
            Ok::<_, ()>(())
        })
        .unwrap();
    }
}

//! `EventScheduler`: the time-ordered pending-event calendar.
//!
//! # Why a `BTreeMap`
//!
//! Entries are keyed by `(time, seq)`.  Because `seq` is a strictly
//! increasing insertion counter, keys are unique and the map's natural order
//! *is* the firing order, including the FIFO tie-break for equal timestamps.
//! `pop_first` is `O(log P)` for `P` pending events; an evacuation run keeps
//! at most one pending movement event per agent plus the periodic drain, so
//! `P ≤ agents + 1`.
//!
//! There is no cancellation.  Handlers that no longer care about an event
//! (the agent resolved in the meantime) simply ignore it when it fires.

use std::collections::BTreeMap;

use evac_core::SimTime;

use crate::{ScheduleError, ScheduleResult};

/// Unique firing-order key of a scheduled event.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct EventKey {
    pub time: SimTime,
    /// Insertion sequence number; breaks ties between equal `time`s.
    pub seq: u64,
}

/// Why [`EventScheduler::run_limited`] returned.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RunStop {
    /// No events remain.
    Idle,
    /// The event budget was used up with events still pending.
    Limit,
}

/// A calendar of pending events of type `E` plus the simulation clock.
pub struct EventScheduler<E> {
    queue:    BTreeMap<EventKey, E>,
    now:      SimTime,
    next_seq: u64,
    executed: u64,
}

impl<E> Default for EventScheduler<E> {
    fn default() -> Self {
        Self {
            queue:    BTreeMap::new(),
            now:      SimTime::ZERO,
            next_seq: 0,
            executed: 0,
        }
    }
}

impl<E> EventScheduler<E> {
    /// An empty scheduler with the clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Scheduling ────────────────────────────────────────────────────────

    /// Schedule `event` at absolute time `at`.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::InvalidTime`] if `at` is not finite;
    /// [`ScheduleError::InPast`] if `at` is earlier than [`now`](Self::now).
    pub fn schedule_at(&mut self, at: f64, event: E) -> ScheduleResult<EventKey> {
        if !at.is_finite() {
            return Err(ScheduleError::InvalidTime(at));
        }
        let time = SimTime::from_f64(at);
        if time < self.now {
            return Err(ScheduleError::InPast { at: time, now: self.now });
        }
        let key = EventKey { time, seq: self.next_seq };
        self.next_seq += 1;
        self.queue.insert(key, event);
        Ok(key)
    }

    /// Schedule `event` at `now + offset`.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::NegativeOffset`] for `offset < 0`;
    /// [`ScheduleError::InvalidTime`] if `offset` or the sum is not finite.
    pub fn schedule_after(&mut self, offset: f64, event: E) -> ScheduleResult<EventKey> {
        if !offset.is_finite() {
            return Err(ScheduleError::InvalidTime(offset));
        }
        if offset < 0.0 {
            return Err(ScheduleError::NegativeOffset(offset));
        }
        self.schedule_at(self.now.as_f64() + offset, event)
    }

    // ── Firing ────────────────────────────────────────────────────────────

    /// Remove the earliest event, advance the clock to its time, and return
    /// it.  Returns `None` when nothing is pending (the clock is unchanged).
    pub fn pop(&mut self) -> Option<(SimTime, E)> {
        let (key, event) = self.queue.pop_first()?;
        debug_assert!(key.time >= self.now, "clock must never run backward");
        self.now = key.time;
        self.executed += 1;
        Some((key.time, event))
    }

    /// Fire events until none remain.
    ///
    /// `handler` receives the scheduler itself, so it can schedule follow-up
    /// events, plus the firing time and the event.  The first handler error
    /// stops the run and is returned.  Returns the number of events fired.
    pub fn run<F, Err>(&mut self, mut handler: F) -> Result<u64, Err>
    where
        F: FnMut(&mut Self, SimTime, E) -> Result<(), Err>,
    {
        let mut fired = 0;
        while let Some((time, event)) = self.pop() {
            handler(self, time, event)?;
            fired += 1;
        }
        Ok(fired)
    }

    /// Like [`run`](Self::run) but fires at most `max_events` events.
    pub fn run_limited<F, Err>(&mut self, max_events: u64, mut handler: F) -> Result<RunStop, Err>
    where
        F: FnMut(&mut Self, SimTime, E) -> Result<(), Err>,
    {
        let mut fired = 0;
        while fired < max_events {
            let Some((time, event)) = self.pop() else {
                return Ok(RunStop::Idle);
            };
            handler(self, time, event)?;
            fired += 1;
        }
        Ok(if self.is_empty() { RunStop::Idle } else { RunStop::Limit })
    }

    /// Fire every event whose time is `<= limit`, leaving later events
    /// pending.  Returns the number of events fired.
    pub fn run_until<F, Err>(&mut self, limit: SimTime, mut handler: F) -> Result<u64, Err>
    where
        F: FnMut(&mut Self, SimTime, E) -> Result<(), Err>,
    {
        let mut fired = 0;
        while self.peek_time().is_some_and(|t| t <= limit) {
            let Some((time, event)) = self.pop() else { break };
            handler(self, time, event)?;
            fired += 1;
        }
        Ok(fired)
    }

    // ── Inspection ────────────────────────────────────────────────────────

    /// Current simulated time: the time of the most recently popped event.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Time of the next pending event, or `None` if empty.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.queue.keys().next().map(|k| k.time)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total events popped over the scheduler's lifetime.
    pub fn executed(&self) -> u64 {
        self.executed
    }
}

//! Observer hooks for progress reporting, output and animation.

use evac_agent::{AgentState, Person};
use evac_core::{AgentId, CellId, SimTime};
use evac_floor::FloorGraph;

use crate::EvacReport;

/// One reported change to an agent: it moved to a new cell, changed state,
/// or both.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub time:  SimTime,
    pub agent: AgentId,
    /// The agent's cell after the change.
    pub cell:  CellId,
    pub state: AgentState,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers cannot fail the run; one
/// that can hit I/O errors should hold on to the first error and expose it
/// after the run.
///
/// # Example: safe-exit counter
///
/// ```rust
/// use evac_agent::AgentState;
/// use evac_sim::{SimObserver, Transition};
///
/// #[derive(Default)]
/// struct ExitCounter(usize);
///
/// impl SimObserver for ExitCounter {
///     fn on_transition(&mut self, t: &Transition) {
///         if t.state == AgentState::Safe {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first event, with the initial population.
    fn on_sim_start(&mut self, _floor: &FloorGraph, _people: &[Person]) {}

    /// Called for every agent move or state change, in event order.
    fn on_transition(&mut self, _transition: &Transition) {}

    /// Called after each bottleneck drain with the number of agents released.
    fn on_drain_tick(&mut self, _now: SimTime, _drained: usize) {}

    /// Called at t = 0 and after each drain tick with the full agent state.
    fn on_snapshot(&mut self, _now: SimTime, _floor: &FloorGraph, _people: &[Person]) {}

    /// Called once after the loop stops.
    fn on_sim_end(&mut self, _report: &EvacReport) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_sim_start(&mut self, floor: &FloorGraph, people: &[Person]) {
        (**self).on_sim_start(floor, people);
    }

    fn on_transition(&mut self, transition: &Transition) {
        (**self).on_transition(transition);
    }

    fn on_drain_tick(&mut self, now: SimTime, drained: usize) {
        (**self).on_drain_tick(now, drained);
    }

    fn on_snapshot(&mut self, now: SimTime, floor: &FloorGraph, people: &[Person]) {
        (**self).on_snapshot(now, floor, people);
    }

    fn on_sim_end(&mut self, report: &EvacReport) {
        (**self).on_sim_end(report);
    }
}

/// An absent observer does nothing.
impl<O: SimObserver> SimObserver for Option<O> {
    fn on_sim_start(&mut self, floor: &FloorGraph, people: &[Person]) {
        if let Some(o) = self {
            o.on_sim_start(floor, people);
        }
    }

    fn on_transition(&mut self, transition: &Transition) {
        if let Some(o) = self {
            o.on_transition(transition);
        }
    }

    fn on_drain_tick(&mut self, now: SimTime, drained: usize) {
        if let Some(o) = self {
            o.on_drain_tick(now, drained);
        }
    }

    fn on_snapshot(&mut self, now: SimTime, floor: &FloorGraph, people: &[Person]) {
        if let Some(o) = self {
            o.on_snapshot(now, floor, people);
        }
    }

    fn on_sim_end(&mut self, report: &EvacReport) {
        if let Some(o) = self {
            o.on_sim_end(report);
        }
    }
}

/// Fan every callback out to two observers, left first.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_sim_start(&mut self, floor: &FloorGraph, people: &[Person]) {
        self.0.on_sim_start(floor, people);
        self.1.on_sim_start(floor, people);
    }

    fn on_transition(&mut self, transition: &Transition) {
        self.0.on_transition(transition);
        self.1.on_transition(transition);
    }

    fn on_drain_tick(&mut self, now: SimTime, drained: usize) {
        self.0.on_drain_tick(now, drained);
        self.1.on_drain_tick(now, drained);
    }

    fn on_snapshot(&mut self, now: SimTime, floor: &FloorGraph, people: &[Person]) {
        self.0.on_snapshot(now, floor, people);
        self.1.on_snapshot(now, floor, people);
    }

    fn on_sim_end(&mut self, report: &EvacReport) {
        self.0.on_sim_end(report);
        self.1.on_sim_end(report);
    }
}

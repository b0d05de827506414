//! One evacuee and its lifecycle state.
//!
//! # State machine
//!
//! ```text
//!            ┌──────────── drained ────────────┐
//!            ▼                                 │
//!  ──▶  Moving ── steps onto bottleneck ──▶ Queued
//!        │  │
//!        │  └─ steps onto safe cell ──▶ Exiting ── next event ──▶ Safe
//!        │
//!        ├─ no admissible neighbor ────────────▶ Dead(Trapped)
//!        ├─ chooses a fire cell ───────────────▶ Dead(Fire)
//!        └─ step overruns the deadline ────────▶ Injured / Dead(Deadline)
//! ```
//!
//! `Safe`, `Dead` and `Injured` are terminal.

use std::fmt;

use evac_core::{AgentId, CellId, SimTime};
use evac_floor::FloorGraph;

/// Why an agent died.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeathCause {
    /// Every neighbor was wall or fire.
    Trapped,
    /// Stepped toward a fire cell.
    Fire,
    /// Still in transit to a non-safe cell when the deadline passed.
    Deadline,
}

/// Lifecycle state of a [`Person`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    #[default]
    Moving,
    /// Waiting in the bottleneck queue at `cell`.  No event is pending.
    Queued { cell: CellId },
    /// Standing on a safe cell; becomes `Safe` at the agent's next event.
    Exiting,
    Safe,
    Dead(DeathCause),
    /// Was heading onto a safe cell when the deadline cut the step short.
    Injured,
}

impl AgentState {
    /// `true` for `Safe`, `Dead` and `Injured`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, AgentState::Safe | AgentState::Dead(_) | AgentState::Injured)
    }

    /// Short lowercase label used in output rows and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Moving                     => "moving",
            AgentState::Queued { .. }              => "queued",
            AgentState::Exiting                    => "exiting",
            AgentState::Safe                       => "safe",
            AgentState::Dead(DeathCause::Trapped)  => "dead_trapped",
            AgentState::Dead(DeathCause::Fire)     => "dead_fire",
            AgentState::Dead(DeathCause::Deadline) => "dead_deadline",
            AgentState::Injured                    => "injured",
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Person ────────────────────────────────────────────────────────────────────

/// An evacuee.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    pub id: AgentId,

    /// Steps per unit time; one step takes `1 / rate`.  Always `> 0`.
    pub rate: f64,

    /// Sampled in `(0, 1)` and carried along, but the built-in
    /// [`NearestExit`](crate::NearestExit) policy does not read it.
    pub strategy: f64,

    /// Cell the agent currently occupies.
    pub location: CellId,

    pub state: AgentState,

    /// Time the agent was finalized `Safe`.
    pub exit_time: Option<SimTime>,
}

impl Person {
    /// A moving agent at `location`.
    ///
    /// # Panics
    ///
    /// In debug builds, if `rate` is not strictly positive and finite.
    pub fn new(id: AgentId, location: CellId, rate: f64, strategy: f64) -> Self {
        debug_assert!(rate.is_finite() && rate > 0.0, "rate must be positive, got {rate}");
        Self {
            id,
            rate,
            strategy,
            location,
            state: AgentState::Moving,
            exit_time: None,
        }
    }

    /// Time one step takes.
    #[inline]
    pub fn step_duration(&self) -> f64 {
        1.0 / self.rate
    }

    #[inline]
    pub fn is_safe(&self) -> bool {
        self.state == AgentState::Safe
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !matches!(self.state, AgentState::Dead(_))
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.state.is_terminal()
    }

    /// Move onto `target`.  Reaching a safe cell puts the agent in
    /// `Exiting` straight away; any other cell leaves it `Moving`.
    pub fn step_to(&mut self, target: CellId, graph: &FloorGraph) {
        self.location = target;
        self.state = if graph.cell(target).is_safe() {
            AgentState::Exiting
        } else {
            AgentState::Moving
        };
    }

    /// Finalize an `Exiting` agent as `Safe` at `now`.
    pub fn finalize_safe(&mut self, now: SimTime) {
        debug_assert_eq!(self.state, AgentState::Exiting);
        self.state = AgentState::Safe;
        self.exit_time = Some(now);
    }
}

//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeMap;

use evac_agent::{AgentState, Bottleneck, MovePolicy, NearestExit, Person, PopulationBuilder};
use evac_core::{AgentId, SamplingStreams, SimTime};
use evac_floor::FloorGraph;
use evac_schedule::EventScheduler;
use tracing::debug;

use crate::sim::World;
use crate::{EvacConfig, EvacStats, Sim, SimError, SimEvent, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`EvacConfig`]: agent count, seed, deadline, drain interval, …
/// - [`FloorGraph`]: from [`evac_floor::parse_floor_plan`] or a
///   [`FloorGraphBuilder`](evac_floor::FloorGraphBuilder).  Distances are
///   precomputed here if they have not been already.
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                                               |
/// |----------------|-------------------------------------------------------|
/// | `.policy(p)`   | [`NearestExit`]                                       |
/// | `.people(v)`   | `config.agent_count` agents sampled from `config.seed` |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, floor)
///     .policy(MyPolicy)
///     .build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: MovePolicy = NearestExit> {
    config: EvacConfig,
    floor:  FloorGraph,
    people: Option<Vec<Person>>,
    policy: P,
}

impl SimBuilder<NearestExit> {
    pub fn new(config: EvacConfig, floor: FloorGraph) -> Self {
        Self { config, floor, people: None, policy: NearestExit }
    }
}

impl<P: MovePolicy> SimBuilder<P> {
    /// Replace the movement policy.
    pub fn policy<Q: MovePolicy>(self, policy: Q) -> SimBuilder<Q> {
        SimBuilder {
            config: self.config,
            floor:  self.floor,
            people: self.people,
            policy,
        }
    }

    /// Supply the population directly instead of sampling it.
    ///
    /// Agent `i` must have id `i`, stand on an in-bounds cell and be
    /// `Moving`.  `config.agent_count` is ignored.
    pub fn people(mut self, people: Vec<Person>) -> Self {
        self.people = Some(people);
        self
    }

    /// Validate inputs, precompute distances, place agents and bottlenecks,
    /// and seed the calendar.
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;
        let mut streams = SamplingStreams::new(self.config.seed, &self.config.sampling)?;

        let mut floor = self.floor;
        if !floor.is_precomputed() {
            floor.precompute();
        }

        let people = match self.people {
            Some(people) => {
                check_people(&people, &floor)?;
                people
            }
            None => PopulationBuilder::new(self.config.agent_count).build(&floor, &mut streams)?,
        };

        let bottlenecks: BTreeMap<_, _> = floor
            .bottleneck_cells()
            .into_iter()
            .map(|cell| (cell, Bottleneck::new(cell)))
            .collect();

        // ── Seed the calendar ─────────────────────────────────────────────
        let mut scheduler = EventScheduler::new();
        for person in &people {
            scheduler.schedule_at(0.0, SimEvent::Move(person.id))?;
        }
        scheduler.schedule_at(self.config.bottleneck_delay, SimEvent::DrainBottlenecks)?;

        debug!(
            agents = people.len(),
            bottlenecks = bottlenecks.len(),
            pending = scheduler.len(),
            "simulation built"
        );

        let world = World {
            stats:          EvacStats::new(people.len()),
            deadline:       self.config.deadline.map(SimTime::from_f64),
            drain_interval: self.config.bottleneck_delay,
            movement:       streams.into_movement(),
            policy:         self.policy,
            floor,
            people,
            bottlenecks,
        };
        Ok(Sim { config: self.config, scheduler, world, started: false })
    }
}

fn check_people(people: &[Person], floor: &FloorGraph) -> SimResult<()> {
    for (i, p) in people.iter().enumerate() {
        if p.id != AgentId::from_index(i) {
            return Err(SimError::Config(format!("agent at position {i} has id {}", p.id)));
        }
        if p.location.index() >= floor.cell_count() {
            return Err(SimError::Config(format!("{} starts outside the floor at {}", p.id, p.location)));
        }
        if p.state != AgentState::Moving {
            return Err(SimError::Config(format!("{} must start moving, found {}", p.id, p.state)));
        }
        if !(p.rate.is_finite() && p.rate > 0.0 && p.step_duration().is_finite()) {
            return Err(SimError::Config(format!("{} has unusable rate {}", p.id, p.rate)));
        }
    }
    Ok(())
}

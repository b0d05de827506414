//! The `Sim` struct and its event handlers.

use std::collections::BTreeMap;

use evac_agent::{AgentState, Bottleneck, DeathCause, MovePolicy, NearestExit, Person};
use evac_core::{AgentId, CellId, SimRng, SimTime};
use evac_floor::FloorGraph;
use evac_schedule::{EventScheduler, RunStop};
use tracing::{debug, info, warn};

use crate::{EvacConfig, EvacReport, EvacStats, RunOutcome, SimError, SimObserver, SimResult, Transition};

/// Events on the run's calendar.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimEvent {
    /// The agent takes its next step (or is finalized).
    Move(AgentId),
    /// Release one agent from every bottleneck.
    DrainBottlenecks,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Everything the event handlers mutate, kept apart from the scheduler so a
/// handler can hold `&mut World` and `&mut EventScheduler` at once.
pub(crate) struct World<P> {
    pub(crate) floor:          FloorGraph,
    pub(crate) people:         Vec<Person>,
    /// Keyed by cell, so iteration drains in ascending `CellId` order.
    pub(crate) bottlenecks:    BTreeMap<CellId, Bottleneck>,
    pub(crate) stats:          EvacStats,
    pub(crate) policy:         P,
    pub(crate) movement:       SimRng,
    pub(crate) deadline:       Option<SimTime>,
    pub(crate) drain_interval: f64,
}

impl<P: MovePolicy> World<P> {
    fn handle<O: SimObserver>(
        &mut self,
        sched:    &mut EventScheduler<SimEvent>,
        now:      SimTime,
        event:    SimEvent,
        observer: &mut O,
    ) -> SimResult<()> {
        match event {
            SimEvent::Move(agent)      => self.move_agent(sched, now, agent, observer),
            SimEvent::DrainBottlenecks => self.drain_bottlenecks(sched, now, observer),
        }
    }

    #[inline]
    fn past_deadline(&self, now: SimTime) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    fn move_agent<O: SimObserver>(
        &mut self,
        sched:    &mut EventScheduler<SimEvent>,
        now:      SimTime,
        agent:    AgentId,
        observer: &mut O,
    ) -> SimResult<()> {
        if self.past_deadline(now) {
            return Ok(());
        }
        let deadline = self.deadline;
        let World { floor, people, bottlenecks, stats, policy, movement, .. } = self;
        let person = &mut people[agent.index()];

        match person.state {
            AgentState::Moving => {}
            AgentState::Exiting => {
                person.finalize_safe(now);
                stats.record_safe(now);
                emit(observer, now, person);
                return Ok(());
            }
            // Queued agents have no pending event; resolved agents are done.
            _ => return Ok(()),
        }

        let Some(target) = policy.decide(person, floor, movement) else {
            person.state = AgentState::Dead(DeathCause::Trapped);
            stats.dead += 1;
            emit(observer, now, person);
            return Ok(());
        };

        let cell = floor.cell(target);
        if cell.is_bottleneck() {
            person.location = target;
            person.state = AgentState::Queued { cell: target };
            bottlenecks
                .entry(target)
                .or_insert_with(|| Bottleneck::new(target))
                .enter(agent, 1);
        } else if cell.is_fire() {
            person.state = AgentState::Dead(DeathCause::Fire);
            stats.dead += 1;
        } else {
            let travel = person.step_duration();
            if deadline.is_some_and(|d| now + travel >= d) {
                person.location = target;
                if cell.is_safe() {
                    person.state = AgentState::Injured;
                    stats.injured += 1;
                } else {
                    person.state = AgentState::Dead(DeathCause::Deadline);
                    stats.dead += 1;
                }
            } else {
                person.step_to(target, floor);
                sched.schedule_after(travel, SimEvent::Move(agent))?;
            }
        }
        emit(observer, now, person);
        Ok(())
    }

    fn drain_bottlenecks<O: SimObserver>(
        &mut self,
        sched:    &mut EventScheduler<SimEvent>,
        now:      SimTime,
        observer: &mut O,
    ) -> SimResult<()> {
        let stop_cadence = self.past_deadline(now);
        let interval = self.drain_interval;
        let World { floor, people, bottlenecks, stats, .. } = self;

        let mut drained = 0;
        for bottleneck in bottlenecks.values_mut() {
            let Some(agent) = bottleneck.drain(1) else { continue };
            let person = &mut people[agent.index()];
            person.state = AgentState::Moving;
            sched.schedule_after(0.0, SimEvent::Move(agent))?;
            emit(observer, now, person);
            drained += 1;
        }
        debug!(time = now.as_f64(), drained, "bottleneck drain");
        observer.on_drain_tick(now, drained);
        observer.on_snapshot(now, floor, people);

        if stats.all_resolved() || stop_cadence {
            debug!(time = now.as_f64(), "drain cadence stopped");
        } else {
            sched.schedule_after(interval, SimEvent::DrainBottlenecks)?;
        }
        Ok(())
    }
}

fn emit<O: SimObserver>(observer: &mut O, time: SimTime, person: &Person) {
    debug!(
        time  = time.as_f64(),
        agent = %person.id,
        cell  = %person.location,
        state = %person.state,
        "transition"
    );
    observer.on_transition(&Transition {
        time,
        agent: person.id,
        cell:  person.location,
        state: person.state,
    });
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// One evacuation run.
///
/// Create via [`SimBuilder`][crate::SimBuilder], then call [`run`](Self::run).
pub struct Sim<P: MovePolicy = NearestExit> {
    pub config: EvacConfig,
    pub(crate) scheduler: EventScheduler<SimEvent>,
    pub(crate) world:     World<P>,
    pub(crate) started:   bool,
}

impl<P: MovePolicy> Sim<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every agent is resolved, the deadline quiesces the loop, or
    /// the event budget is spent.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<EvacReport> {
        self.start(observer);
        let limit = self.config.event_limit();

        let Sim { scheduler, world, .. } = self;
        let stop = scheduler
            .run_limited(limit, |sched, now, event| world.handle(sched, now, event, &mut *observer))?;

        let report = self.report(stop);
        match report.outcome {
            RunOutcome::EventLimit => warn!(
                limit,
                unresolved = report.stats.unresolved(),
                "event limit reached before every agent was resolved"
            ),
            outcome => info!(
                outcome = %outcome,
                end_time = report.end_time.as_f64(),
                safe = report.stats.safe,
                dead = report.stats.dead,
                injured = report.stats.injured,
                unresolved = report.stats.unresolved(),
                "evacuation finished"
            ),
        }
        observer.on_sim_end(&report);
        Ok(report)
    }

    /// Handle every event up to and including time `until`, leaving later
    /// ones pending.  Returns the number of events handled.
    ///
    /// Useful for tests and step-by-step animation; [`run`](Self::run)
    /// picks up where this left off.
    pub fn run_until<O: SimObserver>(&mut self, until: f64, observer: &mut O) -> SimResult<u64> {
        let until = SimTime::new(until)
            .ok_or_else(|| SimError::Config("run_until time must not be NaN".into()))?;
        self.start(observer);
        let Sim { scheduler, world, .. } = self;
        scheduler.run_until(until, |sched, now, event| world.handle(sched, now, event, &mut *observer))
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn floor(&self) -> &FloorGraph {
        &self.world.floor
    }

    pub fn people(&self) -> &[Person] {
        &self.world.people
    }

    pub fn person(&self, agent: AgentId) -> &Person {
        &self.world.people[agent.index()]
    }

    /// The bottleneck at `cell`, if `cell` is a bottleneck cell.
    pub fn bottleneck(&self, cell: CellId) -> Option<&Bottleneck> {
        self.world.bottlenecks.get(&cell)
    }

    /// All bottlenecks in ascending cell order.
    pub fn bottlenecks(&self) -> impl Iterator<Item = &Bottleneck> + '_ {
        self.world.bottlenecks.values()
    }

    pub fn stats(&self) -> &EvacStats {
        &self.world.stats
    }

    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn start<O: SimObserver>(&mut self, observer: &mut O) {
        if self.started {
            return;
        }
        self.started = true;
        info!(
            agents = self.world.people.len(),
            bottlenecks = self.world.bottlenecks.len(),
            cells = self.world.floor.cell_count(),
            seed = self.config.seed,
            deadline = ?self.config.deadline,
            "evacuation started"
        );
        observer.on_sim_start(&self.world.floor, &self.world.people);
        observer.on_snapshot(self.scheduler.now(), &self.world.floor, &self.world.people);
    }

    fn report(&self, stop: RunStop) -> EvacReport {
        let stats = self.world.stats.clone();
        let now = self.scheduler.now();
        let outcome = if stats.all_resolved() {
            RunOutcome::AllResolved
        } else if stop == RunStop::Limit {
            RunOutcome::EventLimit
        } else if self.world.past_deadline(now) {
            RunOutcome::DeadlineReached
        } else {
            RunOutcome::Quiescent
        };
        EvacReport {
            seed: self.config.seed,
            stats,
            outcome,
            end_time: now,
            events_processed: self.scheduler.executed(),
        }
    }
}

//! `evac-sim`: the evacuation run loop.
//!
//! # Event loop
//!
//! ```text
//! setup:   precompute distances, sample agents, one Bottleneck per B cell
//!          Move(agent) at t = 0 for every agent
//!          DrainBottlenecks at t = bottleneck_delay
//!
//! Move(agent) at t:
//!   past deadline or resolved  → ignore
//!   Exiting                    → Safe (exit_time = t)
//!   policy → None              → Dead(Trapped)
//!   policy → bottleneck cell   → Queued (no follow-up event)
//!   policy → fire cell         → Dead(Fire)
//!   step would end ≥ deadline  → Injured if heading to safety, else Dead(Deadline)
//!   otherwise                  → step, Move(agent) at t + 1/rate
//!
//! DrainBottlenecks at t:
//!   release one agent per bottleneck (ascending cell id) → Move(agent) at t
//!   reschedule at t + bottleneck_delay unless everyone is resolved or the
//!   deadline has passed
//! ```
//!
//! Events at equal times fire in the order they were scheduled.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs [`run_replications`] on Rayon's thread pool.      |
//! | `serde`    | Derives `Serialize`/`Deserialize` on config and reports. |
//!
//! # Quick-start
//!
//! ```rust
//! use evac_floor::parse_floor_plan;
//! use evac_sim::{EvacConfig, NoopObserver, SimBuilder};
//!
//! let floor = parse_floor_plan("P..S\n").unwrap();
//! let config = EvacConfig { agent_count: 3, ..EvacConfig::default() };
//! let mut sim = SimBuilder::new(config, floor).build().unwrap();
//! let report = sim.run(&mut NoopObserver).unwrap();
//! assert_eq!(report.stats.safe, 3);
//! ```

pub mod batch;
pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stats;


pub use batch::{BatchSummary, run_replications};
pub use builder::SimBuilder;
pub use config::{DEFAULT_MAX_EVENTS, EvacConfig};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, Transition};
pub use sim::{Sim, SimEvent};
pub use stats::{EvacReport, EvacStats, RunOutcome};

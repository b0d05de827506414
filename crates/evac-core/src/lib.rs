//! `evac-core`: foundational types for the evacuation simulator.
//!
//! This crate is a dependency of every other `evac-*` crate.  It has no
//! `evac-*` dependencies and minimal external ones (`rand`, `rand_distr`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `CellId`                                      |
//! | [`coord`]  | `Coord` (row, col grid position)                         |
//! | [`time`]   | `SimTime` (totally ordered simulated time)               |
//! | [`rng`]    | `SimRng`, `SamplingStreams`, `SamplingParams`            |
//! | [`error`]  | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod coord;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coord::Coord;
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, CellId};
pub use rng::{SamplingParams, SamplingStreams, SimRng};
pub use time::SimTime;

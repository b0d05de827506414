//! `evac-floor`: floor-plan graph, distance fields, and plan parsing.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`cell`]     | `Cell`, `CellKind`, `Distance`                             |
//! | [`graph`]    | `FloorGraph` (row-major cell table), `FloorGraphBuilder`   |
//! | [`distance`] | multi-source BFS behind `FloorGraph::precompute`           |
//! | [`parser`]   | `parse_floor_plan`, `load_floor_plan`                      |
//! | [`error`]    | `FloorError`, `FloorResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod cell;
pub mod distance;
pub mod error;
pub mod graph;
pub mod parser;

#[cfg(test)]
mod tests;

pub use cell::{Cell, CellKind, Distance};
pub use error::{FloorError, FloorResult};
pub use graph::{FloorGraph, FloorGraphBuilder};
pub use parser::{load_floor_plan, parse_floor_plan};

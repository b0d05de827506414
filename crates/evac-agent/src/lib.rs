//! `evac-agent`: evacuees and the things they interact with.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`person`]     | `Person`, `AgentState`, `DeathCause`                         |
//! | [`bottleneck`] | `Bottleneck`: FIFO admission queue bound to one cell         |
//! | [`policy`]     | `MovePolicy` trait, `NearestExit`, `nearest_exit`            |
//! | [`builder`]    | `PopulationBuilder`: sampled rates, strategies, start cells  |
//! | [`error`]      | `AgentError`, `AgentResult<T>`                               |
//!
//! # Design notes
//!
//! Nothing in this crate touches the event calendar.  A `Person` knows how to
//! step onto a cell and a `Bottleneck` knows how to admit and release agents;
//! deciding *when* those things happen, and what gets scheduled next, belongs
//! to `evac-sim`.
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on state types.   |

pub mod bottleneck;
pub mod builder;
pub mod error;
pub mod person;
pub mod policy;


pub use bottleneck::Bottleneck;
pub use builder::PopulationBuilder;
pub use error::{AgentError, AgentResult};
pub use person::{AgentState, DeathCause, Person};
pub use policy::{MovePolicy, NearestExit, nearest_exit};

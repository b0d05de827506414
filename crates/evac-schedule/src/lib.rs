//! `evac-schedule`: the discrete-event scheduler.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`scheduler`] | `EventScheduler<E>` (`BTreeMap<EventKey, E>`), `RunStop` |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                     |
//!
//! # Ordering contract
//!
//! ```text
//! key(event) = (time, seq)      seq = insertion counter, never reused
//! pop()      = smallest key     now := key.time
//! ```
//!
//! Events fire in ascending time; events scheduled for the same instant fire
//! in the order they were scheduled.  A handler may schedule more events
//! (including at the current instant), which are visible to the very next
//! `pop()`.

pub mod error;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use scheduler::{EventKey, EventScheduler, RunStop};

//! `evac-output`: run output writers and the terminal renderer.
//!
//! Two file backends are provided, the second behind a Cargo feature:
//!
//! | Feature   | Backend | Files created                          |
//! |-----------|---------|----------------------------------------|
//! | *(none)*  | CSV     | `transitions.csv`, `summary.csv`       |
//! | `sqlite`  | SQLite  | `output.db`                            |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `evac_sim::SimObserver`.  [`AsciiRenderer`] is a second
//! observer that animates the floor in a terminal.
//!
//! # Usage
//!
//! ```rust,ignore
//! use evac_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod render;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use render::{AsciiRenderer, render_frame};
pub use row::{SummaryRow, TransitionRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

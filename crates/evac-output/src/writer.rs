//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, SummaryRow, TransitionRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are returned to the caller; [`SimOutputObserver`](crate::SimOutputObserver)
/// stores them for [`take_error`](crate::SimOutputObserver::take_error)
/// instead of failing the run.
pub trait OutputWriter {
    /// Write a batch of transitions, in event order.
    fn write_transitions(&mut self, rows: &[TransitionRow]) -> OutputResult<()>;

    /// Write one run summary.
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use evac_agent::Person;
use evac_floor::FloorGraph;
use evac_sim::{EvacReport, SimObserver, Transition};

use crate::row::{SummaryRow, TransitionRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Transitions buffered before a write.
const DEFAULT_BATCH: usize = 4096;

/// A [`SimObserver`] that records every transition and the end-of-run
/// summary to any [`OutputWriter`] backend.
///
/// Transitions are buffered and written in batches.  Errors from the writer
/// are stored internally because `SimObserver` methods have no return value.
/// After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    /// Grid width, for turning cell ids back into `(row, col)`.
    cols:       u32,
    buffer:     Vec<TransitionRow>,
    batch:      usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self::with_batch_size(writer, DEFAULT_BATCH)
    }

    /// Like [`new`](Self::new) but flushes every `batch` transitions.
    pub fn with_batch_size(writer: W, batch: usize) -> Self {
        let batch = batch.max(1);
        Self {
            writer,
            cols:       1,
            buffer:     Vec::with_capacity(batch),
            batch,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let result = self.writer.write_transitions(&self.buffer);
        self.buffer.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_sim_start(&mut self, floor: &FloorGraph, _people: &[Person]) {
        self.cols = floor.cols().max(1);
    }

    fn on_transition(&mut self, t: &Transition) {
        let id = t.cell.0;
        self.buffer.push(TransitionRow {
            time:     t.time.as_f64(),
            agent_id: t.agent.0,
            row:      id / self.cols,
            col:      id % self.cols,
            state:    t.state.as_str(),
        });
        if self.buffer.len() >= self.batch {
            self.flush();
        }
    }

    fn on_sim_end(&mut self, report: &EvacReport) {
        self.flush();
        let result = self.writer.write_summary(&SummaryRow::from(report));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}

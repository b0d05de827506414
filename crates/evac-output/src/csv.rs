//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `transitions.csv`
//! - `summary.csv`
//!
//! A missing average exit time is written as `NA`.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, SummaryRow, TransitionRow};

/// Writes run output to two CSV files.
pub struct CsvWriter {
    transitions: Writer<File>,
    summary:     Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut transitions = Writer::from_path(dir.join("transitions.csv"))?;
        transitions.write_record(["time", "agent_id", "row", "col", "state"])?;

        let mut summary = Writer::from_path(dir.join("summary.csv"))?;
        summary.write_record([
            "seed", "outcome", "total", "safe", "dead", "injured", "unresolved",
            "avg_exit_time", "end_time", "events_processed",
        ])?;

        Ok(Self { transitions, summary, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_transitions(&mut self, rows: &[TransitionRow]) -> OutputResult<()> {
        for row in rows {
            self.transitions.write_record(&[
                row.time.to_string(),
                row.agent_id.to_string(),
                row.row.to_string(),
                row.col.to_string(),
                row.state.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            row.seed.to_string(),
            row.outcome.to_owned(),
            row.total.to_string(),
            row.safe.to_string(),
            row.dead.to_string(),
            row.injured.to_string(),
            row.unresolved.to_string(),
            row.avg_exit_time.map_or_else(|| "NA".to_owned(), |t| t.to_string()),
            row.end_time.to_string(),
            row.events_processed.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.transitions.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}

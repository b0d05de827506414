//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `transitions` and `summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OutputResult, SummaryRow, TransitionRow};

/// Writes run output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS transitions (
                 time     REAL    NOT NULL,
                 agent_id INTEGER NOT NULL,
                 row      INTEGER NOT NULL,
                 col      INTEGER NOT NULL,
                 state    TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS summaries (
                 seed             INTEGER NOT NULL,
                 outcome          TEXT    NOT NULL,
                 total            INTEGER NOT NULL,
                 safe             INTEGER NOT NULL,
                 dead             INTEGER NOT NULL,
                 injured          INTEGER NOT NULL,
                 unresolved       INTEGER NOT NULL,
                 avg_exit_time    REAL,
                 end_time         REAL    NOT NULL,
                 events_processed INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_transitions(&mut self, rows: &[TransitionRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO transitions (time, agent_id, row, col, state) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.time, row.agent_id, row.row, row.col, row.state])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO summaries \
             (seed, outcome, total, safe, dead, injured, unresolved, avg_exit_time, end_time, events_processed) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
                row.seed as i64,
                row.outcome,
                row.total as i64,
                row.safe as i64,
                row.dead as i64,
                row.injured as i64,
                row.unresolved as i64,
                row.avg_exit_time,
                row.end_time,
                row.events_processed as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

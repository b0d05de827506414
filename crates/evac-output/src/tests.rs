//! Integration tests for evac-output.

use evac_agent::Person;
use evac_core::{AgentId, CellId};
use evac_floor::{FloorGraph, parse_floor_plan};
use evac_sim::{EvacConfig, Sim, SimBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn floor(text: &str) -> FloorGraph {
    parse_floor_plan(text).unwrap()
}

/// Two agents walking down a corridor through a bottleneck.
fn corridor_sim() -> Sim {
    let people = vec![
        Person::new(AgentId(0), CellId(0), 1.0, 0.5),
        Person::new(AgentId(1), CellId(0), 1.0, 0.5),
    ];
    SimBuilder::new(EvacConfig { agent_count: 0, seed: 5, ..EvacConfig::default() }, floor("P.B.S\n"))
        .people(people)
        .build()
        .unwrap()
}

// ── CSV backend ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::row::{SummaryRow, TransitionRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn transition_row(agent_id: u32, time: f64) -> TransitionRow {
        TransitionRow { time, agent_id, row: 0, col: agent_id, state: "moving" }
    }

    fn summary_row() -> SummaryRow {
        SummaryRow {
            seed:             7,
            outcome:          "all_resolved",
            total:            3,
            safe:             2,
            dead:             1,
            injured:          0,
            unresolved:       0,
            avg_exit_time:    None,
            end_time:         4.5,
            events_processed: 12,
        }
    }

    fn read(path: std::path::PathBuf) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("transitions.csv").exists());
        assert!(dir.path().join("summary.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (headers, _) = read(dir.path().join("transitions.csv"));
        assert_eq!(headers, ["time", "agent_id", "row", "col", "state"]);

        let (headers, _) = read(dir.path().join("summary.csv"));
        assert_eq!(
            headers,
            [
                "seed", "outcome", "total", "safe", "dead", "injured", "unresolved",
                "avg_exit_time", "end_time", "events_processed",
            ]
        );
    }

    #[test]
    fn csv_transitions_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_transitions(&[transition_row(0, 0.0), transition_row(1, 0.5)]).unwrap();
        w.write_transitions(&[transition_row(2, 1.25)]).unwrap();
        w.finish().unwrap();

        let (_, rows) = read(dir.path().join("transitions.csv"));
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][0], "0.5");
        assert_eq!(&rows[2][1], "2");
        assert_eq!(&rows[2][4], "moving");
    }

    #[test]
    fn csv_missing_average_is_na() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_summary(&summary_row()).unwrap();
        w.write_summary(&SummaryRow { avg_exit_time: Some(2.5), ..summary_row() }).unwrap();
        w.finish().unwrap();

        let (_, rows) = read(dir.path().join("summary.csv"));
        assert_eq!(&rows[0][7], "NA");
        assert_eq!(&rows[1][7], "2.5");
        assert_eq!(&rows[0][1], "all_resolved");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn integration_csv() {
        let dir = tmp();
        let mut sim = corridor_sim();
        // A tiny batch forces several intermediate writes.
        let mut obs = SimOutputObserver::with_batch_size(CsvWriter::new(dir.path()).unwrap(), 2);
        let report = sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let (_, rows) = read(dir.path().join("transitions.csv"));
        // Each agent: step, queue, release, step, step onto exit, safe.
        assert_eq!(rows.len(), 12);
        let safe_rows: Vec<&csv::StringRecord> = rows.iter().filter(|r| &r[4] == "safe").collect();
        assert_eq!(safe_rows.len(), 2);
        // Both finish on the exit cell (0, 4).
        for r in safe_rows {
            assert_eq!((&r[2], &r[3]), ("0", "4"));
        }

        let (_, summary) = read(dir.path().join("summary.csv"));
        assert_eq!(summary.len(), 1);
        assert_eq!(&summary[0][3], "2");
        assert_eq!(summary[0][9].parse::<u64>().unwrap(), report.events_processed);
    }
}

// ── SQLite backend ────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use rusqlite::Connection;

    use super::*;
    use crate::observer::SimOutputObserver;
    use crate::sqlite::SqliteWriter;

    #[test]
    fn integration_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = corridor_sim();
        let mut obs = SimOutputObserver::new(SqliteWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        drop(obs);

        let conn = Connection::open(dir.path().join("output.db")).unwrap();
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM transitions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 12);
        let (safe, avg): (i64, Option<f64>) = conn
            .query_row("SELECT safe, avg_exit_time FROM summaries", [], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap();
        assert_eq!(safe, 2);
        assert!(avg.is_some());
    }
}

// ── Observer error handling ───────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::observer::SimOutputObserver;
    use crate::row::{SummaryRow, TransitionRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    /// Counts calls and fails every transition write.
    #[derive(Default)]
    struct Flaky {
        batches:   usize,
        summaries: usize,
        finished:  usize,
    }

    impl OutputWriter for Flaky {
        fn write_transitions(&mut self, _rows: &[TransitionRow]) -> OutputResult<()> {
            self.batches += 1;
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }

        fn write_summary(&mut self, _row: &SummaryRow) -> OutputResult<()> {
            self.summaries += 1;
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    #[test]
    fn write_errors_do_not_stop_the_run() {
        let mut sim = corridor_sim();
        let mut obs = SimOutputObserver::with_batch_size(Flaky::default(), 5);
        let report = sim.run(&mut obs).unwrap();
        assert_eq!(report.stats.safe, 2);

        let err = obs.take_error().expect("first error kept");
        assert!(err.to_string().contains("disk full"));
        assert!(obs.take_error().is_none(), "error is taken once");

        let writer = obs.into_writer();
        // 12 transitions in batches of 5 → 5, 5, then 2 at the end.
        assert_eq!(writer.batches, 3);
        assert_eq!(writer.summaries, 1);
        assert_eq!(writer.finished, 1);
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod render_tests {
    use std::io::{self, Write};

    use evac_agent::{AgentState, DeathCause};
    use evac_core::SimTime;

    use super::*;
    use crate::{AsciiRenderer, render_frame};

    #[test]
    fn frame_without_agents_is_the_plan() {
        let g = floor("#P.S#\n#F.B#\n");
        let frame = render_frame(&g, &[], SimTime::ZERO);
        assert_eq!(frame, "t=0.000\n#P.S#\n#F.B#\n");
    }

    #[test]
    fn agents_drawn_over_cells() {
        let g = floor("P..S\n");
        let mut a = Person::new(AgentId(0), CellId(1), 1.0, 0.5);
        let mut b = Person::new(AgentId(1), CellId(3), 1.0, 0.5);
        b.state = AgentState::Safe;
        let frame = render_frame(&g, &[a.clone(), b.clone()], SimTime::from_f64(2.0));
        assert_eq!(frame, "t=2.000\nP@.$\n");

        // A moving agent outranks a dead one on the same cell.
        a.state = AgentState::Dead(DeathCause::Trapped);
        b.location = CellId(1);
        b.state = AgentState::Moving;
        let frame = render_frame(&g, &[a, b], SimTime::from_f64(2.0));
        assert_eq!(frame, "t=2.000\nP@.S\n");
    }

    #[test]
    fn injured_outranks_dead() {
        let g = floor("P.S\n");
        let mut dead = Person::new(AgentId(0), CellId(2), 1.0, 0.5);
        dead.state = AgentState::Dead(DeathCause::Deadline);
        let mut hurt = Person::new(AgentId(1), CellId(2), 1.0, 0.5);
        hurt.state = AgentState::Injured;
        let frame = render_frame(&g, &[dead, hurt], SimTime::ZERO);
        assert_eq!(frame, "t=0.000\nP.!\n");
    }

    #[test]
    fn renderer_draws_every_snapshot() {
        let mut sim = corridor_sim();
        let mut r = AsciiRenderer::new(Vec::new());
        sim.run(&mut r).unwrap();
        assert!(r.take_error().is_none());

        let frames = r.frames_drawn();
        let text = String::from_utf8(r.into_inner()).unwrap();
        assert_eq!(text.matches("t=").count(), frames);
        // Initial frame: both agents on the start cell.
        assert!(text.starts_with("t=0.000\n@.B.S\n"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn render_failure_is_stored_not_fatal() {
        let mut sim = corridor_sim();
        let mut r = AsciiRenderer::new(BrokenPipe);
        let report = sim.run(&mut r).unwrap();
        assert_eq!(report.stats.safe, 2);
        assert_eq!(r.frames_drawn(), 0);
        assert!(matches!(r.take_error(), Some(crate::OutputError::Io(_))));
    }
}

//! Terminal animation of a run.
//!
//! Each frame is the floor plan in its text form with agents drawn over it:
//!
//! | Symbol | Agent state          |
//! |--------|----------------------|
//! | `@`    | moving               |
//! | `q`    | queued at bottleneck |
//! | `$`    | exiting or safe      |
//! | `!`    | gravely injured      |
//! | `x`    | dead                 |
//!
//! Where several agents share a cell the symbol earliest in this table wins.

use std::fmt::Write as _;
use std::io::Write;
use std::thread;
use std::time::Duration;

use evac_agent::{AgentState, Person};
use evac_core::SimTime;
use evac_floor::FloorGraph;
use evac_sim::SimObserver;

use crate::OutputError;

fn glyph(state: AgentState) -> (u8, char) {
    match state {
        AgentState::Moving                     => (0, '@'),
        AgentState::Queued { .. }              => (1, 'q'),
        AgentState::Exiting | AgentState::Safe => (2, '$'),
        AgentState::Injured                    => (3, '!'),
        AgentState::Dead(_)                    => (4, 'x'),
    }
}

/// Draw one frame: a `t=…` header line, then one line per grid row.
pub fn render_frame(floor: &FloorGraph, people: &[Person], now: SimTime) -> String {
    let mut overlay: Vec<Option<(u8, char)>> = vec![None; floor.cell_count()];
    for p in people {
        let g = glyph(p.state);
        let slot = &mut overlay[p.location.index()];
        if slot.is_none_or(|cur| g.0 < cur.0) {
            *slot = Some(g);
        }
    }

    let cols = floor.cols().max(1) as usize;
    let mut out = String::with_capacity(floor.cell_count() + floor.rows() as usize + 16);
    let _ = writeln!(out, "{now}");
    for (i, cell) in floor.cells().iter().enumerate() {
        out.push(overlay[i].map_or_else(|| cell.symbol(), |(_, c)| c));
        if (i + 1) % cols == 0 {
            out.push('\n');
        }
    }
    out
}

/// A [`SimObserver`] that prints a frame to `out` on every snapshot.
///
/// A write failure stops further drawing and is kept for
/// [`take_error`](Self::take_error); the run itself carries on.
pub struct AsciiRenderer<W: Write> {
    out:          W,
    frame_delay:  Duration,
    clear_screen: bool,
    frames:       usize,
    error:        Option<OutputError>,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frame_delay:  Duration::ZERO,
            clear_screen: false,
            frames:       0,
            error:        None,
        }
    }

    /// Pause this long after each frame.
    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    /// Emit an ANSI clear-screen before each frame.
    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    pub fn frames_drawn(&self) -> usize {
        self.frames
    }

    pub fn take_error(&mut self) -> Option<OutputError> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, frame: &str) -> std::io::Result<()> {
        if self.clear_screen {
            self.out.write_all(b"\x1b[2J\x1b[H")?;
        }
        self.out.write_all(frame.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> SimObserver for AsciiRenderer<W> {
    fn on_snapshot(&mut self, now: SimTime, floor: &FloorGraph, people: &[Person]) {
        if self.error.is_some() {
            return;
        }
        let frame = render_frame(floor, people, now);
        match self.draw(&frame) {
            Ok(()) => self.frames += 1,
            Err(e) => {
                self.error = Some(OutputError::Io(e));
                return;
            }
        }
        if !self.frame_delay.is_zero() {
            thread::sleep(self.frame_delay);
        }
    }
}

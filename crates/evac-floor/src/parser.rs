//! Floor-plan text loader.
//!
//! # Format
//!
//! One line per grid row, one character per cell:
//!
//! ```text
//! ; museum wing, two exits
//! ##########
//! #P..P...S#
//! #..##B####
//! #P.F#...S#
//! ##########
//! ```
//!
//! | Char        | Cell                               |
//! |-------------|------------------------------------|
//! | `.` or ` `  | open                               |
//! | `#` or `W`  | wall                               |
//! | `F`         | fire                               |
//! | `S`         | safe exit                          |
//! | `B`         | bottleneck                         |
//! | `P`         | open and placeable (agent start)   |
//!
//! Lines starting with `;` are comments.  Trailing whitespace-only lines are
//! dropped.  Rows shorter than the widest row are padded with walls.
//!
//! The returned graph has adjacency resolved but distances not yet
//! precomputed.

use std::path::Path;

use evac_core::Coord;

use crate::{CellKind, FloorError, FloorGraph, FloorGraphBuilder, FloorResult};

/// Load and parse a floor plan from `path`.
pub fn load_floor_plan(path: &Path) -> FloorResult<FloorGraph> {
    let text = std::fs::read_to_string(path)?;
    parse_floor_plan(&text)
}

/// Parse a floor plan from its text form.
pub fn parse_floor_plan(text: &str) -> FloorResult<FloorGraph> {
    // (1-based source line, row text) for every non-comment line.
    let mut rows: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.starts_with(';'))
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .collect();
    while rows.last().is_some_and(|(_, l)| l.trim().is_empty()) {
        rows.pop();
    }

    let width = rows.iter().map(|(_, l)| l.chars().count()).max().unwrap_or(0);
    if rows.is_empty() || width == 0 {
        return Err(FloorError::Empty);
    }

    let mut builder = FloorGraphBuilder::new(rows.len() as u32, width as u32);
    for (r, &(line_no, line)) in rows.iter().enumerate() {
        let mut len = 0;
        for (c, ch) in line.chars().enumerate() {
            let coord = Coord::new(r as u32, c as u32);
            match ch {
                '.' | ' ' => {}
                'P' => {
                    builder.set_placeable(coord)?;
                }
                other => {
                    let kind = kind_for(other)
                        .ok_or(FloorError::Parse { line: line_no, col: c + 1, found: other })?;
                    builder.set_kind(coord, kind)?;
                }
            }
            len = c + 1;
        }
        for c in len..width {
            builder.set_kind(Coord::new(r as u32, c as u32), CellKind::Wall)?;
        }
    }

    Ok(builder.build())
}

fn kind_for(ch: char) -> Option<CellKind> {
    match ch {
        '#' | 'W' => Some(CellKind::Wall),
        'F'       => Some(CellKind::Fire),
        'S'       => Some(CellKind::Safe),
        'B'       => Some(CellKind::Bottleneck),
        _         => None,
    }
}

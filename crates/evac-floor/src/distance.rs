//! Distance-field precompute.
//!
//! Each cell's `dist_to_fire` / `dist_to_safe` is the hop count of the
//! shortest neighbor path from that cell to any fire / safe cell, where every
//! cell on the path *before* the target must be traversable (not wall, not
//! fire).  Consequences:
//!
//! - walls are `INFINITE` for both fields;
//! - a fire cell is `0` from fire but `INFINITE` from safety, because an
//!   agent never routes through fire, including out of the cell it is on.
//!
//! Rather than searching forward from every cell, one breadth-first search
//! runs backward from all targets at once.  Grid adjacency is symmetric, so
//! the reverse search finds the same minimum hop counts in `O(cells)`.

use std::collections::VecDeque;

use evac_core::CellId;

use crate::cell::{Cell, Distance};
use crate::FloorGraph;

impl FloorGraph {
    /// Fill `dist_to_fire` and `dist_to_safe` for every cell.
    ///
    /// Recomputes from scratch each call, so calling it again yields the same
    /// fields.
    pub fn precompute(&mut self) {
        let to_fire = multi_source_bfs(self, Cell::is_fire);
        let to_safe = multi_source_bfs(self, Cell::is_safe);

        for ((cell, f), s) in self.cells_mut().iter_mut().zip(to_fire).zip(to_safe) {
            cell.dist_to_fire = f;
            cell.dist_to_safe = s;
        }
        self.precomputed = true;
    }
}

/// Hop distance from every cell to the nearest cell satisfying `is_target`.
///
/// Targets seed the frontier at distance zero.  A cell is only entered (and
/// thus only expanded) if it is traversable, so paths never pass through a
/// wall or a fire cell.
fn multi_source_bfs(floor: &FloorGraph, is_target: impl Fn(&Cell) -> bool) -> Vec<Distance> {
    let cells = floor.cells();
    let mut dist = vec![Distance::INFINITE; cells.len()];
    let mut frontier: VecDeque<CellId> = VecDeque::new();

    for (i, cell) in cells.iter().enumerate() {
        if !cell.is_wall() && is_target(cell) {
            dist[i] = Distance::ZERO;
            frontier.push_back(CellId::from_index(i));
        }
    }

    while let Some(current) = frontier.pop_front() {
        let next = dist[current.index()].next();
        for &nbr in floor.neighbors(current) {
            let cell = floor.cell(nbr);
            if dist[nbr.index()].is_finite() || !cell.kind.is_traversable() {
                continue;
            }
            dist[nbr.index()] = next;
            frontier.push_back(nbr);
        }
    }

    dist
}

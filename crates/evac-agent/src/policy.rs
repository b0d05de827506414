//! The `MovePolicy` trait and the built-in nearest-exit rule.

use evac_core::{CellId, SimRng};
use evac_floor::FloorGraph;

use crate::Person;

/// Chooses the next cell for an agent.
///
/// `decide` is called once per movement event for an agent that is not yet
/// resolved.  Returning `None` means the agent has nowhere to go and dies
/// trapped.
///
/// Implementations must be deterministic given the `rng` they are handed so
/// that runs with the same seed replay exactly.
///
/// # Example
///
/// ```rust,ignore
/// /// Wander to a random admissible neighbor.
/// struct RandomWalk;
///
/// impl MovePolicy for RandomWalk {
///     fn decide(&self, p: &Person, g: &FloorGraph, rng: &mut SimRng) -> Option<CellId> {
///         let open: Vec<CellId> = g.neighbors(p.location).iter().copied()
///             .filter(|&n| g.cell(n).kind.is_traversable())
///             .collect();
///         rng.choose(&open).copied()
///     }
/// }
/// ```
pub trait MovePolicy: Send + Sync + 'static {
    fn decide(&self, person: &Person, graph: &FloorGraph, rng: &mut SimRng) -> Option<CellId>;
}

/// Step toward the neighbor closest to safety.  Ignores `strategy` and the
/// rng.
#[derive(Copy, Clone, Debug, Default)]
pub struct NearestExit;

impl MovePolicy for NearestExit {
    fn decide(&self, person: &Person, graph: &FloorGraph, _rng: &mut SimRng) -> Option<CellId> {
        nearest_exit(graph, person.location)
    }
}

/// The neighbor of `from` with the smallest `dist_to_safe`, skipping walls
/// and fire.  Ties go to the first neighbor in ascending `CellId` order.
///
/// `None` when every neighbor is wall or fire.  A neighbor whose distance is
/// infinite is still a valid pick if nothing better exists, so an agent cut
/// off from every exit keeps moving rather than being declared trapped.
pub fn nearest_exit(graph: &FloorGraph, from: CellId) -> Option<CellId> {
    let mut best: Option<(CellId, _)> = None;
    for &n in graph.neighbors(from) {
        let cell = graph.cell(n);
        if !cell.kind.is_traversable() {
            continue;
        }
        if best.is_none_or(|(_, d)| cell.dist_to_safe < d) {
            best = Some((n, cell.dist_to_safe));
        }
    }
    best.map(|(id, _)| id)
}

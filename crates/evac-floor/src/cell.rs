//! Per-cell attributes and the hop-count distance type.

use std::fmt;

use evac_core::{CellId, Coord};

// ── CellKind ──────────────────────────────────────────────────────────────────

/// What occupies a cell.
///
/// Wall, fire, safe exit and bottleneck are mutually exclusive: a cell has
/// exactly one kind, fixed when the floor is built.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Open,
    Wall,
    Fire,
    Safe,
    Bottleneck,
}

impl CellKind {
    /// Character used by the floor-plan text format.
    pub fn symbol(self) -> char {
        match self {
            CellKind::Open       => '.',
            CellKind::Wall       => '#',
            CellKind::Fire       => 'F',
            CellKind::Safe       => 'S',
            CellKind::Bottleneck => 'B',
        }
    }

    /// Whether an agent may pass *through* a cell of this kind.
    #[inline]
    pub fn is_traversable(self) -> bool {
        !matches!(self, CellKind::Wall | CellKind::Fire)
    }
}

// ── Distance ──────────────────────────────────────────────────────────────────

/// Minimum number of neighbor hops to a target, or [`Distance::INFINITE`].
///
/// `INFINITE` is `u32::MAX`, so the derived `Ord` ranks unreachable cells
/// after every finite distance.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Distance(pub u32);

impl Distance {
    pub const ZERO: Distance = Distance(0);
    pub const INFINITE: Distance = Distance(u32::MAX);

    #[inline]
    pub fn is_finite(self) -> bool {
        self != Self::INFINITE
    }

    /// `Some(hops)` for finite distances.
    #[inline]
    pub fn hops(self) -> Option<u32> {
        self.is_finite().then_some(self.0)
    }

    /// One hop further.  `INFINITE` stays `INFINITE`.
    #[inline]
    pub fn next(self) -> Distance {
        if self.is_finite() { Distance(self.0 + 1) } else { self }
    }
}

impl Default for Distance {
    fn default() -> Self {
        Self::INFINITE
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hops() {
            Some(h) => write!(f, "{h}"),
            None    => f.write_str("inf"),
        }
    }
}

// ── Cell ──────────────────────────────────────────────────────────────────────

/// One grid location and its fixed attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub coord: Coord,
    pub kind: CellKind,

    /// Agents may be placed here at setup.  Only set on `Open` cells.
    pub placeable: bool,

    /// In-bounds 4-adjacent cells in ascending `CellId` order.  Walls are
    /// included; callers filter them at traversal time.
    pub neighbors: Vec<CellId>,

    /// Hops to the nearest fire cell.  `INFINITE` until precomputed.
    pub dist_to_fire: Distance,

    /// Hops to the nearest safe cell.  `INFINITE` until precomputed.
    pub dist_to_safe: Distance,
}

impl Cell {
    #[inline] pub fn is_wall(&self) -> bool { self.kind == CellKind::Wall }
    #[inline] pub fn is_fire(&self) -> bool { self.kind == CellKind::Fire }
    #[inline] pub fn is_safe(&self) -> bool { self.kind == CellKind::Safe }
    #[inline] pub fn is_bottleneck(&self) -> bool { self.kind == CellKind::Bottleneck }
    #[inline] pub fn is_placeable(&self) -> bool { self.placeable }

    /// Plan-file character for this cell (`P` for placeable open cells).
    pub fn symbol(&self) -> char {
        if self.placeable { 'P' } else { self.kind.symbol() }
    }
}

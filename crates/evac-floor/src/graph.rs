//! Floor graph representation and builder.
//!
//! # Data layout
//!
//! Cells are stored in one row-major `Vec<Cell>` indexed by `CellId`:
//!
//! ```text
//! id = row * cols + col
//! ```
//!
//! so ascending `CellId` is lexicographic `(row, col)` order.  Every
//! enumeration the graph exposes (neighbors, placeable cells, bottlenecks)
//! follows that order, which is what makes movement decisions and bottleneck
//! draining reproducible.
//!
//! Adjacency is the 4-neighborhood (up, left, right, down), resolved once by
//! [`FloorGraphBuilder::build`].  The graph is read-only afterward except for
//! the two distance fields written by [`FloorGraph::precompute`].

use evac_core::{CellId, Coord};

use crate::cell::{Cell, CellKind, Distance};
use crate::{FloorError, FloorResult};

// ── FloorGraph ────────────────────────────────────────────────────────────────

/// The floor plan: a `rows × cols` grid of [`Cell`]s with resolved adjacency.
///
/// Do not construct directly; use [`FloorGraphBuilder`] or
/// [`parse_floor_plan`](crate::parse_floor_plan).
#[derive(Clone, Debug, PartialEq)]
pub struct FloorGraph {
    rows:  u32,
    cols:  u32,
    cells: Vec<Cell>,
    pub(crate) precomputed: bool,
}

impl FloorGraph {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// `true` once [`precompute`](Self::precompute) has filled the distance
    /// fields.
    pub fn is_precomputed(&self) -> bool {
        self.precomputed
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// `CellId` of `coord`, or `None` if it lies outside the grid.
    #[inline]
    pub fn id_of(&self, coord: Coord) -> Option<CellId> {
        (coord.row < self.rows && coord.col < self.cols)
            .then(|| CellId(coord.row * self.cols + coord.col))
    }

    #[inline]
    pub fn coord_of(&self, id: CellId) -> Coord {
        self.cells[id.index()].coord
    }

    /// Neighbors of `id` in ascending `CellId` order (walls included).
    #[inline]
    pub fn neighbors(&self, id: CellId) -> &[CellId] {
        &self.cells[id.index()].neighbors
    }

    // ── Filtered enumerations (ascending CellId) ──────────────────────────

    fn ids_where(&self, pred: impl Fn(&Cell) -> bool) -> Vec<CellId> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| pred(c))
            .map(|(i, _)| CellId::from_index(i))
            .collect()
    }

    pub fn placeable_cells(&self) -> Vec<CellId> {
        self.ids_where(Cell::is_placeable)
    }

    pub fn bottleneck_cells(&self) -> Vec<CellId> {
        self.ids_where(Cell::is_bottleneck)
    }

    pub fn fire_cells(&self) -> Vec<CellId> {
        self.ids_where(Cell::is_fire)
    }

    pub fn safe_cells(&self) -> Vec<CellId> {
        self.ids_where(Cell::is_safe)
    }

    // ── Text form ─────────────────────────────────────────────────────────

    /// Render the plan back into the text format accepted by
    /// [`parse_floor_plan`](crate::parse_floor_plan).
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.rows as usize);
        for row in self.cells.chunks(self.cols.max(1) as usize) {
            out.extend(row.iter().map(Cell::symbol));
            out.push('\n');
        }
        out
    }
}

// ── FloorGraphBuilder ─────────────────────────────────────────────────────────

/// Construct a [`FloorGraph`] cell by cell, then call [`build`](Self::build).
///
/// Every cell starts `Open` and not placeable.
///
/// # Example
///
/// ```
/// use evac_core::Coord;
/// use evac_floor::{CellKind, FloorGraphBuilder};
///
/// // [S][P][F]
/// let mut b = FloorGraphBuilder::new(1, 3);
/// b.set_kind(Coord::new(0, 0), CellKind::Safe).unwrap();
/// b.set_placeable(Coord::new(0, 1)).unwrap();
/// b.set_kind(Coord::new(0, 2), CellKind::Fire).unwrap();
/// let mut floor = b.build();
/// floor.precompute();
/// assert_eq!(floor.cell_count(), 3);
/// assert_eq!(floor.placeable_cells().len(), 1);
/// ```
#[derive(Debug)]
pub struct FloorGraphBuilder {
    rows:      u32,
    cols:      u32,
    kinds:     Vec<CellKind>,
    placeable: Vec<bool>,
}

impl FloorGraphBuilder {
    pub fn new(rows: u32, cols: u32) -> Self {
        let n = rows as usize * cols as usize;
        Self {
            rows,
            cols,
            kinds:     vec![CellKind::Open; n],
            placeable: vec![false; n],
        }
    }

    fn slot(&self, coord: Coord) -> FloorResult<usize> {
        if coord.row < self.rows && coord.col < self.cols {
            Ok((coord.row * self.cols + coord.col) as usize)
        } else {
            Err(FloorError::OutOfBounds { coord, rows: self.rows, cols: self.cols })
        }
    }

    /// Set the kind of the cell at `coord`.  Any kind other than `Open`
    /// clears the placeable flag.
    pub fn set_kind(&mut self, coord: Coord, kind: CellKind) -> FloorResult<&mut Self> {
        let i = self.slot(coord)?;
        self.kinds[i] = kind;
        if kind != CellKind::Open {
            self.placeable[i] = false;
        }
        Ok(self)
    }

    /// Mark the cell at `coord` as an open, placeable start cell.
    pub fn set_placeable(&mut self, coord: Coord) -> FloorResult<&mut Self> {
        let i = self.slot(coord)?;
        self.kinds[i] = CellKind::Open;
        self.placeable[i] = true;
        Ok(self)
    }

    /// Consume the builder, resolve 4-adjacency, and produce a
    /// [`FloorGraph`] whose distance fields are still `INFINITE`.
    pub fn build(self) -> FloorGraph {
        let (rows, cols) = (self.rows, self.cols);
        let cells = self
            .kinds
            .into_iter()
            .zip(self.placeable)
            .enumerate()
            .map(|(i, (kind, placeable))| {
                let coord = Coord::new(i as u32 / cols, i as u32 % cols);
                Cell {
                    coord,
                    kind,
                    placeable,
                    neighbors:    grid_neighbors(coord, rows, cols),
                    dist_to_fire: Distance::INFINITE,
                    dist_to_safe: Distance::INFINITE,
                }
            })
            .collect();

        FloorGraph { rows, cols, cells, precomputed: false }
    }
}

/// In-bounds 4-neighbors of `coord`, already in ascending row-major order:
/// up, left, right, down.
fn grid_neighbors(coord: Coord, rows: u32, cols: u32) -> Vec<CellId> {
    let Coord { row, col } = coord;
    let id = |r: u32, c: u32| CellId(r * cols + c);

    let mut out = Vec::with_capacity(4);
    if row > 0 {
        out.push(id(row - 1, col));
    }
    if col > 0 {
        out.push(id(row, col - 1));
    }
    if col + 1 < cols {
        out.push(id(row, col + 1));
    }
    if row + 1 < rows {
        out.push(id(row + 1, col));
    }
    out
}

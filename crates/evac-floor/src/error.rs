//! Floor-subsystem error type.

use thiserror::Error;

use evac_core::Coord;

/// Errors produced by `evac-floor`.
#[derive(Debug, Error)]
pub enum FloorError {
    #[error("floor plan line {line}, column {col}: unexpected character {found:?}")]
    Parse { line: usize, col: usize, found: char },

    #[error("floor plan contains no cells")]
    Empty,

    #[error("coordinate {coord} is outside the {rows}x{cols} floor")]
    OutOfBounds { coord: Coord, rows: u32, cols: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FloorResult<T> = Result<T, FloorError>;

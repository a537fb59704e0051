//! Error types for grid loading, searching and path reconstruction.

use grid_util::Point;
use thiserror::Error;

use crate::grid::CellLabel;

/// Every failure the crate reports. Search failures are returned to the caller as values and are
/// never retried or logged by the library itself.
#[derive(Error, Debug)]
pub enum PathfindingError {
    #[error("point {point} lies outside the {rows}x{cols} grid")]
    OutOfBounds { point: Point, rows: usize, cols: usize },

    #[error("invalid endpoint {point}: {reason}")]
    InvalidEndpoint { point: Point, reason: &'static str },

    #[error("no path exists between start and goal")]
    NoPathExists,

    #[error("heuristic weight {weight} overflows path costs on a {rows}x{cols} grid")]
    WeightTooLarge { weight: u64, rows: usize, cols: usize },

    #[error("predecessor chain broken after {steps} steps while walking back from {goal}")]
    BrokenChain { goal: Point, steps: usize },

    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid contains no {0:?} cell")]
    MissingLabel(CellLabel),

    #[error("grid contains more than one {0:?} cell")]
    DuplicateLabel(CellLabel),

    #[error("unknown cell code {0}")]
    UnknownCellCode(i64),

    #[error("binary grid cell value {0} is not a cell code")]
    UnknownCellValue(f64),

    #[error("malformed binary grid: {0}")]
    InvalidBinaryGrid(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, PathfindingError>;

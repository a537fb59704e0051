//! # grid_frontier
//!
//! Shortest paths between the start and goal cell of a 2D occupancy grid. A single best-first
//! search covers both [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
//! (no heuristic) and weighted [A*](https://en.wikipedia.org/wiki/A*_search_algorithm), where the
//! heuristic is the truncated Euclidean distance to the goal multiplied by a fixed weight. Moves
//! are restricted to the four axis-aligned neighbours and every step costs 1.
//!
//! Every expansion records a snapshot of the remaining frontier, so a search can be replayed and
//! visualized step by step afterwards. The [io] module reads grid files and writes paths and
//! traces in the comma-separated `row,col` format.
//!
//! ```
//! use grid_frontier::{coord, search, GridModel};
//!
//! let grid = GridModel::from_codes(&[vec![0, 0, 0], vec![0, 1, 0], vec![3, 1, 2]]).unwrap();
//! let run = search(&grid, grid.start(), grid.goal(), false).unwrap();
//! assert_eq!(run.path().unwrap().len(), 7);
//! assert_eq!(run.trace.snapshots()[0].popped, coord(2, 0));
//! ```
pub mod error;
pub mod grid;
pub mod io;
pub mod path;
pub mod solver;
pub mod state;
pub mod trace;

use grid_util::Point;

pub use error::{PathfindingError, Result};
pub use grid::{CellLabel, GridModel};
pub use path::{path_cost, reconstruct};
pub use solver::{search, BestFirstSolver, Outcome, SearchRun};
pub use state::{Cost, FrontierEntry, SearchState, INFINITY};
pub use trace::{Snapshot, Trace, TraceOrder, TraceRecorder};

/// Weight applied to the heuristic in guided mode. Values above 1 make the heuristic
/// inadmissible, trading path optimality for fewer expansions.
pub const HEURISTIC_WEIGHT: Cost = 2;

/// Creates the [Point] for the cell at `row`, `col`.
pub fn coord(row: i32, col: i32) -> Point {
    Point::new(col, row)
}

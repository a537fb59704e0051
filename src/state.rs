//! Working set of a single search run: tentative costs, visited flags, predecessor links, the
//! heuristic grid and the open frontier.
use grid_util::{BoolGrid, Point, SimpleValueGrid, ValueGrid};
use num_traits::ToPrimitive;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::coord;
use crate::grid::GridModel;

pub type Cost = u64;

/// Tentative cost of cells that have not been reached. No reachable priority comes close.
pub const INFINITY: Cost = Cost::MAX;

/// An open entry: the priority (g-cost plus weighted heuristic) a point was pushed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrontierEntry {
    pub priority: Cost,
    pub point: Point,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: lowest priority first, then lowest row, then lowest column.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.point.y.cmp(&self.point.y))
            .then_with(|| other.point.x.cmp(&self.point.x))
    }
}

/// Floor of the Euclidean distance between two points.
pub fn euclidean_floor(p1: &Point, p2: &Point) -> Cost {
    let d_x = f64::from(p1.x - p2.x);
    let d_y = f64::from(p1.y - p2.y);
    (d_x * d_x + d_y * d_y).sqrt().to_u64().unwrap_or_default()
}

/// Upper bound `rows * cols * (1 + weight * max_euclid)` on every priority a search towards
/// `goal` can push, where `max_euclid` is the truncated distance from `goal` to the farthest
/// cell. `None` when the bound does not fit in [Cost].
pub fn cost_bound(grid: &GridModel, goal: &Point, weight: Cost) -> Option<Cost> {
    let (last_row, last_col) = (grid.rows() as i32 - 1, grid.cols() as i32 - 1);
    let max_euclid = [(0, 0), (0, last_col), (last_row, 0), (last_row, last_col)]
        .iter()
        .map(|&(row, col)| euclidean_floor(goal, &coord(row, col)))
        .max()
        .unwrap_or_default();
    let cells = Cost::try_from(grid.rows().checked_mul(grid.cols())?).ok()?;
    weight
        .checked_mul(max_euclid)?
        .checked_add(1)?
        .checked_mul(cells)
}

/// Mutable state owned by exactly one run. The frontier may hold several entries for one point;
/// only the first one popped is expanded, later ones are discarded through the visited grid.
#[derive(Clone, Debug)]
pub struct SearchState {
    cost: SimpleValueGrid<Cost>,
    visited: BoolGrid,
    predecessors: SimpleValueGrid<Option<Point>>,
    heuristic: SimpleValueGrid<Cost>,
    frontier: BinaryHeap<FrontierEntry>,
    expanded: usize,
}

impl SearchState {
    /// Allocates the per-cell grids for `grid`. With a weight, the heuristic grid holds
    /// `weight * floor(euclid(cell, goal))` for every cell; without one it is all zero.
    pub fn new(grid: &GridModel, goal: Point, heuristic_weight: Option<Cost>) -> SearchState {
        let (w, h) = (grid.cols(), grid.rows());
        let mut heuristic: SimpleValueGrid<Cost> = SimpleValueGrid::new(w, h, 0);
        if let Some(weight) = heuristic_weight {
            for point in grid.points() {
                heuristic.set_point(point, weight.saturating_mul(euclidean_floor(&point, &goal)));
            }
        }
        SearchState {
            cost: SimpleValueGrid::new(w, h, INFINITY),
            visited: BoolGrid::new(w, h, false),
            predecessors: SimpleValueGrid::new(w, h, None),
            heuristic,
            frontier: BinaryHeap::new(),
            expanded: 0,
        }
    }

    /// Pushes the start point with g-cost zero.
    pub fn seed(&mut self, start: Point) {
        let priority = self.heuristic(&start);
        self.cost.set_point(start, priority);
        self.frontier.push(FrontierEntry {
            priority,
            point: start,
        });
    }

    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.frontier.pop()
    }

    pub fn is_visited(&self, point: &Point) -> bool {
        self.visited.get_point(*point)
    }

    pub fn mark_visited(&mut self, point: &Point) {
        self.visited.set_point(*point, true);
        self.expanded += 1;
    }

    /// The weighted heuristic term of a point, zero in uniform-cost mode.
    pub fn heuristic(&self, point: &Point) -> Cost {
        self.heuristic.get_point(*point)
    }

    /// Recovers the g-cost of a popped entry by removing its heuristic term.
    pub fn g_cost(&self, entry: &FrontierEntry) -> Cost {
        entry.priority.saturating_sub(self.heuristic(&entry.point))
    }

    pub fn tentative_cost(&self, point: &Point) -> Cost {
        self.cost.get_point(*point)
    }

    pub fn predecessor(&self, point: &Point) -> Option<Point> {
        self.predecessors.get_point(*point)
    }

    /// Records `from` as predecessor of `to` and pushes `to` if `candidate` is strictly cheaper
    /// than its tentative cost. Returns whether the entry was pushed.
    pub fn relax(&mut self, from: Point, to: Point, candidate: Cost) -> bool {
        if candidate >= self.tentative_cost(&to) {
            return false;
        }
        self.cost.set_point(to, candidate);
        self.predecessors.set_point(to, Some(from));
        self.frontier.push(FrontierEntry {
            priority: candidate,
            point: to,
        });
        true
    }

    /// Read-only view of the frontier, including stale entries.
    pub fn frontier(&self) -> &BinaryHeap<FrontierEntry> {
        &self.frontier
    }

    pub fn predecessors(&self) -> &SimpleValueGrid<Option<Point>> {
        &self.predecessors
    }

    /// Number of points popped and marked visited so far.
    pub fn expanded(&self) -> usize {
        self.expanded
    }
}

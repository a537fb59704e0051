use grid_util::{Point, SimpleValueGrid, ValueGrid};

use crate::error::{PathfindingError, Result};
use crate::state::Cost;

/// Walks predecessor links back from `goal` until `start` and returns the points from start to
/// goal inclusive. A chain that leaves the grid, ends before `start` or runs longer than the
/// number of cells (a cycle) is reported as [PathfindingError::BrokenChain].
pub fn reconstruct(
    predecessors: &SimpleValueGrid<Option<Point>>,
    start: Point,
    goal: Point,
) -> Result<Vec<Point>> {
    let (w, h) = (predecessors.width(), predecessors.height());
    let in_bounds = |p: &Point| p.x >= 0 && p.y >= 0 && (p.x as usize) < w && (p.y as usize) < h;
    let limit = w * h;
    let mut path: Vec<Point> = std::iter::successors(Some(goal).filter(in_bounds), |p| {
        if *p == start {
            None
        } else {
            predecessors.get_point(*p).filter(in_bounds)
        }
    })
    .take(limit + 1)
    .collect();
    if path.last() != Some(&start) {
        return Err(PathfindingError::BrokenChain {
            goal,
            steps: path.len().saturating_sub(1),
        });
    }
    path.reverse();
    Ok(path)
}

/// Cost of a path with unit steps.
pub fn path_cost(path: &[Point]) -> Cost {
    path.len().saturating_sub(1) as Cost
}

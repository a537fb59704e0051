//! The unified best-first search. Uniform-cost search and weighted A* share one loop: the only
//! difference is whether the heuristic grid is filled or left at zero.
use grid_util::Point;
use log::debug;

use crate::error::{PathfindingError, Result};
use crate::grid::GridModel;
use crate::path::reconstruct;
use crate::state::{cost_bound, Cost, SearchState, INFINITY};
use crate::trace::{Trace, TraceOrder, TraceRecorder};
use crate::HEURISTIC_WEIGHT;

/// How a run ended. An exhausted frontier is an ordinary result, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Found(Vec<Point>),
    NoPathExists,
}

/// Result of one search: the outcome, the frontier trace and the number of expanded points.
#[derive(Clone, Debug)]
pub struct SearchRun {
    pub outcome: Outcome,
    pub trace: Trace,
    pub expanded: usize,
}

impl SearchRun {
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, Outcome::Found(_))
    }

    pub fn path(&self) -> Option<&[Point]> {
        match &self.outcome {
            Outcome::Found(path) => Some(path),
            Outcome::NoPathExists => None,
        }
    }

    /// Takes the path, turning an exhausted search into [PathfindingError::NoPathExists].
    pub fn into_path(self) -> Result<Vec<Point>> {
        match self.outcome {
            Outcome::Found(path) => Ok(path),
            Outcome::NoPathExists => Err(PathfindingError::NoPathExists),
        }
    }
}

/// Best-first search on a [GridModel] with unit step costs over the 4-neighbourhood.
///
/// With `heuristic_enabled` unset every priority is the plain g-cost and the search is
/// Dijkstra's algorithm, returning shortest paths. With it set, each priority additionally
/// includes `heuristic_weight * floor(euclid(point, goal))`. A weight above 1 makes the
/// heuristic inadmissible: fewer points are expanded but the returned path may be longer than
/// the shortest one.
#[derive(Clone, Debug)]
pub struct BestFirstSolver {
    pub heuristic_enabled: bool,
    pub heuristic_weight: Cost,
    pub trace_order: TraceOrder,
    /// Ends the search immediately with [Outcome::NoPathExists] (and an empty trace) when start
    /// and goal lie in different connected components.
    pub prune_unreachable: bool,
}

impl Default for BestFirstSolver {
    fn default() -> BestFirstSolver {
        BestFirstSolver::new(false)
    }
}

impl BestFirstSolver {
    pub fn new(heuristic_enabled: bool) -> BestFirstSolver {
        BestFirstSolver {
            heuristic_enabled,
            heuristic_weight: HEURISTIC_WEIGHT,
            trace_order: TraceOrder::PopOrder,
            prune_unreachable: false,
        }
    }
    pub fn dijkstra() -> BestFirstSolver {
        BestFirstSolver::new(false)
    }
    pub fn weighted_astar() -> BestFirstSolver {
        BestFirstSolver::new(true)
    }
    pub fn with_heuristic_weight(mut self, weight: Cost) -> Self {
        self.heuristic_weight = weight;
        self
    }
    pub fn with_trace_order(mut self, order: TraceOrder) -> Self {
        self.trace_order = order;
        self
    }
    pub fn with_prune_unreachable(mut self, prune: bool) -> Self {
        self.prune_unreachable = prune;
        self
    }

    fn weight(&self) -> Option<Cost> {
        self.heuristic_enabled.then_some(self.heuristic_weight)
    }

    fn mode(&self) -> &'static str {
        if self.heuristic_enabled {
            "weighted A*"
        } else {
            "uniform-cost"
        }
    }

    fn check_endpoint(grid: &GridModel, point: Point) -> Result<()> {
        let reason = if !grid.in_bounds(point) {
            "outside the grid"
        } else if !grid.passable(point) {
            "blocked cell"
        } else {
            return Ok(());
        };
        Err(PathfindingError::InvalidEndpoint { point, reason })
    }

    /// Every reachable priority must stay below [INFINITY], which marks unreached cells.
    fn check_weight(&self, grid: &GridModel, goal: &Point) -> Result<()> {
        let weight = self.weight().unwrap_or(0);
        match cost_bound(grid, goal, weight) {
            Some(bound) if bound < INFINITY => Ok(()),
            _ => Err(PathfindingError::WeightTooLarge {
                weight,
                rows: grid.rows(),
                cols: grid.cols(),
            }),
        }
    }

    /// Searches a path from `start` to `goal`. Endpoints that are out of bounds or blocked fail
    /// with [PathfindingError::InvalidEndpoint], and a heuristic weight that lets priorities
    /// overflow fails with [PathfindingError::WeightTooLarge], before any search work is done.
    pub fn solve(&self, grid: &GridModel, start: Point, goal: Point) -> Result<SearchRun> {
        Self::check_endpoint(grid, start)?;
        Self::check_endpoint(grid, goal)?;
        self.check_weight(grid, &goal)?;
        debug!("Searching {} to {} ({})", start, goal, self.mode());

        if self.prune_unreachable && grid.unreachable(&start, &goal) {
            debug!("{} and {} are on different components", start, goal);
            return Ok(SearchRun {
                outcome: Outcome::NoPathExists,
                trace: Trace::default(),
                expanded: 0,
            });
        }

        let mut state = SearchState::new(grid, goal, self.weight());
        let mut recorder = TraceRecorder::new(self.trace_order);
        state.seed(start);

        while let Some(entry) = state.pop() {
            let current = entry.point;
            // A point can be pushed several times when a cheaper route to it is found later.
            // Only the first pop is expanded, the stale entries are discarded.
            if state.is_visited(&current) {
                continue;
            }
            state.mark_visited(&current);
            recorder.record(current, state.frontier());

            if current == goal {
                let path = reconstruct(state.predecessors(), start, goal)?;
                debug!(
                    "Found path of {} points after {} expansions",
                    path.len(),
                    state.expanded()
                );
                return Ok(SearchRun {
                    outcome: Outcome::Found(path),
                    trace: recorder.finish(),
                    expanded: state.expanded(),
                });
            }

            let g = state.g_cost(&entry);
            for neighbour in grid.neighbours(current) {
                let candidate = g + 1 + state.heuristic(&neighbour);
                state.relax(current, neighbour, candidate);
            }
        }

        debug!(
            "Frontier exhausted after {} expansions, {} is not reachable from {}",
            state.expanded(),
            goal,
            start
        );
        Ok(SearchRun {
            outcome: Outcome::NoPathExists,
            trace: recorder.finish(),
            expanded: state.expanded(),
        })
    }
}

/// Runs a single search with the default weight and pop-ordered trace.
pub fn search(
    grid: &GridModel,
    start: Point,
    goal: Point,
    heuristic_enabled: bool,
) -> Result<SearchRun> {
    BestFirstSolver::new(heuristic_enabled).solve(grid, start, goal)
}

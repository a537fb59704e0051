use core::fmt;
use grid_util::{Point, SimpleValueGrid, ValueGrid};
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::coord;
use crate::error::{PathfindingError, Result};

/// Label of a single grid cell. The numeric codes are the ones used by grid files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellLabel {
    #[default]
    Free,
    Blocked,
    Start,
    Goal,
}

impl CellLabel {
    pub fn from_code(code: i64) -> Result<CellLabel> {
        match code {
            0 => Ok(CellLabel::Free),
            1 => Ok(CellLabel::Blocked),
            2 => Ok(CellLabel::Goal),
            3 => Ok(CellLabel::Start),
            other => Err(PathfindingError::UnknownCellCode(other)),
        }
    }
    pub fn code(self) -> i64 {
        match self {
            CellLabel::Free => 0,
            CellLabel::Blocked => 1,
            CellLabel::Goal => 2,
            CellLabel::Start => 3,
        }
    }
    /// Start and goal cells are walkable like free cells.
    pub fn is_passable(self) -> bool {
        self != CellLabel::Blocked
    }
    fn symbol(self) -> char {
        match self {
            CellLabel::Free => '.',
            CellLabel::Blocked => '#',
            CellLabel::Start => 'S',
            CellLabel::Goal => 'G',
        }
    }
}

/// Row and column offsets of the 4-neighbourhood in expansion order: down, up, right, left.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// [GridModel] is an immutable rows × cols array of [CellLabel]s. Points use `x` for the column
/// and `y` for the row. On construction the positions of the single start and goal cells are
/// validated and the 4-connected components of passable cells are computed with a [UnionFind]
/// structure, so reachability queries are cheap.
#[derive(Clone, Debug)]
pub struct GridModel {
    cells: SimpleValueGrid<CellLabel>,
    start: Point,
    goal: Point,
    components: UnionFind<usize>,
}

impl GridModel {
    /// Builds a grid from rows of labels. Fails if the grid is empty, if rows differ in length or
    /// if there is not exactly one start and one goal cell.
    pub fn from_rows(rows: Vec<Vec<CellLabel>>) -> Result<GridModel> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(PathfindingError::EmptyGrid);
        }
        let mut cells: SimpleValueGrid<CellLabel> =
            SimpleValueGrid::new(width, height, CellLabel::Free);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(PathfindingError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, label) in row.iter().enumerate() {
                cells.set(x as i32, y as i32, *label);
            }
        }
        let mut grid = GridModel {
            cells,
            start: Point::new(0, 0),
            goal: Point::new(0, 0),
            components: UnionFind::new(width * height),
        };
        grid.start = grid.locate(CellLabel::Start)?;
        grid.goal = grid.locate(CellLabel::Goal)?;
        grid.generate_components();
        Ok(grid)
    }

    /// Builds a grid from numeric cell codes (`0` free, `1` blocked, `2` goal, `3` start).
    pub fn from_codes(rows: &[Vec<i64>]) -> Result<GridModel> {
        let labels = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&code| CellLabel::from_code(code))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        GridModel::from_rows(labels)
    }

    pub fn rows(&self) -> usize {
        self.cells.height()
    }
    pub fn cols(&self) -> usize {
        self.cells.width()
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.cols()
            && (point.y as usize) < self.rows()
    }

    /// Whether a point is inside the grid and not blocked.
    pub fn passable(&self, point: Point) -> bool {
        self.in_bounds(point) && self.cells.get_point(point).is_passable()
    }

    pub fn label(&self, point: Point) -> Result<CellLabel> {
        if self.in_bounds(point) {
            Ok(self.cells.get_point(point))
        } else {
            Err(PathfindingError::OutOfBounds {
                point,
                rows: self.rows(),
                cols: self.cols(),
            })
        }
    }

    /// Finds the unique cell carrying `label`, scanning in row-major order.
    pub fn locate(&self, label: CellLabel) -> Result<Point> {
        let mut matches = self
            .points()
            .filter(|&point| self.cells.get_point(point) == label);
        let found = matches
            .next()
            .ok_or(PathfindingError::MissingLabel(label))?;
        if matches.next().is_some() {
            return Err(PathfindingError::DuplicateLabel(label));
        }
        Ok(found)
    }

    /// All points of the grid in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        iproduct!(0..self.rows() as i32, 0..self.cols() as i32).map(|(row, col)| coord(row, col))
    }

    /// The passable axis-aligned neighbours of `point`, in [NEIGHBOUR_OFFSETS] order.
    pub fn neighbours(&self, point: Point) -> SmallVec<[Point; 4]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|&(d_row, d_col)| coord(point.y + d_row, point.x + d_col))
            .filter(|&n| self.passable(n))
            .collect()
    }

    /// The numeric codes of every row, in file encoding.
    pub fn to_codes(&self) -> Vec<Vec<i64>> {
        (0..self.rows() as i32)
            .map(|row| {
                (0..self.cols() as i32)
                    .map(|col| self.cells.get_point(coord(row, col)).code())
                    .collect()
            })
            .collect()
    }

    fn ix(&self, point: Point) -> usize {
        point.y as usize * self.cols() + point.x as usize
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.ix(*point))
    }

    /// Checks if start and goal are passable and on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Blocked or out of bounds points
    /// are unreachable.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.passable(*start) && self.passable(*goal) {
            !self.components.equiv(self.ix(*start), self.ix(*goal))
        } else {
            true
        }
    }

    /// Links every passable cell to its passable right and lower neighbour.
    fn generate_components(&mut self) {
        debug!(
            "Generating connected components for {}x{} grid",
            self.rows(),
            self.cols()
        );
        self.components = UnionFind::new(self.rows() * self.cols());
        for point in self.points().collect::<Vec<_>>() {
            if !self.passable(point) {
                continue;
            }
            let parent_ix = self.ix(point);
            for neighbour in [coord(point.y + 1, point.x), coord(point.y, point.x + 1)] {
                if self.passable(neighbour) {
                    let ix = self.ix(neighbour);
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }
}

impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() as i32 {
            let line = (0..self.cols() as i32)
                .map(|col| self.cells.get_point(coord(row, col)).symbol())
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

use std::{collections::VecDeque, fmt};

use rand::Rng;
use smallvec::SmallVec;

use crate::{
    array::Array2D,
    dims::Dims,
    gameboard::cell::{Cell, CellPoint, CellState, CellWall, WallMask, INFINITE},
};

/// Upper bound (exclusive) of the per-cell weight used by the weighted growth generator.
pub const MAX_WEIGHT: u32 = 100;

pub type Neighbors = SmallVec<[Dims; 4]>;

/// Callback invoked after every observable mutation of a cell.
pub type Observer = Box<dyn FnMut(CellChange)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    State(CellState),
    Point(CellPoint),
    Walls(WallMask),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub pos: Dims,
    pub kind: ChangeKind,
}

/// Grid of cells together with the Start/End holders.
pub struct Board {
    pub(crate) cells: Array2D<Cell>,
    start: Option<Dims>,
    end: Option<Dims>,
    observers: Vec<Observer>,
}

impl Board {
    /// Creates a fully walled grid, each cell gets a weight in `[0, MAX_WEIGHT)` drawn from `rng`.
    pub fn new<R: Rng>(rows: usize, columns: usize, rng: &mut R) -> Self {
        Self {
            cells: Array2D::from_fn(rows, columns, |pos| {
                Cell::new(pos, rng.gen_range(0..MAX_WEIGHT))
            }),
            start: None,
            end: None,
            observers: Vec::new(),
        }
    }

    pub fn size(&self) -> Dims {
        self.cells.size()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        self.cells.contains(pos)
    }

    pub fn get_cells(&self) -> &Array2D<Cell> {
        &self.cells
    }

    pub fn get_cell(&self, pos: Dims) -> Option<&Cell> {
        self.cells.get(pos)
    }

    /// Panics when `pos` is outside of the grid.
    pub fn cell(&self, pos: Dims) -> &Cell {
        &self.cells[pos]
    }

    pub(crate) fn cell_mut(&mut self, pos: Dims) -> &mut Cell {
        &mut self.cells[pos]
    }

    pub(crate) fn subscribe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    pub(crate) fn take_observers(&mut self) -> Vec<Observer> {
        std::mem::take(&mut self.observers)
    }

    fn notify(&mut self, pos: Dims, kind: ChangeKind) {
        let change = CellChange { pos, kind };
        for observer in self.observers.iter_mut() {
            observer(change);
        }
    }

    pub fn which_wall_between(cell: Dims, cell2: Dims) -> Option<CellWall> {
        match (cell.0 - cell2.0, cell.1 - cell2.1) {
            (1, 0) => Some(CellWall::North),
            (-1, 0) => Some(CellWall::South),
            (0, -1) => Some(CellWall::East),
            (0, 1) => Some(CellWall::West),
            _ => None,
        }
    }

    /// Opens the walls between two adjacent cells, on both sides.
    ///
    /// Returns `false` and changes nothing if the cells are not grid-adjacent.
    pub fn connect(&mut self, a: Dims, b: Dims) -> bool {
        if !self.is_in_bounds(a) || !self.is_in_bounds(b) {
            return false;
        }

        let Some(wall) = Self::which_wall_between(a, b) else {
            return false;
        };

        self.cells[a].remove_wall(wall);
        self.cells[b].remove_wall(wall.reverse_wall());

        let (walls_a, walls_b) = (self.cells[a].walls, self.cells[b].walls);
        self.notify(a, ChangeKind::Walls(walls_a));
        self.notify(b, ChangeKind::Walls(walls_b));

        true
    }

    /// Adjacent and open from both sides. A cell is never connected to itself.
    pub fn is_connected(&self, a: Dims, b: Dims) -> bool {
        let Some(wall) = Self::which_wall_between(a, b) else {
            return false;
        };

        match (self.cells.get(a), self.cells.get(b)) {
            (Some(cell_a), Some(cell_b)) => {
                !cell_a.has_wall(wall) && !cell_b.has_wall(wall.reverse_wall())
            }
            _ => false,
        }
    }

    /// Grid-adjacent cells in the given state, scanned up, down, left, right.
    pub fn neighbors(&self, pos: Dims, state: CellState) -> Neighbors {
        CellWall::get_in_order()
            .into_iter()
            .map(|wall| pos + wall.to_coord())
            .filter(|&next| {
                self.cells
                    .get(next)
                    .is_some_and(|cell| cell.state == state)
            })
            .collect()
    }

    /// `Created` neighbors reachable through an open wall. Each of them is marked `Visiting`.
    pub fn connected_neighbors(&mut self, pos: Dims) -> Neighbors {
        let neighbors = self
            .neighbors(pos, CellState::Created)
            .into_iter()
            .filter(|&next| self.is_connected(pos, next))
            .collect::<Neighbors>();

        for &next in &neighbors {
            self.set_state(next, CellState::Visiting);
        }

        neighbors
    }

    pub fn set_state(&mut self, pos: Dims, state: CellState) {
        self.cells[pos].state = state;
        self.notify(pos, ChangeKind::State(state));
    }

    /// Assigns a role to a cell.
    ///
    /// Start and End are exclusive: the cell first drops its current role, then the previous
    /// holder of the requested role is cleared.
    pub fn set_point(&mut self, pos: Dims, point: CellPoint) {
        match point {
            CellPoint::None | CellPoint::Path => self.release_role(pos),
            CellPoint::Start => {
                self.release_role(pos);
                if let Some(old) = self.start {
                    self.set_point(old, CellPoint::None);
                }
                self.start = Some(pos);
            }
            CellPoint::End => {
                self.release_role(pos);
                if let Some(old) = self.end {
                    self.set_point(old, CellPoint::None);
                }
                self.end = Some(pos);
            }
        }

        self.cells[pos].point = point;
        self.notify(pos, ChangeKind::Point(point));
    }

    fn release_role(&mut self, pos: Dims) {
        if self.is_start(pos) {
            self.start = None;
        }
        if self.is_end(pos) {
            self.end = None;
        }
    }

    pub fn start(&self) -> Option<Dims> {
        self.start
    }

    pub fn end(&self) -> Option<Dims> {
        self.end
    }

    pub fn has_start(&self) -> bool {
        self.start.is_some()
    }

    pub fn has_end(&self) -> bool {
        self.end.is_some()
    }

    pub fn has_start_and_end(&self) -> bool {
        self.has_start() && self.has_end()
    }

    pub fn is_start(&self, pos: Dims) -> bool {
        self.start == Some(pos)
    }

    pub fn is_end(&self, pos: Dims) -> bool {
        self.end == Some(pos)
    }

    pub fn is_start_or_end(&self, pos: Dims) -> bool {
        self.is_start(pos) || self.is_end(pos)
    }

    /// Prepares solver working values: distances become infinite and the heuristic is
    /// recomputed as twice the Manhattan distance to End (zero when there is no End).
    pub fn set_distance(&mut self) {
        let end = self.end;
        for cell in self.cells.iter_mut() {
            cell.distance = INFINITE;
            cell.root_distance = INFINITE;
            cell.manhattan_distance = end
                .map(|end| 2 * cell.coord.manhattan(end) as u32)
                .unwrap_or(0);
        }
    }

    pub fn reset_parents(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.parent = None;
        }
    }

    /// Every cell back to `Created`, every role except Start and End cleared, parent links dropped.
    pub fn refresh(&mut self) {
        self.reset_parents();
        for pos in Dims::iter_fill(self.size()) {
            if !self.is_start_or_end(pos) {
                self.set_point(pos, CellPoint::None);
            }
            self.set_state(pos, CellState::Created);
        }
    }

    pub fn clear_start_and_end(&mut self) {
        if let Some(start) = self.start {
            self.set_point(start, CellPoint::None);
        }
        if let Some(end) = self.end {
            self.set_point(end, CellPoint::None);
        }
    }

    /// Hop count of the parent chain from End back to Start, if it reaches Start.
    pub fn path_length(&self) -> Option<usize> {
        let (start, end) = (self.start?, self.end?);

        let mut current = end;
        let mut hops = 0;
        while current != start {
            current = self.cells.get(current)?.parent?;
            hops += 1;
            if hops > self.cell_count() {
                return None;
            }
        }

        Some(hops)
    }

    /// Positions currently holding the `Path` role, in row-major order.
    pub fn path_cells(&self) -> Vec<Dims> {
        self.cells
            .iter()
            .filter(|cell| cell.point == CellPoint::Path)
            .map(|cell| cell.coord)
            .collect()
    }

    /// Number of open adjacencies, each counted once.
    pub fn open_edge_count(&self) -> usize {
        Dims::iter_fill(self.size())
            .map(|pos| {
                [CellWall::South, CellWall::East]
                    .into_iter()
                    .filter(|wall| self.is_connected(pos, pos + wall.to_coord()))
                    .count()
            })
            .sum()
    }

    /// Whether the open walls form a single tree touching every cell.
    pub fn is_spanning_tree(&self) -> bool {
        let count = self.cell_count();
        if count == 0 || self.open_edge_count() != count - 1 {
            return false;
        }

        let mut seen = Array2D::new(false, self.cells.rows(), self.cells.columns());
        let mut queue = VecDeque::from([Dims::ZERO]);
        seen[Dims::ZERO] = true;
        let mut reached = 1;

        while let Some(pos) = queue.pop_front() {
            for wall in CellWall::get_in_order() {
                let next = pos + wall.to_coord();
                if self.is_connected(pos, next) && !seen[next] {
                    seen[next] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }

        reached == count
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size())
            .field("start", &self.start)
            .field("end", &self.end)
            .field("observers", &self.observers.len())
            .finish()
    }
}

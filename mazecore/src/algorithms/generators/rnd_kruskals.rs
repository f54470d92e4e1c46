use rand::Rng as _;

use super::Random;
use crate::{
    algorithms::{MazeAlgorithm, Step},
    dims::Dims,
    gameboard::{Board, CellState, CellWall},
    maze::MazeError,
    progress::Progress,
};

/// Randomized Kruskal's algorithm.
///
/// Every adjacency (a cell and the one below it, a cell and the one right of it) is a candidate
/// edge. Candidates are drawn at random and opened when they join two different groups.
#[derive(Debug)]
pub struct RndKruskals {
    linkers: Vec<(Dims, Dims)>,
    groups: Vec<Vec<Dims>>,
    current: Option<usize>,
    progress: Progress,
}

impl RndKruskals {
    pub fn new(board: &mut Board) -> Self {
        let size = board.size();
        let mut linkers = Vec::with_capacity(board.cell_count() * 2);
        let mut groups = Vec::with_capacity(board.cell_count());

        for (id, pos) in Dims::iter_fill(size).enumerate() {
            board.cell_mut(pos).group = id;
            groups.push(vec![pos]);

            for wall in [CellWall::South, CellWall::East] {
                let next = pos + wall.to_coord();
                if board.is_in_bounds(next) {
                    linkers.push((pos, next));
                }
            }
        }

        Self {
            linkers,
            groups,
            current: None,
            progress: Progress::new(0, board.cell_count().saturating_sub(1)),
        }
    }

    /// Moves the smaller id group into the bigger id one.
    fn merge(&mut self, board: &mut Board, a: usize, b: usize) {
        let (from, into) = if a < b { (a, b) } else { (b, a) };

        let moved = std::mem::take(&mut self.groups[from]);
        for &pos in &moved {
            board.cell_mut(pos).group = into;
        }
        self.groups[into].extend(moved);
    }

    fn link(&mut self, board: &mut Board, index: usize) {
        let (a, b) = self.linkers.swap_remove(index);
        let (group_a, group_b) = (board.cell(a).group, board.cell(b).group);

        if group_a != group_b {
            board.connect(a, b);
            self.merge(board, group_a, group_b);
            self.progress.done += 1;
        }

        board.set_state(a, CellState::Created);
        board.set_state(b, CellState::Created);
    }
}

impl MazeAlgorithm for RndKruskals {
    fn step(&mut self, board: &mut Board, rng: &mut Random) -> Result<Step, MazeError> {
        if let Some(index) = self.current.take() {
            self.link(board, index);
        }

        if self.linkers.is_empty() {
            // a single cell has nothing to link
            for pos in Dims::iter_fill(board.size()) {
                if board.cell(pos).state() != CellState::Created {
                    board.set_state(pos, CellState::Created);
                }
            }
            self.progress.finish();
            return Ok(Step::Done);
        }

        let index = rng.gen_range(0..self.linkers.len());
        let (a, b) = self.linkers[index];

        let (created_a, created_b) = (
            board.cell(a).state() == CellState::Created,
            board.cell(b).state() == CellState::Created,
        );
        if created_a && !created_b {
            board.cell_mut(b).depth = board.cell(a).depth + 1;
        } else if created_b && !created_a {
            board.cell_mut(a).depth = board.cell(b).depth + 1;
        }

        board.set_state(a, CellState::Visited);
        board.set_state(b, CellState::Visited);
        self.current = Some(index);

        Ok(Step::Continue)
    }

    fn progress(&self) -> Progress {
        self.progress
    }
}

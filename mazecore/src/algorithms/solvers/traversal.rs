use std::{collections::VecDeque, fmt};

use super::{endpoints, PathReplay};
use crate::{
    algorithms::{MazeAlgorithm, Random, Step},
    dims::Dims,
    gameboard::{Board, CellState},
    maze::MazeError,
    progress::Progress,
};

/// Container of discovered cells; its take order is the only difference between DFS and BFS.
pub trait Frontier: Default + fmt::Debug {
    fn put(&mut self, pos: Dims);

    fn take(&mut self) -> Option<Dims>;
}

impl Frontier for Vec<Dims> {
    fn put(&mut self, pos: Dims) {
        self.push(pos);
    }

    fn take(&mut self) -> Option<Dims> {
        self.pop()
    }
}

impl Frontier for VecDeque<Dims> {
    fn put(&mut self, pos: Dims) {
        self.push_back(pos);
    }

    fn take(&mut self) -> Option<Dims> {
        self.pop_front()
    }
}

/// Uninformed search from Start that stops once End is taken out of the frontier.
#[derive(Debug)]
pub struct Traversal<F: Frontier> {
    frontier: F,
    current: Option<Dims>,
    replay: Option<PathReplay>,
    progress: Progress,
}

/// Stack frontier, the first path found wins.
pub type DepthFirst = Traversal<Vec<Dims>>;

/// Queue frontier, finds a path with the fewest hops.
pub type BreadthFirst = Traversal<VecDeque<Dims>>;

impl<F: Frontier> Traversal<F> {
    pub fn new(board: &mut Board) -> Result<Self, MazeError> {
        let (start, _) = endpoints(board)?;
        board.reset_parents();

        let mut frontier = F::default();
        frontier.put(start);

        Ok(Self {
            frontier,
            current: None,
            replay: None,
            progress: Progress::new(0, board.cell_count()),
        })
    }

    fn expand(&mut self, board: &mut Board, cell: Dims) {
        for next in board.connected_neighbors(cell) {
            board.cell_mut(next).parent = Some(cell);
            self.frontier.put(next);
        }
    }
}

impl<F: Frontier> MazeAlgorithm for Traversal<F> {
    fn step(&mut self, board: &mut Board, _: &mut Random) -> Result<Step, MazeError> {
        if let Some(replay) = self.replay.as_mut() {
            let step = replay.step(board)?;
            if step == Step::Done {
                self.progress.finish();
            }
            return Ok(step);
        }

        if let Some(cell) = self.current.take() {
            self.expand(board, cell);
        }

        let cell = self.frontier.take().ok_or(MazeError::EndUnreachable)?;
        board.set_state(cell, CellState::Visited);
        self.progress.done += 1;

        if board.is_end(cell) {
            self.replay = Some(PathReplay::new(board)?);
        } else {
            self.current = Some(cell);
        }

        Ok(Step::Continue)
    }

    fn progress(&self) -> Progress {
        self.progress
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        algorithms::SolverKind,
        dims::Dims,
        gameboard::{CellPoint, CellState},
    };

    use super::super::tests::{corridor, generated, solve};

    #[test]
    fn corridor_takes_one_step_per_cell_and_path_cell() {
        let mut board = corridor(5);
        // five cells visited, three path cells marked
        assert_eq!(solve(SolverKind::BreadthFirst, &mut board), Ok(8));
        assert!(board
            .get_cells()
            .iter()
            .all(|cell| cell.state() == CellState::Visited));
    }

    #[test]
    fn both_traversals_find_the_only_path() {
        // a perfect maze has exactly one simple path between two cells
        for seed in 0..5 {
            let mut dfs = generated(9, 11, seed);
            let mut bfs = generated(9, 11, seed);
            solve(SolverKind::DepthFirst, &mut dfs).unwrap();
            solve(SolverKind::BreadthFirst, &mut bfs).unwrap();

            assert_eq!(dfs.path_length(), bfs.path_length());
            assert_eq!(dfs.path_cells(), bfs.path_cells());
        }
    }

    #[test]
    fn adjacent_endpoints_mark_nothing() {
        let mut board = corridor(2);
        solve(SolverKind::DepthFirst, &mut board).unwrap();

        assert!(board.path_cells().is_empty());
        assert_eq!(board.path_length(), Some(1));
        assert_eq!(board.cell(Dims(0, 1)).point(), CellPoint::End);
    }
}

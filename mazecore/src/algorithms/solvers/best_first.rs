use std::fmt;

use log::trace;

use super::{endpoints, PathReplay};
use crate::{
    algorithms::{MazeAlgorithm, Random, Step},
    dims::Dims,
    gameboard::{Board, CellState},
    maze::MazeError,
    priority_queue::PriorityQueue,
    progress::Progress,
};

/// Distance bookkeeping of a best-first search.
pub trait Relaxation: Default + fmt::Debug {
    /// Initializes Start and returns its queue priority.
    fn seed(&self, board: &mut Board, start: Dims) -> u32;

    /// Offers `next` a route through `cell`.
    ///
    /// Returns the new priority of `next` if the route improved it.
    fn relax(&self, board: &mut Board, cell: Dims, next: Dims) -> Option<u32>;
}

/// Orders by hops walked from Start.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl Relaxation for Dijkstra {
    fn seed(&self, board: &mut Board, start: Dims) -> u32 {
        board.cell_mut(start).distance = 0;
        0
    }

    fn relax(&self, board: &mut Board, cell: Dims, next: Dims) -> Option<u32> {
        let through = board.cell(cell).distance.saturating_add(1);
        let next = board.cell_mut(next);

        (through < next.distance).then(|| {
            next.distance = through;
            through
        })
    }
}

/// Orders by hops walked plus twice the Manhattan distance left to End.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl Relaxation for AStar {
    fn seed(&self, board: &mut Board, start: Dims) -> u32 {
        let start = board.cell_mut(start);
        start.root_distance = 0;
        start.distance = start.manhattan_distance;
        start.distance
    }

    fn relax(&self, board: &mut Board, cell: Dims, next: Dims) -> Option<u32> {
        let through = board.cell(cell).root_distance.saturating_add(1);
        let next = board.cell_mut(next);

        next.root_distance = next.root_distance.min(through);
        let estimate = next.root_distance.saturating_add(next.manhattan_distance);

        (estimate < next.distance).then(|| {
            next.distance = estimate;
            estimate
        })
    }
}

/// Priority queue search, End is final once it is dequeued.
#[derive(Debug)]
pub struct BestFirst<R: Relaxation> {
    queue: PriorityQueue<Dims>,
    relaxation: R,
    current: Option<Dims>,
    replay: Option<PathReplay>,
    progress: Progress,
}

pub type DijkstraSolver = BestFirst<Dijkstra>;

pub type AStarSolver = BestFirst<AStar>;

impl<R: Relaxation> BestFirst<R> {
    pub fn new(board: &mut Board) -> Result<Self, MazeError> {
        let (start, _) = endpoints(board)?;
        board.reset_parents();
        board.set_distance();

        let relaxation = R::default();
        let mut queue = PriorityQueue::new_min();
        queue.enqueue(start, relaxation.seed(board, start));

        Ok(Self {
            queue,
            relaxation,
            current: None,
            replay: None,
            progress: Progress::new(0, board.cell_count()),
        })
    }

    fn expand(&mut self, board: &mut Board, cell: Dims) {
        for next in board.connected_neighbors(cell) {
            match self.relaxation.relax(board, cell, next) {
                Some(priority) => {
                    board.cell_mut(next).parent = Some(cell);
                    if !self.queue.update_priority(&next, priority) {
                        self.queue.enqueue(next, priority);
                    }
                }
                None if !self.queue.contains(&next) => {
                    self.queue.enqueue(next, board.cell(next).distance);
                }
                None => {}
            }
        }
    }
}

impl<R: Relaxation> MazeAlgorithm for BestFirst<R> {
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

        if self.queue.is_empty() {
            return Err(MazeError::EndUnreachable);
        }
        let cell = self.queue.dequeue()?;
        trace!("dequeued {:?} at {}", cell, board.cell(cell).distance);

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
    use rand::SeedableRng as _;

    use super::*;
    use crate::{
        algorithms::SolverKind,
        gameboard::{CellPoint, INFINITE},
    };

    use super::super::tests::{corridor, generated, solve};

    #[test]
    fn dijkstra_distances_count_hops() {
        let mut board = corridor(6);
        solve(SolverKind::Dijkstra, &mut board).unwrap();

        for column in 0..6 {
            assert_eq!(board.cell(Dims(0, column)).distance(), column as u32);
        }
    }

    #[test]
    fn astar_ranks_by_scaled_heuristic() {
        let mut board = corridor(4);
        board.set_distance();
        board.cell_mut(Dims(0, 0)).root_distance = 0;

        let priority = AStar.relax(&mut board, Dims(0, 0), Dims(0, 1));
        // one hop walked, two hops left, each counted twice
        assert_eq!(priority, Some(1 + 4));
        assert_eq!(board.cell(Dims(0, 1)).root_distance(), 1);
        assert_eq!(AStar.relax(&mut board, Dims(0, 0), Dims(0, 1)), None);
    }

    #[test]
    fn astar_reaches_end() {
        for seed in 0..6 {
            let mut board = generated(14, 10, seed);
            solve(SolverKind::AStar, &mut board).unwrap();

            assert!(board.path_length().is_some(), "seed {seed}");
            assert_eq!(board.cell(board.end().unwrap()).point(), CellPoint::End);
        }
    }

    #[test]
    fn unreached_cells_keep_infinite_distance() {
        let mut rng = Random::seed_from_u64(1);
        let mut board = generated(8, 8, 1);
        let mut solver = DijkstraSolver::new(&mut board).unwrap();
        solver.step(&mut board, &mut rng).unwrap();

        let reached = board
            .get_cells()
            .iter()
            .filter(|cell| cell.distance() != INFINITE)
            .count();
        assert_eq!(reached, 1);
    }
}

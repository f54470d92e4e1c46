mod best_first;
mod traversal;

pub use best_first::{AStar, AStarSolver, BestFirst, Dijkstra, DijkstraSolver, Relaxation};
pub use traversal::{BreadthFirst, DepthFirst, Frontier, Traversal};

use crate::{
    algorithms::Step,
    dims::Dims,
    gameboard::{Board, CellPoint},
    maze::MazeError,
};

fn endpoints(board: &Board) -> Result<(Dims, Dims), MazeError> {
    match (board.start(), board.end()) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(MazeError::MissingEndpoints),
    }
}

/// Walks the parent links from End back to Start, one `Path` cell per step.
#[derive(Debug)]
pub(crate) struct PathReplay {
    next: Dims,
    start: Dims,
    marked: usize,
}

impl PathReplay {
    pub(crate) fn new(board: &Board) -> Result<Self, MazeError> {
        let (start, end) = endpoints(board)?;
        let next = board.cell(end).parent.ok_or(MazeError::BrokenPath(end))?;

        Ok(Self {
            next,
            start,
            marked: 0,
        })
    }

    pub(crate) fn step(&mut self, board: &mut Board) -> Result<Step, MazeError> {
        if self.next == self.start {
            return Ok(Step::Done);
        }
        // a chain longer than the grid has a cycle in it
        if self.marked >= board.cell_count() {
            return Err(MazeError::BrokenPath(self.next));
        }

        let pos = self.next;
        board.set_point(pos, CellPoint::Path);
        self.marked += 1;
        self.next = board.cell(pos).parent.ok_or(MazeError::BrokenPath(pos))?;

        Ok(Step::Continue)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use rand::SeedableRng as _;

    use crate::{
        algorithms::{GeneratorKind, MazeAlgorithm, Random, SolverKind, Step},
        dims::Dims,
        gameboard::{Board, CellPoint, CellState, WallMask},
        maze::MazeError,
    };

    /// Fully generated board with Start top-left and End bottom-right.
    pub fn generated(rows: usize, columns: usize, seed: u64) -> Board {
        let mut rng = Random::seed_from_u64(seed);
        let mut board = Board::new(rows, columns, &mut rng);
        let mut generator = GeneratorKind::DepthFirstSearch.start(&mut board, &mut rng);
        while generator.step(&mut board, &mut rng).unwrap() == Step::Continue {}

        board.set_point(Dims::ZERO, CellPoint::Start);
        board.set_point(Dims(rows as i32 - 1, columns as i32 - 1), CellPoint::End);
        board
    }

    /// Open corridor of a single row, already in the `Created` state.
    pub fn corridor(columns: usize) -> Board {
        let mut board = Board::new(1, columns, &mut Random::seed_from_u64(0));
        for column in 0..columns as i32 {
            board.set_state(Dims(0, column), CellState::Created);
            board.connect(Dims(0, column), Dims(0, column + 1));
        }
        board.set_point(Dims::ZERO, CellPoint::Start);
        board.set_point(Dims(0, columns as i32 - 1), CellPoint::End);
        board
    }

    /// Runs a solver to completion, returns the number of steps taken.
    pub fn solve(kind: SolverKind, board: &mut Board) -> Result<usize, MazeError> {
        let mut rng = Random::seed_from_u64(0);
        let mut solver = kind.start(board)?;

        let mut steps = 0;
        while solver.step(board, &mut rng)? == Step::Continue {
            steps += 1;
            assert!(steps <= 3 * board.cell_count(), "{kind} does not terminate");
        }
        assert!(solver.progress().is_done);

        Ok(steps)
    }

    #[test]
    fn every_solver_walks_the_corridor() {
        for kind in SolverKind::ALL {
            let mut board = corridor(5);
            solve(kind, &mut board).unwrap();

            assert_eq!(board.path_length(), Some(4), "{kind}");
            assert_eq!(board.path_cells(), [Dims(0, 1), Dims(0, 2), Dims(0, 3)]);
            assert_eq!(board.cell(Dims(0, 0)).point(), CellPoint::Start);
            assert_eq!(board.cell(Dims(0, 4)).point(), CellPoint::End);
        }
    }

    #[test]
    fn path_is_connected_chain() {
        for kind in SolverKind::ALL {
            let mut board = generated(12, 9, 4);
            solve(kind, &mut board).unwrap();

            let mut pos = board.end().unwrap();
            while let Some(parent) = board.cell(pos).parent() {
                assert!(board.is_connected(pos, parent), "{kind} {pos:?}");
                if board.is_start(parent) {
                    break;
                }
                assert_eq!(board.cell(parent).point(), CellPoint::Path);
                pos = parent;
            }
            assert_eq!(board.path_cells().len() + 1, board.path_length().unwrap());
        }
    }

    #[test]
    fn shortest_path_solvers_agree() {
        for seed in 0..6 {
            let mut bfs = generated(10, 10, seed);
            let mut dijkstra = generated(10, 10, seed);
            solve(SolverKind::BreadthFirst, &mut bfs).unwrap();
            solve(SolverKind::Dijkstra, &mut dijkstra).unwrap();

            assert_eq!(bfs.path_length(), dijkstra.path_length(), "seed {seed}");
        }
    }

    #[test]
    fn walled_end_is_unreachable() {
        for kind in SolverKind::ALL {
            let mut board = corridor(3);
            board.cell_mut(Dims(0, 2)).walls = WallMask::FULL;

            assert_eq!(solve(kind, &mut board), Err(MazeError::EndUnreachable));
        }
    }

    #[test]
    fn missing_endpoints_are_rejected() {
        let mut board = corridor(3);
        board.set_point(Dims(0, 2), CellPoint::None);

        assert_eq!(
            SolverKind::BreadthFirst.start(&mut board).err(),
            Some(MazeError::MissingEndpoints)
        );
    }
}

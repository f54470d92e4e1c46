use std::{fmt, thread, time::Duration};

use log::{debug, info, trace};
use rand::{thread_rng, Rng as _, SeedableRng as _};
use thiserror::Error;

use crate::{
    algorithms::{GeneratorKind, MazeAlgorithm, Random, SolverKind, Step},
    dims::Dims,
    gameboard::{Board, CellChange, CellPoint},
    priority_queue::QueueError,
    progress::Progress,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("invalid maze size {0:?}, both dimensions must be positive")]
    InvalidSize(Dims),
    #[error("cannot {action} while the maze is {state}")]
    InvalidState {
        action: &'static str,
        state: MazeState,
    },
    #[error("both Start and End have to be set")]
    MissingEndpoints,
    #[error("position {0:?} is outside of the maze")]
    OutOfBounds(Dims),
    #[error("End cannot be reached from Start")]
    EndUnreachable,
    #[error("parent chain from End is broken at {0:?}")]
    BrokenPath(Dims),
    #[error(transparent)]
    Queue(#[from] QueueError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MazeState {
    #[default]
    Empty,
    Running,
    Completed,
    HasPath,
}

impl fmt::Display for MazeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "empty",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::HasPath => "solved",
        })
    }
}

/// Grid of cells together with the state machine gating what may run on it.
///
/// ```text
/// Empty --generate--> Running --> Completed --solve--> Running --> HasPath
/// ```
///
/// `reset` and `refresh` bring a Completed or solved maze back to Completed, `resize` always
/// yields a new Empty maze.
#[derive(Debug)]
pub struct Maze {
    board: Board,
    state: MazeState,
    delay: Duration,
    rng: Random,
    seed: u64,
}

impl Maze {
    /// Fresh, fully walled maze. Without a seed one is drawn from the thread rng.
    pub fn new(rows: usize, columns: usize, seed: Option<u64>) -> Result<Self, MazeError> {
        let seed = seed.unwrap_or_else(|| thread_rng().gen());
        let mut rng = Random::seed_from_u64(seed);
        let board = Self::new_board(rows, columns, &mut rng)?;
        debug!("new {rows}x{columns} maze, seed {seed}");

        Ok(Self {
            board,
            state: MazeState::Empty,
            delay: Duration::ZERO,
            rng,
            seed,
        })
    }

    fn new_board(rows: usize, columns: usize, rng: &mut Random) -> Result<Board, MazeError> {
        if rows == 0 || columns == 0 || rows > i32::MAX as usize || columns > i32::MAX as usize {
            return Err(MazeError::InvalidSize(Dims(rows as i32, columns as i32)));
        }

        Ok(Board::new(rows, columns, rng))
    }

    /// Rebuilds the grid, dropping walls, roles and the path. Observers stay subscribed.
    ///
    /// This is the only way out of a run that failed or was abandoned.
    pub fn resize(&mut self, rows: usize, columns: usize) -> Result<(), MazeError> {
        let mut board = Self::new_board(rows, columns, &mut self.rng)?;
        for observer in self.board.take_observers() {
            board.subscribe(observer);
        }

        self.board = board;
        self.set_state(MazeState::Empty);

        Ok(())
    }

    /// Starts carving the maze. Only allowed on an Empty maze.
    pub fn generate(&mut self, kind: GeneratorKind) -> Result<Run<'_>, MazeError> {
        self.check_state("generate", &[MazeState::Empty])?;

        let algorithm = kind.start(&mut self.board, &mut self.rng);
        self.set_state(MazeState::Running);

        Ok(Run::new(self, algorithm, kind.name(), MazeState::Completed))
    }

    /// Starts searching from Start to End. Only allowed on a Completed maze with both set.
    pub fn solve(&mut self, kind: SolverKind) -> Result<Run<'_>, MazeError> {
        self.check_state("solve", &[MazeState::Completed])?;
        if !self.board.has_start_and_end() {
            return Err(MazeError::MissingEndpoints);
        }

        let algorithm = kind.start(&mut self.board)?;
        self.set_state(MazeState::Running);

        Ok(Run::new(self, algorithm, kind.name(), MazeState::HasPath))
    }

    /// Clears visitation and the path, keeping Start and End.
    pub fn refresh(&mut self) -> Result<(), MazeError> {
        self.check_state("refresh", &[MazeState::Completed, MazeState::HasPath])?;

        self.board.refresh();
        self.set_state(MazeState::Completed);

        Ok(())
    }

    /// Like [`Maze::refresh`], but Start and End are cleared as well.
    pub fn reset(&mut self) -> Result<(), MazeError> {
        self.check_state("reset", &[MazeState::Completed, MazeState::HasPath])?;

        self.board.refresh();
        self.board.clear_start_and_end();
        self.set_state(MazeState::Completed);

        Ok(())
    }

    pub fn set_start(&mut self, pos: Dims) -> Result<(), MazeError> {
        self.assign(pos, CellPoint::Start)
    }

    pub fn set_end(&mut self, pos: Dims) -> Result<(), MazeError> {
        self.assign(pos, CellPoint::End)
    }

    /// Takes Start or End away from the cell, if it holds one.
    pub fn clear_point(&mut self, pos: Dims) -> Result<(), MazeError> {
        self.check_assignable(pos)?;

        if self.board.is_start_or_end(pos) {
            self.board.set_point(pos, CellPoint::None);
        }

        Ok(())
    }

    fn assign(&mut self, pos: Dims, point: CellPoint) -> Result<(), MazeError> {
        self.check_assignable(pos)?;

        debug!("{point:?} set to {pos:?}");
        self.board.set_point(pos, point);

        Ok(())
    }

    fn check_assignable(&self, pos: Dims) -> Result<(), MazeError> {
        self.check_state("change Start or End", &[MazeState::Completed])?;
        if !self.board.is_in_bounds(pos) {
            return Err(MazeError::OutOfBounds(pos));
        }

        Ok(())
    }

    fn check_state(&self, action: &'static str, allowed: &[MazeState]) -> Result<(), MazeError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(MazeError::InvalidState {
                action,
                state: self.state,
            })
        }
    }

    fn set_state(&mut self, state: MazeState) {
        debug!("maze {} -> {}", self.state, state);
        self.state = state;
    }

    /// Registers a callback invoked after every change of a cell.
    pub fn subscribe(&mut self, observer: impl FnMut(CellChange) + 'static) {
        self.board.subscribe(Box::new(observer));
    }

    pub fn state(&self) -> MazeState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Dims {
        self.board.size()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Pause between two steps of [`Run::finish_paced`].
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn is_empty(&self) -> bool {
        self.state == MazeState::Empty
    }

    pub fn is_running(&self) -> bool {
        self.state == MazeState::Running
    }

    pub fn is_completed(&self) -> bool {
        self.state == MazeState::Completed
    }

    pub fn has_path(&self) -> bool {
        self.state == MazeState::HasPath
    }

    pub fn has_start(&self) -> bool {
        self.board.has_start()
    }

    pub fn has_end(&self) -> bool {
        self.board.has_end()
    }

    pub fn has_start_and_end(&self) -> bool {
        self.board.has_start_and_end()
    }
}

/// A generator or solver in progress.
///
/// Holds the maze mutably, so nothing else can touch it until the run is dropped. The maze
/// reaches its next state on the step that returns [`Step::Done`]; a run dropped before that,
/// or one that failed, leaves the maze `Running` until [`Maze::resize`].
#[derive(Debug)]
pub struct Run<'a> {
    maze: &'a mut Maze,
    algorithm: Box<dyn MazeAlgorithm>,
    name: &'static str,
    goal: MazeState,
    steps: usize,
    finished: bool,
}

impl<'a> Run<'a> {
    fn new(
        maze: &'a mut Maze,
        algorithm: Box<dyn MazeAlgorithm>,
        name: &'static str,
        goal: MazeState,
    ) -> Self {
        debug!("{name} started");

        Self {
            maze,
            algorithm,
            name,
            goal,
            steps: 0,
            finished: false,
        }
    }

    /// Applies one discrete change. Does nothing once the run is finished.
    pub fn step(&mut self) -> Result<Step, MazeError> {
        if self.finished {
            return Ok(Step::Done);
        }

        let step = match self.algorithm.step(&mut self.maze.board, &mut self.maze.rng) {
            Ok(step) => step,
            Err(err) => {
                self.finished = true;
                return Err(err);
            }
        };

        match step {
            Step::Continue => {
                self.steps += 1;
                trace!("{} step {}", self.name, self.steps);
            }
            Step::Done => {
                self.finished = true;
                self.maze.set_state(self.goal);
                info!("{} finished after {} steps", self.name, self.steps);
            }
        }

        Ok(step)
    }

    /// Runs every remaining step, returns the total step count.
    pub fn finish(mut self) -> Result<usize, MazeError> {
        while self.step()? == Step::Continue {}
        Ok(self.steps)
    }

    /// Same as [`Run::finish`] with the maze's delay slept after every step.
    pub fn finish_paced(mut self) -> Result<usize, MazeError> {
        let delay = self.maze.delay;
        while self.step()? == Step::Continue {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
        Ok(self.steps)
    }

    pub fn progress(&self) -> Progress {
        self.algorithm.progress()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn board(&self) -> &Board {
        &self.maze.board
    }
}

/// Yields the progress after every step that did not finish the run.
impl Iterator for Run<'_> {
    type Item = Result<Progress, MazeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(Step::Continue) => Some(Ok(self.progress())),
            Ok(Step::Done) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::gameboard::{CellState, ChangeKind};

    fn generated(rows: usize, columns: usize) -> Maze {
        let mut maze = Maze::new(rows, columns, Some(17)).unwrap();
        maze.generate(GeneratorKind::DepthFirstSearch)
            .unwrap()
            .finish()
            .unwrap();
        maze
    }

    fn solved(rows: usize, columns: usize) -> Maze {
        let mut maze = generated(rows, columns);
        maze.set_start(Dims(0, 0)).unwrap();
        maze.set_end(Dims(rows as i32 - 1, columns as i32 - 1))
            .unwrap();
        maze.solve(SolverKind::BreadthFirst)
            .unwrap()
            .finish()
            .unwrap();
        maze
    }

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(
            Maze::new(0, 4, None).err(),
            Some(MazeError::InvalidSize(Dims(0, 4)))
        );

        let mut maze = Maze::new(2, 2, None).unwrap();
        assert_eq!(maze.resize(3, 0), Err(MazeError::InvalidSize(Dims(3, 0))));
        assert_eq!(maze.size(), Dims(2, 2));
    }

    #[test]
    fn goes_through_every_state() {
        let mut maze = Maze::new(4, 4, Some(1)).unwrap();
        assert!(maze.is_empty());

        let mut run = maze.generate(GeneratorKind::GrowingTree).unwrap();
        assert_eq!(run.step(), Ok(Step::Continue));
        assert!(!run.is_finished());
        drop(run);
        assert!(maze.is_running());

        let mut maze = generated(4, 4);
        assert!(maze.is_completed());

        maze.set_start(Dims(0, 0)).unwrap();
        maze.set_end(Dims(3, 3)).unwrap();
        maze.solve(SolverKind::Dijkstra).unwrap().finish().unwrap();
        assert!(maze.has_path());

        maze.refresh().unwrap();
        assert!(maze.is_completed());
        assert!(maze.has_start_and_end());

        maze.reset().unwrap();
        assert!(maze.is_completed());
        assert!(!maze.has_start() && !maze.has_end());

        maze.resize(5, 6).unwrap();
        assert!(maze.is_empty());
        assert_eq!(maze.size(), Dims(5, 6));
    }

    #[test]
    fn operations_are_gated_by_state() {
        let mut maze = Maze::new(3, 3, Some(2)).unwrap();
        assert_eq!(
            maze.solve(SolverKind::AStar).err(),
            Some(MazeError::InvalidState {
                action: "solve",
                state: MazeState::Empty
            })
        );
        assert!(maze.reset().is_err());
        assert!(maze.set_start(Dims(0, 0)).is_err());

        let mut maze = solved(3, 3);
        assert!(maze.generate(GeneratorKind::RndKruskals).is_err());
        assert!(maze.solve(SolverKind::BreadthFirst).is_err());
        assert!(maze.set_end(Dims(1, 1)).is_err());

        maze.refresh().unwrap();
        assert!(maze.solve(SolverKind::BreadthFirst).is_ok());
    }

    #[test]
    fn solving_needs_both_endpoints() {
        let mut maze = generated(3, 3);
        maze.set_start(Dims(0, 0)).unwrap();

        assert_eq!(
            maze.solve(SolverKind::DepthFirst).err(),
            Some(MazeError::MissingEndpoints)
        );
        assert_eq!(
            maze.set_end(Dims(3, 0)),
            Err(MazeError::OutOfBounds(Dims(3, 0)))
        );
    }

    #[test]
    fn endpoints_are_exclusive() {
        let mut maze = generated(3, 3);
        maze.set_start(Dims(1, 1)).unwrap();
        maze.set_end(Dims(1, 1)).unwrap();
        assert!(!maze.has_start());
        assert!(maze.has_end());

        maze.clear_point(Dims(1, 1)).unwrap();
        assert!(!maze.has_end());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut maze = solved(6, 5);
        maze.reset().unwrap();
        let once = maze.board().get_cells().clone();

        maze.reset().unwrap();
        assert_eq!(maze.board().get_cells(), &once);
        assert!(once
            .iter()
            .all(|cell| cell.state() == CellState::Created && cell.point() == CellPoint::None));
    }

    #[test]
    fn refresh_keeps_endpoints_only() {
        let mut maze = solved(6, 5);
        assert!(!maze.board().path_cells().is_empty());

        maze.refresh().unwrap();
        assert!(maze.board().path_cells().is_empty());
        assert_eq!(maze.board().cell(Dims(0, 0)).point(), CellPoint::Start);
        assert_eq!(maze.board().cell(Dims(5, 4)).point(), CellPoint::End);
    }

    #[test]
    fn observers_survive_resize() {
        let seen = Rc::new(RefCell::new(0));
        let counter = seen.clone();

        let mut maze = Maze::new(2, 2, Some(3)).unwrap();
        maze.subscribe(move |change| {
            if let ChangeKind::Walls(_) = change.kind {
                *counter.borrow_mut() += 1;
            }
        });
        maze.resize(1, 3).unwrap();
        maze.generate(GeneratorKind::DepthFirstSearch)
            .unwrap()
            .finish()
            .unwrap();

        // two edges, both sides of each
        assert_eq!(*seen.borrow(), 4);
    }

    #[test]
    fn iterating_a_run_reports_progress() {
        let mut maze = Maze::new(5, 5, Some(9)).unwrap();
        let run = maze.generate(GeneratorKind::WeightedGrowth).unwrap();

        let progress = run.collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(progress.len(), 25);
        assert!(progress.windows(2).all(|w| w[0].done <= w[1].done));
        assert!(maze.is_completed());
    }

    #[test]
    fn paced_run_sleeps_between_steps() {
        let mut maze = Maze::new(2, 3, Some(4)).unwrap();
        maze.set_delay(Duration::from_millis(1));

        let steps = maze
            .generate(GeneratorKind::DepthFirstSearch)
            .unwrap()
            .finish_paced()
            .unwrap();
        assert_eq!(steps, 2 * 6 - 1);
        assert!(maze.is_completed());
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generated(7, 7);
        let b = generated(7, 7);
        assert_eq!(a.seed(), 17);
        assert_eq!(a.board().get_cells(), b.board().get_cells());
    }
}

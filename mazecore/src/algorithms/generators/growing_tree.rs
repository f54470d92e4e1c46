use std::fmt;

use rand::Rng as _;

use super::{choose, random_cell, Random};
use crate::{
    algorithms::{MazeAlgorithm, Step},
    dims::Dims,
    gameboard::{Board, CellState},
    maze::MazeError,
    progress::Progress,
};

/// Decides which cell of the active list is processed next.
pub trait Pick: fmt::Debug {
    /// `active` is never empty. Returns an index into it.
    fn pick(&mut self, active: &[Dims], board: &Board, rng: &mut Random) -> usize;
}

/// Uniformly random element of the active list.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPick;

impl Pick for RandomPick {
    fn pick(&mut self, active: &[Dims], _: &Board, rng: &mut Random) -> usize {
        rng.gen_range(0..active.len())
    }
}

/// Growing tree over an unordered active list.
///
/// Each step takes one cell of the list, attaches it to a random already `Created` neighbor,
/// then queues all of its untouched neighbors. The order the list is consumed in depends on
/// the [`Pick`] strategy.
#[derive(Debug)]
pub struct GrowingTree<P: Pick = RandomPick> {
    active: Vec<Dims>,
    current: Option<usize>,
    pick: P,
    progress: Progress,
}

impl<P: Pick + Default> GrowingTree<P> {
    pub fn new(board: &mut Board, rng: &mut Random) -> Self {
        Self::with_pick(board, rng, P::default())
    }
}

impl<P: Pick> GrowingTree<P> {
    pub fn with_pick(board: &mut Board, rng: &mut Random, pick: P) -> Self {
        Self {
            active: vec![random_cell(board, rng)],
            current: None,
            pick,
            progress: Progress::new(0, board.cell_count()),
        }
    }

    fn expand(&mut self, board: &mut Board, rng: &mut Random, index: usize) {
        let cell = self.active[index];

        let created = board.neighbors(cell, CellState::Created);
        if let Some(tree) = choose(&created, rng) {
            board.cell_mut(cell).depth = board.cell(tree).depth + 1;
            board.connect(cell, tree);
        }

        let untouched = board.neighbors(cell, CellState::None);
        for &next in &untouched {
            board.set_state(next, CellState::Visiting);
        }
        self.active.extend(untouched);

        board.set_state(cell, CellState::Created);
        self.active.remove(index);
        self.progress.done += 1;
    }
}

impl<P: Pick> MazeAlgorithm for GrowingTree<P> {
    fn step(&mut self, board: &mut Board, rng: &mut Random) -> Result<Step, MazeError> {
        if let Some(index) = self.current.take() {
            self.expand(board, rng, index);
        }

        if self.active.is_empty() {
            self.progress.finish();
            return Ok(Step::Done);
        }

        let index = self.pick.pick(&self.active, board, rng);
        board.set_state(self.active[index], CellState::Visited);
        self.current = Some(index);

        Ok(Step::Continue)
    }

    fn progress(&self) -> Progress {
        self.progress
    }
}

use super::{choose, random_cell, Random};
use crate::{
    algorithms::{MazeAlgorithm, Step},
    dims::Dims,
    gameboard::{Board, CellState},
    maze::MazeError,
    progress::Progress,
};

/// Randomized depth-first search with an explicit stack.
#[derive(Debug)]
pub struct DepthFirstSearch {
    stack: Vec<Dims>,
    current: Option<Dims>,
    progress: Progress,
}

impl DepthFirstSearch {
    pub fn new(board: &mut Board, rng: &mut Random) -> Self {
        let cell_count = board.cell_count();
        let mut stack = Vec::with_capacity(cell_count);
        stack.push(random_cell(board, rng));

        Self {
            stack,
            current: None,
            progress: Progress::new(0, cell_count),
        }
    }

    fn expand(&mut self, board: &mut Board, rng: &mut Random, cell: Dims) {
        let unvisited = board.neighbors(cell, CellState::None);

        if let Some(chosen) = choose(&unvisited, rng) {
            board.connect(cell, chosen);
            board.cell_mut(chosen).depth = board.cell(cell).depth + 1;
            board.set_state(chosen, CellState::Visiting);
            board.set_state(cell, CellState::Visiting);
            self.stack.push(chosen);
        } else {
            self.stack.pop();
            board.set_state(cell, CellState::Created);
            self.progress.done += 1;
        }
    }
}

impl MazeAlgorithm for DepthFirstSearch {
    fn step(&mut self, board: &mut Board, rng: &mut Random) -> Result<Step, MazeError> {
        if let Some(cell) = self.current.take() {
            self.expand(board, rng, cell);
        }

        match self.stack.last() {
            Some(&top) => {
                board.set_state(top, CellState::Visited);
                self.current = Some(top);
                Ok(Step::Continue)
            }
            None => {
                self.progress.finish();
                Ok(Step::Done)
            }
        }
    }

    fn progress(&self) -> Progress {
        self.progress
    }
}

#[cfg(test)]
mod tests {
    use crate::{algorithms::GeneratorKind, dims::Dims};

    use super::super::tests::generate;

    #[test]
    fn visits_each_cell_twice_per_edge() {
        // every cell is on top once when pushed and once more after each child returns
        let (board, steps) = generate(GeneratorKind::DepthFirstSearch, 4, 5, 3);
        assert_eq!(steps, 20 + 19);
        assert!(board.is_spanning_tree());
    }

    #[test]
    fn depth_grows_along_the_tree() {
        let (board, _) = generate(GeneratorKind::DepthFirstSearch, 6, 6, 11);
        let roots = board
            .get_cells()
            .iter()
            .filter(|cell| cell.depth() == 0)
            .count();
        assert_eq!(roots, 1);

        for pos in Dims::iter_fill(board.size()) {
            let depth = board.cell(pos).depth();
            if depth > 0 {
                let parent_found = crate::gameboard::CellWall::get_in_order()
                    .into_iter()
                    .map(|wall| pos + wall.to_coord())
                    .any(|next| {
                        board.is_connected(pos, next) && board.cell(next).depth() + 1 == depth
                    });
                assert!(parent_found, "{pos:?}");
            }
        }
    }
}
